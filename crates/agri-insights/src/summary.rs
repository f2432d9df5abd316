//! Aggregates over the owner's own listings.

use agri_core::Listing;
use serde::Serialize;

/// Estimated views per listing until real view tracking exists.
pub const ESTIMATED_VIEWS_PER_LISTING: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub total_listings: usize,
    /// Sum of asking prices.
    pub total_revenue: f64,
    pub average_price: f64,
    pub estimated_views: u64,
}

impl InventorySummary {
    #[must_use]
    pub fn from_listings(listings: &[Listing]) -> Self {
        let total_listings = listings.len();
        let total_revenue: f64 = listings.iter().map(|l| l.price).sum();
        #[allow(clippy::cast_precision_loss)]
        let average_price = if total_listings == 0 {
            0.0
        } else {
            total_revenue / total_listings as f64
        };
        Self {
            total_listings,
            total_revenue,
            average_price,
            estimated_views: u64::try_from(total_listings)
                .unwrap_or(u64::MAX)
                .saturating_mul(ESTIMATED_VIEWS_PER_LISTING),
        }
    }
}
