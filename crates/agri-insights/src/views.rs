//! Screen-shaped aggregates combining the owner's listings with market data.

use agri_core::{AuthUser, Listing};
use serde::Serialize;

use crate::error::InsightsError;
use crate::market::{
    CommodityQuote, DailyEngagement, FieldConditions, MarketAlert, MarketDataSource, Spotlight,
};
use crate::summary::InventorySummary;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub greeting_name: String,
    pub active_listings: usize,
    pub listing_growth_pct: f64,
    pub conditions: FieldConditions,
    pub quotes: Vec<CommodityQuote>,
    pub spotlight: Vec<Spotlight>,
    pub alerts: Vec<MarketAlert>,
}

impl DashboardView {
    /// # Errors
    ///
    /// Returns the first error of the market data source.
    pub async fn build<S: MarketDataSource>(
        source: &S,
        user: &AuthUser,
        listings: &[Listing],
    ) -> Result<Self, InsightsError> {
        tracing::debug!(user_id = %user.id, listings = listings.len(), "building dashboard view");
        Ok(Self {
            greeting_name: user.display_name(),
            active_listings: listings.len(),
            listing_growth_pct: source.listing_growth_pct().await?,
            conditions: source.field_conditions().await?,
            quotes: source.commodity_quotes().await?,
            spotlight: source.spotlight().await?,
            alerts: source.alerts().await?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsView {
    pub summary: InventorySummary,
    pub weekly_engagement: Vec<DailyEngagement>,
    pub tips: Vec<String>,
}

impl AnalyticsView {
    /// # Errors
    ///
    /// Returns the first error of the market data source.
    pub async fn build<S: MarketDataSource>(
        source: &S,
        listings: &[Listing],
    ) -> Result<Self, InsightsError> {
        let summary = InventorySummary::from_listings(listings);
        tracing::debug!(
            listings = summary.total_listings,
            revenue = summary.total_revenue,
            "building analytics view"
        );
        Ok(Self {
            summary,
            weekly_engagement: source.weekly_engagement().await?,
            tips: source.seller_tips().await?,
        })
    }
}
