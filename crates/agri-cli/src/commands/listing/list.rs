use serde::Serialize;

use agri_core::Listing;
use agri_listings::ListingRepository;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ListingRow {
    id: String,
    nomenclature: String,
    classification: Option<String>,
    price: f64,
    photos: usize,
    cover: Option<String>,
    certified: bool,
    logistics: bool,
    created_at: String,
}

impl From<Listing> for ListingRow {
    fn from(listing: Listing) -> Self {
        Self {
            cover: listing.cover_url().map(str::to_string),
            photos: listing.image_urls.len(),
            id: listing.id,
            nomenclature: listing.nomenclature,
            classification: listing.classification,
            price: listing.price,
            certified: listing.provenance_certified,
            logistics: listing.logistics_provided,
            created_at: listing.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.require_session()?;
    let listings = ctx.listings.list_by_owner(&session).await?;
    let rows = listings.into_iter().map(ListingRow::from).collect::<Vec<_>>();
    output(&rows, flags.format)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn row_uses_first_image_as_cover() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let row = ListingRow::from(Listing {
            id: "l-1".into(),
            user_id: "u".into(),
            nomenclature: "Seed Bag".into(),
            classification: None,
            price: 500.0,
            narrative: None,
            image_urls: vec!["url1".into(), "url2".into()],
            provenance_certified: true,
            logistics_provided: false,
            created_at: created,
            updated_at: created,
        });
        assert_eq!(row.cover.as_deref(), Some("url1"));
        assert_eq!(row.photos, 2);
        assert_eq!(row.created_at, "2025-03-01 09:30");
    }
}
