//! # agri-insights
//!
//! Read-only views for the seller: an inventory summary computed from the
//! owner's listings, and market figures served through [`MarketDataSource`].

pub mod error;
pub mod market;
pub mod summary;
pub mod views;

pub use error::InsightsError;
pub use market::{
    CommodityQuote, DailyEngagement, FieldConditions, MarketAlert, MarketDataSource, MarketItem,
    MarketOverview, Spotlight, StaticMarketData,
};
pub use summary::InventorySummary;
pub use views::{AnalyticsView, DashboardView};
