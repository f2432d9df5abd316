//! Market data shown on the dashboard, market index and analytics views.
//!
//! [`MarketDataSource`] is the seam a real feed plugs into;
//! [`StaticMarketData`] serves fixed figures in the same shape.

use serde::Serialize;

use crate::error::InsightsError;

/// Commodity price ticker entry (USD per bushel).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommodityQuote {
    pub symbol: String,
    pub price_usd: f64,
    pub change_pct: f64,
}

impl CommodityQuote {
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.change_pct >= 0.0
    }
}

/// Trending marketplace item (INR).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price_inr: u64,
    pub change_pct: f64,
    pub volume: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketOverview {
    pub growth_pct: f64,
    pub items: Vec<MarketItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spotlight {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketAlert {
    pub message: String,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldConditions {
    pub temperature_c: f64,
    pub soil_humidity_pct: f64,
}

/// Relative engagement for one weekday, 0–100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyEngagement {
    pub day: String,
    pub level_pct: u8,
}

#[allow(async_fn_in_trait)]
pub trait MarketDataSource {
    async fn commodity_quotes(&self) -> Result<Vec<CommodityQuote>, InsightsError>;

    async fn market_overview(&self) -> Result<MarketOverview, InsightsError>;

    async fn spotlight(&self) -> Result<Vec<Spotlight>, InsightsError>;

    async fn alerts(&self) -> Result<Vec<MarketAlert>, InsightsError>;

    async fn field_conditions(&self) -> Result<FieldConditions, InsightsError>;

    /// Listing growth over the previous period, in percent.
    async fn listing_growth_pct(&self) -> Result<f64, InsightsError>;

    async fn weekly_engagement(&self) -> Result<Vec<DailyEngagement>, InsightsError>;

    /// Short seller tips shown with analytics.
    async fn seller_tips(&self) -> Result<Vec<String>, InsightsError>;
}

/// Fixed market figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMarketData;

impl MarketDataSource for StaticMarketData {
    async fn commodity_quotes(&self) -> Result<Vec<CommodityQuote>, InsightsError> {
        Ok([("WHEAT", 7.42, 1.2), ("CORN", 4.85, -0.4), ("SOYBEANS", 13.10, 0.8)]
            .into_iter()
            .map(|(symbol, price_usd, change_pct)| CommodityQuote {
                symbol: symbol.into(),
                price_usd,
                change_pct,
            })
            .collect())
    }

    async fn market_overview(&self) -> Result<MarketOverview, InsightsError> {
        let items = [
            ("Premium Textiles", "Fabric", 45_000, 12.5, "₹2.3M"),
            ("Organic Cotton", "Raw Material", 32_000, -3.2, "₹1.8M"),
            ("Designer Fabrics", "Fabric", 68_000, 8.7, "₹3.1M"),
            ("Synthetic Blends", "Raw Material", 28_000, 5.3, "₹1.5M"),
            ("Silk Products", "Fabric", 95_000, -1.8, "₹4.2M"),
            ("Wool Collections", "Raw Material", 52_000, 15.2, "₹2.7M"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, category, price_inr, change_pct, volume))| MarketItem {
            id: (i + 1).to_string(),
            name: name.into(),
            category: category.into(),
            price_inr,
            change_pct,
            volume: volume.into(),
        })
        .collect();
        Ok(MarketOverview {
            growth_pct: 8.4,
            items,
        })
    }

    async fn spotlight(&self) -> Result<Vec<Spotlight>, InsightsError> {
        Ok(vec![Spotlight {
            title: "Premium Organic Winter Seed".into(),
            subtitle: "MARKETPLACE SPOTLIGHT".into(),
            image_url: "https://images.unsplash.com/photo-1574943320219-553eb213f72d?w=800".into(),
        }])
    }

    async fn alerts(&self) -> Result<Vec<MarketAlert>, InsightsError> {
        Ok(vec![MarketAlert {
            message: "Price Alert: Rice up +2%".into(),
            age: "NOW".into(),
        }])
    }

    async fn field_conditions(&self) -> Result<FieldConditions, InsightsError> {
        Ok(FieldConditions {
            temperature_c: 28.0,
            soil_humidity_pct: 42.0,
        })
    }

    async fn listing_growth_pct(&self) -> Result<f64, InsightsError> {
        Ok(12.0)
    }

    async fn weekly_engagement(&self) -> Result<Vec<DailyEngagement>, InsightsError> {
        Ok([
            ("Mon", 60),
            ("Tue", 40),
            ("Wed", 80),
            ("Thu", 50),
            ("Fri", 70),
            ("Sat", 90),
            ("Sun", 55),
        ]
        .into_iter()
        .map(|(day, level_pct)| DailyEngagement {
            day: day.into(),
            level_pct,
        })
        .collect())
    }

    async fn seller_tips(&self) -> Result<Vec<String>, InsightsError> {
        Ok(vec![
            "Your listings are receiving 23% more views this week".into(),
            "Items priced between ₹5,000-₹15,000 get the most engagement".into(),
        ])
    }
}
