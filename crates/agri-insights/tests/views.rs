use agri_core::{AuthUser, Listing};
use agri_insights::{AnalyticsView, DashboardView, MarketDataSource, StaticMarketData};
use chrono::Utc;
use pretty_assertions::assert_eq;

fn listing(id: &str, price: f64) -> Listing {
    Listing {
        id: id.into(),
        user_id: "u".into(),
        nomenclature: "Wheat".into(),
        classification: Some("Grain".into()),
        price,
        narrative: None,
        image_urls: vec![format!("https://cdn.test/{id}.jpg")],
        provenance_certified: true,
        logistics_provided: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn dashboard_greets_by_email_local_part() {
    let user = AuthUser {
        id: "u".into(),
        email: Some("green.acres@farm.test".into()),
        full_name: None,
        farm_name: None,
    };
    let view = DashboardView::build(&StaticMarketData, &user, &[listing("a", 5.0)])
        .await
        .expect("dashboard");

    assert_eq!(view.greeting_name, "GREEN.ACRES");
    assert_eq!(view.active_listings, 1);
    assert_eq!(view.quotes.len(), 3);
    assert_eq!(view.quotes[0].symbol, "WHEAT");
    assert!(!view.quotes[1].is_positive());
    assert_eq!(view.alerts[0].message, "Price Alert: Rice up +2%");
}

#[tokio::test]
async fn dashboard_falls_back_to_generic_name() {
    let user = AuthUser {
        id: "u".into(),
        email: None,
        full_name: None,
        farm_name: None,
    };
    let view = DashboardView::build(&StaticMarketData, &user, &[])
        .await
        .expect("dashboard");
    assert_eq!(view.greeting_name, "FARMER");
    assert_eq!(view.active_listings, 0);
}

#[tokio::test]
async fn analytics_combines_summary_and_engagement() {
    let view = AnalyticsView::build(&StaticMarketData, &[listing("a", 100.0), listing("b", 300.0)])
        .await
        .expect("analytics");
    assert_eq!(view.summary.total_listings, 2);
    assert_eq!(view.summary.total_revenue, 400.0);
    assert_eq!(view.summary.average_price, 200.0);
    assert_eq!(view.summary.estimated_views, 84);
    assert_eq!(view.weekly_engagement.len(), 7);
    assert!(view.weekly_engagement.iter().all(|d| d.level_pct <= 100));
}

#[tokio::test]
async fn market_overview_lists_trending_items() {
    let overview = StaticMarketData.market_overview().await.expect("overview");
    assert_eq!(overview.growth_pct, 8.4);
    assert_eq!(overview.items.len(), 6);
    assert_eq!(overview.items[4].name, "Silk Products");
    assert_eq!(overview.items[4].price_inr, 95_000);
    let ids: Vec<_> = overview.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
}
