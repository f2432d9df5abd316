pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod dispatch;
pub mod listing;
pub mod market;
pub mod shared;
