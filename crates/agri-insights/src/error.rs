use thiserror::Error;

/// Failure of a [`MarketDataSource`](crate::MarketDataSource).
///
/// `StaticMarketData` never fails; the variant exists for sources backed by
/// a real feed.
#[derive(Debug, Error)]
pub enum InsightsError {
    /// The market data source could not produce a value.
    #[error("market data unavailable: {0}")]
    Unavailable(String),
}
