//! Listing persistence error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListingError {
    /// The backend rejected the write or query; carries its message.
    #[error("could not save listing: {0}")]
    Persistence(String),

    /// The access token was missing or refused.
    #[error("not authenticated; please log in again")]
    Unauthenticated,

    /// The payload breaks a row invariant and was never sent.
    #[error("invalid listing: {0}")]
    InvalidListing(String),

    /// Transport failure (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with something that is not a listing row.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ListingError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::InvalidResponse(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

impl From<agri_core::CoreError> for ListingError {
    fn from(error: agri_core::CoreError) -> Self {
        match error {
            agri_core::CoreError::InvalidListing(reason) => Self::InvalidListing(reason),
            agri_core::CoreError::Other(other) => Self::Persistence(other.to_string()),
        }
    }
}
