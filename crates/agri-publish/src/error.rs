//! Workflow error types and their user-facing alerts.

use agri_core::{MAX_IMAGES, MAX_NARRATIVE_CHARS};
use agri_listings::ListingError;
use agri_storage::StorageError;
use serde::Serialize;
use thiserror::Error;

/// A form field failed its publish-time check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Nomenclature is required")]
    NomenclatureRequired,

    #[error("At least one image is required")]
    ImageRequired,

    #[error("Valid price is required (must be >= 0)")]
    InvalidPrice,

    #[error("Narrative must be {MAX_NARRATIVE_CHARS} characters or less")]
    NarrativeTooLong { chars: usize },
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Please log in to publish listings")]
    AuthenticationRequired,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("You can only add up to {MAX_IMAGES} images.")]
    LimitReached,

    #[error(transparent)]
    Upload(#[from] StorageError),

    #[error(transparent)]
    Persistence(#[from] ListingError),
}

/// Title + message pair shown to the user for a failed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&PublishError> for Alert {
    fn from(error: &PublishError) -> Self {
        let title = match error {
            PublishError::AuthenticationRequired => "Authentication Required",
            PublishError::Validation(_) => "Validation Error",
            PublishError::LimitReached => "Limit Reached",
            PublishError::Upload(_) | PublishError::Persistence(_) => "Error",
        };
        Self::new(title, error.to_string())
    }
}
