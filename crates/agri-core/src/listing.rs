use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Maximum number of photos attached to one listing.
pub const MAX_IMAGES: usize = 10;

/// Maximum narrative length, counted in characters.
pub const MAX_NARRATIVE_CHARS: usize = 500;

/// A sellable item as stored in the `listings` table.
///
/// `id`, `created_at` and `updated_at` are assigned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Listing {
    pub id: String,
    pub user_id: String,
    pub nomenclature: String,
    pub classification: Option<String>,
    pub price: f64,
    pub narrative: Option<String>,
    pub image_urls: Vec<String>,
    pub provenance_certified: bool,
    pub logistics_provided: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Cover photo: the first uploaded image.
    #[must_use]
    pub fn cover_url(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

/// Insert payload for one listing, minus the owner.
///
/// Optional text is `None` when the user left the field blank. Serializes
/// absent fields as JSON `null` so the row stores `NULL`, never `""`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ListingFields {
    pub nomenclature: String,
    pub classification: Option<String>,
    pub price: f64,
    pub narrative: Option<String>,
    pub image_urls: Vec<String>,
    pub provenance_certified: bool,
    pub logistics_provided: bool,
}

impl ListingFields {
    /// Check the row invariants the table relies on.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidListing`] naming the first violated rule.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        if self.nomenclature.trim().is_empty() {
            return Err(CoreError::InvalidListing("nomenclature is empty".into()));
        }
        if self.image_urls.is_empty() || self.image_urls.len() > MAX_IMAGES {
            return Err(CoreError::InvalidListing(format!(
                "expected 1..={MAX_IMAGES} image urls, got {}",
                self.image_urls.len()
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::InvalidListing(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }
        if let Some(narrative) = &self.narrative
            && narrative.chars().count() > MAX_NARRATIVE_CHARS
        {
            return Err(CoreError::InvalidListing(format!(
                "narrative exceeds {MAX_NARRATIVE_CHARS} characters"
            )));
        }
        Ok(())
    }
}

/// Normalize a free-text input into an optional column value.
///
/// Surrounding whitespace is trimmed; a blank result means "field omitted".
#[must_use]
pub fn normalize_optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
