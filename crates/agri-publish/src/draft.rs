//! The editable listing form.

use agri_core::listing::normalize_optional;
use agri_core::{ListingFields, MAX_IMAGES, MAX_NARRATIVE_CHARS};
use agri_storage::ImageLocator;
use serde::Serialize;

use crate::error::{PublishError, ValidationError};

/// Where an image came from. Both paths share the same limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Camera,
    Gallery,
}

/// Raw form input as the user typed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingDraft {
    pub nomenclature: String,
    pub classification: String,
    price: String,
    pub narrative: String,
    images: Vec<ImageLocator>,
    pub provenance_certified: bool,
    pub logistics_provided: bool,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            nomenclature: String::new(),
            classification: String::new(),
            price: String::new(),
            narrative: String::new(),
            images: Vec::new(),
            provenance_certified: true,
            logistics_provided: false,
        }
    }
}

impl ListingDraft {
    /// Price input, digits only.
    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    /// Replace the price input, dropping every non-digit character.
    pub fn set_price(&mut self, raw: &str) {
        self.price = raw.chars().filter(char::is_ascii_digit).collect();
    }

    #[must_use]
    pub fn images(&self) -> &[ImageLocator] {
        &self.images
    }

    #[must_use]
    pub fn remaining_slots(&self) -> usize {
        MAX_IMAGES.saturating_sub(self.images.len())
    }

    /// Append an image. Returns the new image count.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::LimitReached` when the draft already holds
    /// the maximum; the image is not appended.
    pub fn add_image(
        &mut self,
        source: ImageSource,
        image: impl Into<ImageLocator>,
    ) -> Result<usize, PublishError> {
        if self.images.len() >= MAX_IMAGES {
            return Err(PublishError::LimitReached);
        }
        let image = image.into();
        tracing::debug!(?source, %image, "image added to draft");
        self.images.push(image);
        Ok(self.images.len())
    }

    /// Remove the image at `index`, if present.
    pub fn remove_image(&mut self, index: usize) -> Option<ImageLocator> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Check the form in publish order and build the insert payload.
    ///
    /// `image_urls` is left empty; it is filled once uploads complete.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`ValidationError`].
    pub fn validate(&self) -> Result<ListingFields, ValidationError> {
        let nomenclature = self.nomenclature.trim();
        if nomenclature.is_empty() {
            return Err(ValidationError::NomenclatureRequired);
        }
        if self.images.is_empty() {
            return Err(ValidationError::ImageRequired);
        }
        let price = parse_price(&self.price)?;
        let chars = self.narrative.chars().count();
        if chars > MAX_NARRATIVE_CHARS {
            return Err(ValidationError::NarrativeTooLong { chars });
        }

        Ok(ListingFields {
            nomenclature: nomenclature.to_string(),
            classification: normalize_optional(&self.classification),
            price,
            narrative: normalize_optional(&self.narrative),
            image_urls: Vec::new(),
            provenance_certified: self.provenance_certified,
            logistics_provided: self.logistics_provided,
        })
    }
}

fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::InvalidPrice);
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ValidationError::InvalidPrice),
    }
}
