//! Backend-free listing store.

use std::sync::Mutex;

use agri_core::{Listing, ListingFields, Session};
use chrono::Utc;

use crate::error::ListingError;
use crate::repository::ListingRepository;

/// Listings kept in insertion order; reads filter by owner and reverse.
#[derive(Default)]
pub struct MemoryListings {
    rows: Mutex<Vec<Listing>>,
}

impl MemoryListings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored listings across all owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> Result<std::sync::MutexGuard<'_, Vec<Listing>>, ListingError> {
        self.rows
            .lock()
            .map_err(|_| ListingError::Persistence("listing store lock poisoned".into()))
    }
}

impl ListingRepository for MemoryListings {
    async fn create(
        &self,
        session: &Session,
        fields: &ListingFields,
    ) -> Result<Listing, ListingError> {
        fields.check_invariants()?;
        let now = Utc::now();
        let listing = Listing {
            id: generate_id()?,
            user_id: session.owner_id().to_string(),
            nomenclature: fields.nomenclature.clone(),
            classification: fields.classification.clone(),
            price: fields.price,
            narrative: fields.narrative.clone(),
            image_urls: fields.image_urls.clone(),
            provenance_certified: fields.provenance_certified,
            logistics_provided: fields.logistics_provided,
            created_at: now,
            updated_at: now,
        };
        self.rows()?.push(listing.clone());
        Ok(listing)
    }

    async fn list_by_owner(&self, session: &Session) -> Result<Vec<Listing>, ListingError> {
        let owner = session.owner_id();
        Ok(self
            .rows()?
            .iter()
            .rev()
            .filter(|listing| listing.user_id == owner)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, session: &Session, id: &str) -> Result<(), ListingError> {
        let owner = session.owner_id();
        self.rows()?
            .retain(|listing| !(listing.id == id && listing.user_id == owner));
        Ok(())
    }
}

fn generate_id() -> Result<String, ListingError> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes)
        .map_err(|e| ListingError::Persistence(format!("random source unavailable: {e}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}
