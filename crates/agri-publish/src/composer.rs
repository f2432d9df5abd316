//! Publish workflow over one editing session.
//!
//! ```text
//! Editing -> Validating -> Publishing(Uploading) -> Publishing(Persisting) -> Success
//!    ^           |                 |                         |
//!    +-----------+-----------------+-------------------------+   (any failure)
//! ```
//!
//! The draft is only reset after the listing is stored, so every failure
//! (including a dropped publish future) leaves the user's input intact.
//! Photos of a listing that could not be stored are handed back to the
//! uploader's cleanup policy.

use agri_core::{Listing, Session};
use agri_listings::ListingRepository;
use agri_storage::{ImageLocator, StorageBackend, UploadOrchestrator};
use serde::Serialize;

use crate::draft::{ImageSource, ListingDraft};
use crate::error::PublishError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishPhase {
    Uploading,
    Persisting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "phase")]
pub enum ComposerState {
    Editing,
    Validating,
    Publishing(PublishPhase),
    Success,
}

/// Resets the composer to `Editing` unless the publish completed.
struct StateGuard<'a> {
    state: &'a mut ComposerState,
}

impl StateGuard<'_> {
    fn enter(&mut self, next: ComposerState) {
        let from = *self.state;
        tracing::debug!(?from, to = ?next, "composer transition");
        *self.state = next;
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        if *self.state != ComposerState::Success {
            *self.state = ComposerState::Editing;
        }
    }
}

pub struct ListingComposer {
    draft: ListingDraft,
    state: ComposerState,
}

impl Default for ListingComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingComposer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_draft(ListingDraft::default())
    }

    #[must_use]
    pub const fn with_draft(draft: ListingDraft) -> Self {
        Self {
            draft,
            state: ComposerState::Editing,
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    /// Mutable access for text and toggle fields. Editing after a success
    /// starts a new session.
    pub fn edit(&mut self) -> &mut ListingDraft {
        self.state = ComposerState::Editing;
        &mut self.draft
    }

    #[must_use]
    pub const fn state(&self) -> ComposerState {
        self.state
    }

    #[must_use]
    pub fn is_publishing(&self) -> bool {
        matches!(self.state, ComposerState::Publishing(_))
    }

    /// # Errors
    ///
    /// Returns `PublishError::LimitReached` when the draft is full.
    pub fn add_image(
        &mut self,
        source: ImageSource,
        image: impl Into<ImageLocator>,
    ) -> Result<usize, PublishError> {
        self.edit().add_image(source, image)
    }

    pub fn remove_image(&mut self, index: usize) -> Option<ImageLocator> {
        self.edit().remove_image(index)
    }

    pub fn set_price(&mut self, raw: &str) {
        self.edit().set_price(raw);
    }

    /// Validate, upload the images, then store the listing.
    ///
    /// On success the draft is reset to its initial values and the stored
    /// listing is returned. On failure the state returns to `Editing` with
    /// the draft untouched.
    ///
    /// # Errors
    ///
    /// `AuthenticationRequired` without a session, `Validation` for a bad
    /// form (checked before any network call), `Upload` or `Persistence`
    /// for remote failures.
    pub async fn publish<B, R>(
        &mut self,
        session: Option<&Session>,
        uploader: &UploadOrchestrator<B>,
        repository: &R,
    ) -> Result<Listing, PublishError>
    where
        B: StorageBackend,
        R: ListingRepository,
    {
        let Self { draft, state } = self;
        let mut guard = StateGuard { state };

        guard.enter(ComposerState::Validating);
        let session = session
            .filter(|s| !s.is_expired())
            .ok_or(PublishError::AuthenticationRequired)?;
        let mut fields = draft.validate()?;

        guard.enter(ComposerState::Publishing(PublishPhase::Uploading));
        let batch = uploader.upload_batch(Some(session), draft.images()).await?;
        fields.image_urls.clone_from(&batch.urls);

        guard.enter(ComposerState::Publishing(PublishPhase::Persisting));
        let listing = match repository.create(session, &fields).await {
            Ok(listing) => listing,
            Err(error) => {
                tracing::warn!(%error, "storing listing failed; discarding its photos");
                uploader.discard(session, &batch).await;
                return Err(error.into());
            }
        };

        tracing::info!(listing_id = %listing.id, images = listing.image_urls.len(), "listing published");
        *draft = ListingDraft::default();
        guard.enter(ComposerState::Success);
        Ok(listing)
    }
}
