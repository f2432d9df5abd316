//! Concurrent upload of a listing's photo set.
//!
//! All images of a batch are uploaded at once and the batch fails on the
//! first error. Keys are derived before any request is issued, so on failure
//! the whole batch can be removed again regardless of which uploads landed.

use agri_core::Session;
use futures::StreamExt;
use futures::stream::FuturesUnordered;

use crate::backend::StorageBackend;
use crate::error::StorageError;
use crate::key::object_key;
use crate::locator::ImageLocator;

/// What happens to already-uploaded objects when a batch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanupPolicy {
    /// Issue a best-effort removal of every key in the batch.
    #[default]
    RemoveUploaded,
    /// Leave uploaded objects in the bucket.
    Retain,
}

impl CleanupPolicy {
    #[must_use]
    pub const fn from_flag(cleanup_on_failure: bool) -> Self {
        if cleanup_on_failure {
            Self::RemoveUploaded
        } else {
            Self::Retain
        }
    }
}

/// Storage keys of an uploaded batch with their public URLs, both in input
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedBatch {
    pub keys: Vec<String>,
    pub urls: Vec<String>,
}

pub struct UploadOrchestrator<B> {
    backend: B,
    policy: CleanupPolicy,
}

impl<B: StorageBackend> UploadOrchestrator<B> {
    #[must_use]
    pub const fn new(backend: B, policy: CleanupPolicy) -> Self {
        Self { backend, policy }
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub const fn policy(&self) -> CleanupPolicy {
        self.policy
    }

    /// Upload every image under the session owner's folder and return their
    /// public URLs in input order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unauthenticated` without a live session, or the
    /// first upload failure of the batch.
    pub async fn upload_all(
        &self,
        session: Option<&Session>,
        images: &[ImageLocator],
    ) -> Result<Vec<String>, StorageError> {
        self.upload_batch(session, images)
            .await
            .map(|batch| batch.urls)
    }

    /// Like [`Self::upload_all`], but also hands back the storage keys so a
    /// later step can [`discard`](Self::discard) the batch.
    ///
    /// # Errors
    ///
    /// Same as [`Self::upload_all`].
    pub async fn upload_batch(
        &self,
        session: Option<&Session>,
        images: &[ImageLocator],
    ) -> Result<UploadedBatch, StorageError> {
        let session = session
            .filter(|s| !s.is_expired())
            .ok_or(StorageError::Unauthenticated)?;
        let owner = session.owner_id();

        let keys = images
            .iter()
            .map(|image| object_key(owner, image))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(owner, count = keys.len(), "uploading image batch");

        let mut pending: FuturesUnordered<_> = images
            .iter()
            .zip(&keys)
            .map(|(image, key)| async move {
                self.backend
                    .upload(session, key, image)
                    .await
                    .map_err(|error| (key.as_str(), error))
            })
            .collect();

        let mut failure = None;
        while let Some(result) = pending.next().await {
            if let Err((key, error)) = result {
                tracing::warn!(key, %error, "image upload failed");
                failure = Some(error);
                break;
            }
        }
        drop(pending);

        if let Some(error) = failure {
            self.compensate(session, &keys).await;
            return Err(error);
        }

        let urls = keys.iter().map(|key| self.backend.public_url(key)).collect();
        Ok(UploadedBatch { keys, urls })
    }

    /// Remove a batch that uploaded fine but is no longer wanted, e.g. when
    /// the listing row could not be stored. Follows the cleanup policy and
    /// never fails.
    pub async fn discard(&self, session: &Session, batch: &UploadedBatch) {
        if batch.keys.is_empty() {
            return;
        }
        tracing::debug!(count = batch.keys.len(), "discarding uploaded batch");
        self.compensate(session, &batch.keys).await;
    }

    async fn compensate(&self, session: &Session, keys: &[String]) {
        match self.policy {
            CleanupPolicy::Retain => {
                tracing::debug!(count = keys.len(), "retaining uploaded objects of failed batch");
            }
            CleanupPolicy::RemoveUploaded => {
                if let Err(error) = self.backend.remove(session, keys).await {
                    tracing::warn!(%error, "cleanup of failed upload batch failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_from_config_flag() {
        assert_eq!(CleanupPolicy::from_flag(true), CleanupPolicy::RemoveUploaded);
        assert_eq!(CleanupPolicy::from_flag(false), CleanupPolicy::Retain);
        assert_eq!(CleanupPolicy::default(), CleanupPolicy::RemoveUploaded);
    }
}
