use agri_core::Session;

use crate::error::StorageError;
use crate::locator::ImageLocator;

/// Object storage seen from the upload orchestrator.
///
/// Every call is made on behalf of a signed-in user; implementations attach
/// the session's access token so the bucket policy can match the key's
/// owner prefix.
#[allow(async_fn_in_trait)]
pub trait StorageBackend {
    /// Store the image at `key`.
    async fn upload(
        &self,
        session: &Session,
        key: &str,
        image: &ImageLocator,
    ) -> Result<(), StorageError>;

    /// Remove objects. Keys that do not exist are ignored.
    async fn remove(&self, session: &Session, keys: &[String]) -> Result<(), StorageError>;

    /// Publicly fetchable URL of the object at `key`.
    fn public_url(&self, key: &str) -> String;
}
