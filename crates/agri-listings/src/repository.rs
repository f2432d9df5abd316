use agri_core::{Listing, ListingFields, Session};

use crate::error::ListingError;

/// Storage of listings, always scoped to the session's owner.
#[allow(async_fn_in_trait)]
pub trait ListingRepository {
    /// Insert one listing owned by the session's user and return the stored row.
    async fn create(&self, session: &Session, fields: &ListingFields)
    -> Result<Listing, ListingError>;

    /// Every listing of the session's user, newest first.
    async fn list_by_owner(&self, session: &Session) -> Result<Vec<Listing>, ListingError>;

    /// Delete the listing with `id` if the session's user owns it. Unknown or
    /// foreign ids are not an error.
    async fn delete_by_id(&self, session: &Session, id: &str) -> Result<(), ListingError>;
}
