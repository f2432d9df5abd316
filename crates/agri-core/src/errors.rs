//! Cross-cutting error types for Agrilink.
//!
//! Domain-specific errors (e.g., `StorageError`, `ListingError`) are defined in
//! their respective crates. A unified error is deferred to `agri-cli` where all
//! crate errors converge into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Agrilink crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A listing record violates one of its invariants.
    #[error("Invalid listing: {0}")]
    InvalidListing(String),

    /// Catch-all for unexpected errors. Nothing in the workspace raises it;
    /// it lets library consumers lift an `anyhow::Error` into `CoreError`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
