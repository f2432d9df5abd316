//! Storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Upload failures, classified so callers never have to inspect message text.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No session, or the session's token is expired or was refused.
    #[error("not authenticated; please log in again")]
    Unauthenticated,

    /// The bucket's storage policy rejected the upload.
    #[error("storage permission denied: {message}")]
    PermissionDenied { message: String },

    /// The bucket (or object) does not exist.
    #[error("storage bucket '{bucket}' not found")]
    NotFound { bucket: String },

    /// Transport failure (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The local image could not be read.
    #[error("cannot access the selected image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other non-success status from the storage API.
    #[error("storage API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}
