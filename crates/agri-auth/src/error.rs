use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated — run `agri auth login`")]
    NotAuthenticated,

    #[error("session expired — run `agri auth login` to sign in again")]
    SessionExpired,

    /// Client-side form check failed before any request was made.
    #[error("{0}")]
    InvalidInput(String),

    /// The provider rejected the request (bad credentials, duplicate email, ...).
    #[error("auth provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected auth response: {0}")]
    InvalidResponse(String),

    #[error("session store error: {0}")]
    TokenStoreError(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::InvalidResponse(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}
