use agri_core::{AuthUser, Session};

use crate::error::AuthError;
use crate::forms::{Credentials, SignUpRequest};

/// Result of a sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The provider created the user and opened a session right away.
    SignedIn(Session),
    /// The provider created the user but wants the email confirmed before
    /// the first sign-in (user record present, no session).
    ConfirmationRequired(AuthUser),
}

/// Operations the session context needs from an auth provider.
#[allow(async_fn_in_trait)]
pub trait AuthProvider {
    /// Exchange email + password for a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Register a user with profile metadata.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError>;

    /// Exchange a refresh token for a fresh session.
    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError>;

    /// Revoke the session server side.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
