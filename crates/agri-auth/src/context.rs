//! Process-wide authentication state as an explicit context object.
//!
//! `SessionContext` owns the current [`AuthState`] in a `tokio::sync::watch`
//! channel: writes (sign-in, sign-up, sign-out, restore) are serialized by
//! the sender, readers take cheap snapshots or subscribe to changes.

use agri_core::Session;
use tokio::sync::watch;

use crate::error::AuthError;
use crate::forms::{Credentials, SignUpRequest};
use crate::provider::{AuthProvider, SignUpOutcome};
use crate::token_store::SessionStore;

/// Sessions expiring within this window are refreshed on restore.
const EXPIRY_BUFFER_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Restore has not finished yet.
    Loading,
    SignedOut,
    SignedIn(Session),
}

/// Where an entry point should send the user once auth state is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
}

pub struct SessionContext<P> {
    provider: P,
    store: SessionStore,
    state: watch::Sender<AuthState>,
}

impl<P: AuthProvider> SessionContext<P> {
    /// Create a context in the `Loading` state. Call [`Self::restore`] next.
    #[must_use]
    pub fn new(provider: P, store: SessionStore) -> Self {
        let (state, _) = watch::channel(AuthState::Loading);
        Self {
            provider,
            store,
            state,
        }
    }

    /// Restore the persisted session, refreshing it when near expiry.
    ///
    /// A refresh the provider rejects clears the stored session. A refresh
    /// that fails in transit keeps it, so the next run can try again.
    ///
    /// # Errors
    ///
    /// Returns the transport error of a failed refresh. The state is
    /// `SignedOut` in that case.
    pub async fn restore(&self) -> Result<Option<Session>, AuthError> {
        let Some(stored) = self.store.load() else {
            self.set(AuthState::SignedOut);
            return Ok(None);
        };

        if !stored.is_near_expiry(EXPIRY_BUFFER_SECS) {
            tracing::debug!(user_id = %stored.user.id, "restored stored session");
            self.set(AuthState::SignedIn(stored.clone()));
            return Ok(Some(stored));
        }

        tracing::debug!(expires_at = %stored.expires_at, "stored session near expiry; refreshing");
        match self.provider.refresh(&stored.refresh_token).await {
            Ok(session) => {
                self.store.save(&session)?;
                self.set(AuthState::SignedIn(session.clone()));
                Ok(Some(session))
            }
            Err(AuthError::Rejected { status, message }) => {
                tracing::warn!(status, %message, "session refresh rejected; signing out");
                self.store.clear()?;
                self.set(AuthState::SignedOut);
                Ok(None)
            }
            Err(error) => {
                self.set(AuthState::SignedOut);
                Err(error)
            }
        }
    }

    /// Sign in with email + password and persist the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` for blank fields, or the provider's
    /// error if the credentials are rejected.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let credentials = Credentials::new(email, password)?;
        let session = self.provider.sign_in(&credentials).await?;
        self.store.save(&session)?;
        tracing::debug!(user_id = %session.user.id, "signed in");
        self.set(AuthState::SignedIn(session.clone()));
        Ok(session)
    }

    /// Register a new user. A session is only opened when the provider does
    /// not require email confirmation.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the sign-up is rejected.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        let outcome = self.provider.sign_up(request).await?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.store.save(session)?;
            self.set(AuthState::SignedIn(session.clone()));
        }
        Ok(outcome)
    }

    /// Revoke the session (best-effort) and clear the persisted token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the stored session cannot be removed.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let token = match &*self.state.borrow() {
            AuthState::SignedIn(session) => Some(session.access_token.clone()),
            AuthState::Loading | AuthState::SignedOut => None,
        };
        if let Some(token) = token
            && let Err(error) = self.provider.sign_out(&token).await
        {
            tracing::warn!(%error, "remote sign-out failed; clearing local session anyway");
        }
        self.store.clear()?;
        self.set(AuthState::SignedOut);
        Ok(())
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(*self.state.borrow(), AuthState::Loading)
    }

    /// The signed-in session, if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        match &*self.state.borrow() {
            AuthState::SignedIn(session) => Some(session.clone()),
            AuthState::Loading | AuthState::SignedOut => None,
        }
    }

    /// The signed-in session, required to be unexpired.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` or `AuthError::SessionExpired`.
    pub fn require_session(&self) -> Result<Session, AuthError> {
        let session = self.current().ok_or(AuthError::NotAuthenticated)?;
        if session.is_expired() {
            return Err(AuthError::SessionExpired);
        }
        Ok(session)
    }

    /// Entry routing: `None` while loading.
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        match &*self.state.borrow() {
            AuthState::Loading => None,
            AuthState::SignedOut => Some(Route::Login),
            AuthState::SignedIn(_) => Some(Route::Dashboard),
        }
    }

    /// Receive every subsequent state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    fn set(&self, next: AuthState) {
        self.state.send_replace(next);
    }
}
