//! # agri-auth
//!
//! Email + password authentication for Agrilink.
//!
//! Provides the hosted auth endpoint client (`reqwest`), client-side form
//! checks, session persistence (OS keychain via `keyring`, `0600` file
//! fallback), and [`SessionContext`], the explicit owner of the current
//! authentication state.

pub mod client;
pub mod context;
pub mod error;
pub mod forms;
pub mod jwt;
pub mod provider;
pub mod token_store;

pub use client::AuthClient;
pub use context::{AuthState, Route, SessionContext};
pub use error::AuthError;
pub use forms::{Credentials, ProfileMetadata, SignUpRequest};
pub use provider::{AuthProvider, SignUpOutcome};
pub use token_store::SessionStore;
