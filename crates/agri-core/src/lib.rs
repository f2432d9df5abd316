//! # agri-core
//!
//! Core types and error types for Agrilink.
//!
//! This crate provides the foundational types shared across all Agrilink crates:
//! - The `Listing` row and its insert payload `ListingFields`
//! - Listing invariants (image count, narrative length, price range)
//! - The authenticated `Session` and `AuthUser` identity
//! - Cross-cutting error types

pub mod errors;
pub mod identity;
pub mod listing;

pub use errors::CoreError;
pub use identity::{AuthUser, Session};
pub use listing::{Listing, ListingFields, MAX_IMAGES, MAX_NARRATIVE_CHARS};
