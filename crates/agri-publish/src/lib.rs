//! # agri-publish
//!
//! The listing composition workflow: a [`ListingDraft`] edited by the user,
//! and a [`ListingComposer`] that validates it, uploads its photos through
//! the upload orchestrator and stores the listing through a repository.

pub mod composer;
pub mod draft;
pub mod error;

pub use composer::{ComposerState, ListingComposer, PublishPhase};
pub use draft::{ImageSource, ListingDraft};
pub use error::{Alert, PublishError, ValidationError};
