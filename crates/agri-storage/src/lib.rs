//! # agri-storage
//!
//! Listing photo uploads for Agrilink.
//!
//! [`UploadOrchestrator`] turns an ordered set of device-local image
//! locators into public URLs: it derives owner-scoped keys, uploads the
//! batch concurrently through a [`StorageBackend`], and removes the batch
//! again when any upload fails (see [`CleanupPolicy`]).
//!
//! Backends:
//! - [`SupabaseStorage`]: the hosted storage API over `reqwest` multipart
//! - [`MemoryStorage`]: in-process map for tests and offline consumers

pub mod backend;
pub mod error;
pub mod key;
pub mod locator;
pub mod memory;
pub mod orchestrator;
pub mod supabase;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use locator::ImageLocator;
pub use memory::MemoryStorage;
pub use orchestrator::{CleanupPolicy, UploadOrchestrator, UploadedBatch};
pub use supabase::SupabaseStorage;
