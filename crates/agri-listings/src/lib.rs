//! # agri-listings
//!
//! Persistence of seller listings behind [`ListingRepository`].
//!
//! [`PostgrestListings`] talks to the hosted REST gateway, where row-level
//! policies scope every request to the token's owner. [`MemoryListings`]
//! keeps rows in process for tests and backend-free consumers.

pub mod error;
pub mod memory;
pub mod postgrest;
pub mod repository;

pub use error::ListingError;
pub use memory::MemoryListings;
pub use postgrest::PostgrestListings;
pub use repository::ListingRepository;
