pub mod auth;
pub mod listing;

pub use auth::AuthCommands;
pub use listing::ListingCommands;
