use clap::Subcommand;

use super::subcommands::{AuthCommands, ListingCommands};

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, register, sign out, show the session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Publish, list and delete your listings.
    Listing {
        #[command(subcommand)]
        action: ListingCommands,
    },
    /// Greeting, active listings, commodity prices and alerts.
    Dashboard,
    /// Market overview and trending items.
    Market,
    /// Inventory summary and engagement.
    Analytics,
}
