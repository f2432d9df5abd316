mod create;
mod delete;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ListingCommands;
use crate::context::AppContext;

/// Handle `agri listing <subcommand>`.
pub async fn handle(
    action: &ListingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ListingCommands::Create(args) => create::handle(args, ctx, flags).await,
        ListingCommands::List => list::handle(ctx, flags).await,
        ListingCommands::Delete { id } => delete::handle(id, ctx, flags).await,
    }
}
