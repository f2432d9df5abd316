use serde::Serialize;

use agri_listings::ListingRepository;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ListingDeleteResponse {
    id: String,
    deleted: bool,
}

pub async fn handle(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.require_session()?;
    ctx.listings.delete_by_id(&session, id).await?;
    output(
        &ListingDeleteResponse {
            id: id.to_string(),
            deleted: true,
        },
        flags.format,
    )
}
