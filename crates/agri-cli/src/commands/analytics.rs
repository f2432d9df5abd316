use anyhow::Context;

use agri_insights::AnalyticsView;
use agri_listings::ListingRepository;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.require_session()?;
    let listings = ctx
        .listings
        .list_by_owner(&session)
        .await
        .context("Failed to load listings")?;
    let view = AnalyticsView::build(&ctx.market, &listings).await?;
    output(&view, flags.format)
}
