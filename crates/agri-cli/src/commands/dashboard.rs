use agri_insights::DashboardView;
use agri_listings::ListingRepository;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.require_session()?;
    let listings = match ctx.listings.list_by_owner(&session).await {
        Ok(listings) => listings,
        Err(error) => {
            tracing::warn!(%error, "could not load listings for dashboard");
            Vec::new()
        }
    };
    let view = DashboardView::build(&ctx.market, &session.user, &listings).await?;
    output(&view, flags.format)
}
