use agri_insights::MarketDataSource;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let overview = ctx.market.market_overview().await?;
    output(&overview, flags.format)
}
