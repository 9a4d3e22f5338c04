use clap::Args;
use pharma_dashboard::commands::dashboard::refresh_dashboard;
use pharma_dashboard::error::AppResult;
use pharma_dashboard::render;
use pharma_dashboard::state::DashboardState;

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct DashboardArgs {
    /// Number of recent sales to show; defaults to recent_sales_limit
    #[arg(long)]
    limit: Option<u32>,
}

pub(crate) async fn run(args: DashboardArgs, ctx: &Context) -> AppResult<()> {
    let limit = args.limit.unwrap_or(ctx.config.backend.recent_sales_limit);
    let state = DashboardState::default();

    let view = refresh_dashboard(&ctx.backend, &state, limit).await?;

    ctx.print(&view, |out| render::write_dashboard(out, &view, &ctx.currency))
}
