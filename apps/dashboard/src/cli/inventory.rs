use clap::Args;
use pharma_core::MedicineStatus;
use pharma_dashboard::commands::inventory::{apply_filters, refresh_inventory};
use pharma_dashboard::error::AppResult;
use pharma_dashboard::render;
use pharma_dashboard::state::InventoryState;

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct InventoryArgs {
    /// Matches medicine or generic name, case-insensitive
    #[arg(long, default_value = "")]
    search: String,

    /// Only show these statuses (active, low-stock, expired, out-of-stock);
    /// repeat or comma-separate
    #[arg(long = "status", value_delimiter = ',')]
    statuses: Vec<MedicineStatus>,
}

pub(crate) async fn run(args: InventoryArgs, ctx: &Context) -> AppResult<()> {
    let state = InventoryState::default();

    refresh_inventory(&ctx.backend, &state, ctx.page_size()).await?;
    let view = apply_filters(&state, &args.search, &args.statuses)?;

    ctx.print(&view, |out| render::write_inventory(out, &view, &ctx.currency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: InventoryArgs,
    }

    #[test]
    fn test_status_spellings() {
        let parsed = Wrapper::try_parse_from([
            "inventory",
            "--status",
            "low-stock,Expired",
            "--status",
            "out_of_stock",
        ])
        .unwrap();

        assert_eq!(
            parsed.args.statuses,
            vec![
                MedicineStatus::LowStock,
                MedicineStatus::Expired,
                MedicineStatus::OutOfStock
            ]
        );
        assert_eq!(parsed.args.search, "");
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(Wrapper::try_parse_from(["inventory", "--status", "recalled"]).is_err());
    }
}
