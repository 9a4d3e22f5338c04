use std::io::Write;

use clap::Args;
use pharma_core::{MedicineId, PaymentMethod};
use pharma_dashboard::commands::sale::{
    add_to_cart, get_cart, open_sale, set_sale_details, submit_sale, update_cart_item,
};
use pharma_dashboard::error::AppResult;
use pharma_dashboard::render;
use pharma_dashboard::state::SaleState;

use super::Context;

#[derive(Debug, Args)]
pub(crate) struct SellArgs {
    /// Invoice number, e.g. INV-0042
    #[arg(long)]
    invoice: String,

    /// Customer name
    #[arg(long)]
    customer: String,

    /// Cash, Card or UPI
    #[arg(long, default_value = "cash")]
    payment: PaymentMethod,

    /// Medicine id and quantity; repeat for more lines
    #[arg(long = "item", value_name = "ID=QTY", value_parser = parse_item, required = true)]
    items: Vec<(MedicineId, u32)>,

    /// Print the cart without submitting the sale
    #[arg(long)]
    dry_run: bool,
}

pub(crate) async fn run(args: SellArgs, ctx: &Context) -> AppResult<()> {
    let sale = SaleState::default();
    open_sale(&ctx.backend, &sale, ctx.page_size()).await?;
    set_sale_details(&sale, &args.invoice, &args.customer, args.payment)?;

    for (medicine_id, quantity) in merge_items(&args.items) {
        add_to_cart(&sale, medicine_id)?;
        if quantity > 1 {
            update_cart_item(&sale, medicine_id, i64::from(quantity))?;
        }
    }

    let cart = get_cart(&sale);
    if args.dry_run {
        return ctx.print(&cart, |out| {
            render::write_cart(&mut *out, &cart, &ctx.currency)?;
            writeln!(out, "Dry run, sale not submitted")
        });
    }

    let summary = submit_sale(&ctx.backend, &sale, ctx.page_size()).await?;
    ctx.print(&summary, |out| {
        render::write_cart(&mut *out, &cart, &ctx.currency)?;
        render::write_sale_receipt(out, &summary, &ctx.currency)
    })
}

/// Parses `ID=QTY`.
fn parse_item(raw: &str) -> Result<(MedicineId, u32), String> {
    let (id, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{raw}'"))?;

    let id = id
        .trim()
        .parse::<MedicineId>()
        .map_err(|_| format!("invalid medicine id '{}'", id.trim()))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| {
            format!(
                "quantity must be a whole number above 0, got '{}'",
                quantity.trim()
            )
        })?;

    Ok((id, quantity))
}

/// Sums repeated ids, keeping first-seen order.
fn merge_items(items: &[(MedicineId, u32)]) -> Vec<(MedicineId, u32)> {
    let mut merged: Vec<(MedicineId, u32)> = Vec::with_capacity(items.len());
    for &(id, quantity) in items {
        match merged.iter_mut().find(|(seen, _)| *seen == id) {
            Some((_, total)) => *total = total.saturating_add(quantity),
            None => merged.push((id, quantity)),
        }
    }
    merged
}
