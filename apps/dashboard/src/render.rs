//! # Terminal Rendering
//!
//! Tables for each view, written to any `io::Write`.
//!
//! ```text
//! ╭────┬─────────────┬─────┬─────────┬────────────╮
//! │ #  │ Medicine    │ Qty │    Unit │ Line total │
//! ├────┼─────────────┼─────┼─────────┼────────────┤
//! │ 1  │ Paracetamol │   2 │   ₹5.00 │     ₹10.00 │
//! ╰────┴─────────────┴─────┴─────────┴────────────╯
//!  Items: 2   Total: ₹10.00
//! ```

use std::io;

use pharma_api::config::DisplaySettings;
use pharma_core::{HealthStatus, MedicineRecord, MedicineStatus, Money, SaleSummary};
use tabled::{
    builder::Builder,
    settings::{
        object::{Columns, Rows},
        Alignment, Style,
    },
    Table,
};

use crate::commands::dashboard::DashboardView;
use crate::commands::inventory::InventoryView;
use crate::commands::sale::CartView;

// =============================================================================
// Currency
// =============================================================================

/// How amounts are printed: symbol in front, 0-2 decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    symbol: String,
    decimals: u8,
}

impl CurrencyFormat {
    /// Amounts are held in hundredths, so more than 2 decimals is clamped.
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            decimals: decimals.min(2),
        }
    }

    /// Formats `amount`, rounding half away from zero when fewer than two
    /// decimals are shown.
    ///
    /// ## Example
    /// ```rust
    /// use pharma_core::Money;
    /// use pharma_dashboard::render::CurrencyFormat;
    ///
    /// let inr = CurrencyFormat::new("₹", 0);
    /// assert_eq!(inr.format(Money::from_cents(1250)), "₹13");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let cents = amount.cents();
        let abs = cents.unsigned_abs();
        // Amounts that round to zero print unsigned
        let sign = |rounded: u64| if cents < 0 && rounded > 0 { "-" } else { "" };

        match self.decimals {
            0 => {
                let units = round_div(abs, 100);
                format!("{}{}{}", sign(units), self.symbol, units)
            }
            1 => {
                let tenths = round_div(abs, 10);
                format!("{}{}{}.{}", sign(tenths), self.symbol, tenths / 10, tenths % 10)
            }
            _ => amount.format_with_symbol(&self.symbol),
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::new("₹", 2)
    }
}

impl From<&DisplaySettings> for CurrencyFormat {
    fn from(display: &DisplaySettings) -> Self {
        CurrencyFormat::new(display.currency_symbol.clone(), display.currency_decimals)
    }
}

fn round_div(value: u64, divisor: u64) -> u64 {
    (value + divisor / 2) / divisor
}

// =============================================================================
// Views
// =============================================================================

/// Stats cards followed by the recent sales table.
pub fn write_dashboard(
    mut out: impl io::Write,
    view: &DashboardView,
    currency: &CurrencyFormat,
) -> io::Result<()> {
    let mut cards = Builder::default();
    cards.push_record(["Today's Sales", "Items Sold Today", "Low Stock", "Purchase Orders"]);
    cards.push_record([
        currency.format(view.stats.todays_sales),
        view.stats.items_sold_today.to_string(),
        view.stats.low_stock_items.to_string(),
        currency.format(view.stats.purchase_orders),
    ]);
    let mut cards = cards.build();
    cards.with(Style::modern_rounded());
    writeln!(out, "{cards}")?;

    writeln!(out, "\nRecent Sales")?;
    if view.recent_sales.is_empty() {
        return writeln!(out, "  No sales yet");
    }
    writeln!(out, "{}", sales_table(&view.recent_sales, currency))
}

/// Inventory summary cards, the filtered medicine table and status counts.
pub fn write_inventory(
    mut out: impl io::Write,
    view: &InventoryView,
    currency: &CurrencyFormat,
) -> io::Result<()> {
    writeln!(
        out,
        " Total Items: {}   Active Stock: {}   Low Stock: {}   Total Value: {}",
        view.stats.total_items,
        view.stats.active_stock,
        view.stats.low_stock,
        currency.format(view.stats.total_value)
    )?;

    if view.medicines.is_empty() {
        writeln!(out, "  No medicines match the current filters")?;
    } else {
        writeln!(out, "{}", medicine_table(&view.medicines, currency))?;
    }

    let counts: Vec<String> = MedicineStatus::ALL
        .iter()
        .map(|status| format!("{}: {}", status, view.counts.get(*status)))
        .collect();
    writeln!(out, " {}", counts.join("   "))
}

/// A single medicine, e.g. after add or update.
pub fn write_medicine(
    mut out: impl io::Write,
    medicine: &MedicineRecord,
    currency: &CurrencyFormat,
) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        medicine_table(std::slice::from_ref(medicine), currency)
    )
}

pub fn write_cart(
    mut out: impl io::Write,
    cart: &CartView,
    currency: &CurrencyFormat,
) -> io::Result<()> {
    if cart.items.is_empty() {
        return writeln!(out, "  Cart is empty");
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Medicine", "Qty", "Unit", "Line total"]);
    for (index, line) in cart.items.iter().enumerate() {
        builder.push_record([
            (index + 1).to_string(),
            line.medicine.medicine_name.clone(),
            line.quantity.to_string(),
            currency.format(line.medicine.mrp),
            currency.format(line.line_total()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());
    writeln!(out, "{table}")?;

    writeln!(
        out,
        " Items: {}   Total: {}",
        cart.totals.total_items,
        currency.format(cart.totals.total_amount)
    )
}

/// Confirmation printed after the backend accepts a sale.
pub fn write_sale_receipt(
    mut out: impl io::Write,
    sale: &SaleSummary,
    currency: &CurrencyFormat,
) -> io::Result<()> {
    writeln!(out, "Sale recorded")?;
    writeln!(out, "{}", sales_table(std::slice::from_ref(sale), currency))
}

pub fn write_health(mut out: impl io::Write, health: &HealthStatus) -> io::Result<()> {
    if health.is_ok() {
        writeln!(out, "Backend is up ({})", health.status)
    } else {
        writeln!(out, "Backend reported status '{}'", health.status)
    }
}

// =============================================================================
// Tables
// =============================================================================

fn sales_table(sales: &[SaleSummary], currency: &CurrencyFormat) -> Table {
    let mut builder = Builder::default();
    builder.push_record([
        "Invoice", "Customer", "Items", "Amount", "Payment", "Date", "Status",
    ]);
    for sale in sales {
        builder.push_record([
            sale.invoice_no.clone(),
            sale.customer_name.clone(),
            sale.items_count.to_string(),
            currency.format(sale.total_amount),
            sale.payment_method.to_string(),
            sale.date.format("%Y-%m-%d %H:%M").to_string(),
            sale.status.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..4), Alignment::right());
    table
}

fn medicine_table(medicines: &[MedicineRecord], currency: &CurrencyFormat) -> Table {
    let mut builder = Builder::default();
    builder.push_record([
        "ID", "Medicine", "Generic", "Category", "Batch", "Expiry", "Qty", "Cost", "MRP",
        "Supplier", "Status",
    ]);
    for medicine in medicines {
        builder.push_record([
            medicine.id.to_string(),
            medicine.medicine_name.clone(),
            medicine.generic_name.clone(),
            medicine.category.clone(),
            medicine.batch_no.clone(),
            medicine.expiry_date.format("%Y-%m-%d").to_string(),
            medicine.quantity.to_string(),
            currency.format(medicine.cost_price),
            currency.format(medicine.mrp),
            medicine.supplier.clone(),
            medicine.status.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(6..9), Alignment::right());
    table.modify(Rows::first(), Alignment::center());
    table
}
