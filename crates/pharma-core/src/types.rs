//! # Domain Types
//!
//! Types exchanged with the pharmacy backend, named after their JSON keys.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ MedicineRecord  │   │    NewSale      │   │  SaleSummary    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  invoice_no     │   │  id             │       │
//! │  │  medicine_name  │   │  customer_name  │   │  invoice_no     │       │
//! │  │  quantity       │   │  items[]        │   │  total_amount   │       │
//! │  │  mrp/cost_price │   │  total_amount   │   │  date           │       │
//! │  │  status         │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ MedicineStatus  │   │ PaymentMethod   │   │ DashboardStats  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Active         │   │  Cash           │   │  todays_sales   │       │
//! │  │  Low Stock      │   │  Card           │   │  items_sold     │       │
//! │  │  Expired        │   │  UPI            │   │  low_stock      │       │
//! │  │  Out of Stock   │   └─────────────────┘   │  purchase_orders│       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status is Backend-Authoritative
//! `MedicineRecord.status` is computed by the backend from stock and expiry.
//! Nothing in this workspace re-derives it.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

/// Backend identifier of a medicine record.
pub type MedicineId = i64;

// =============================================================================
// Medicine Status
// =============================================================================

/// Stock status of a medicine, as assigned by the backend.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MedicineStatus {
    /// In stock and within expiry.
    #[default]
    Active,
    /// In stock but below the reorder threshold.
    #[serde(rename = "Low Stock")]
    LowStock,
    /// Past its expiry date.
    Expired,
    /// No units left.
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl MedicineStatus {
    /// All statuses in filter-menu order.
    pub const ALL: [MedicineStatus; 4] = [
        MedicineStatus::Active,
        MedicineStatus::LowStock,
        MedicineStatus::Expired,
        MedicineStatus::OutOfStock,
    ];

    /// Label used on the wire and in the UI.
    pub const fn label(&self) -> &'static str {
        match self {
            MedicineStatus::Active => "Active",
            MedicineStatus::LowStock => "Low Stock",
            MedicineStatus::Expired => "Expired",
            MedicineStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for MedicineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MedicineStatus {
    type Err = String;

    /// Accepts the wire label plus the usual command-line spellings
    /// (`low-stock`, `low_stock`, `out-of-stock`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "active" => Ok(MedicineStatus::Active),
            "lowstock" | "low" => Ok(MedicineStatus::LowStock),
            "expired" => Ok(MedicineStatus::Expired),
            "outofstock" | "out" => Ok(MedicineStatus::OutOfStock),
            _ => Err(format!(
                "Unknown status: '{}'. Valid options: Active, Low Stock, Expired, Out of Stock",
                s
            )),
        }
    }
}

/// The backend may send `"status": null`; the column default is Active.
fn status_or_default<'de, D>(deserializer: D) -> Result<MedicineStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<MedicineStatus>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Medicine Record
// =============================================================================

/// A medicine in the inventory catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineRecord {
    pub id: MedicineId,
    pub medicine_name: String,
    pub generic_name: String,
    #[serde(default)]
    pub category: String,
    pub batch_no: String,
    pub expiry_date: NaiveDate,
    /// Units in stock.
    pub quantity: u32,
    /// Purchase price per unit.
    pub cost_price: Money,
    /// Maximum retail price per unit (what the customer pays).
    pub mrp: Money,
    pub supplier: String,
    #[serde(default, deserialize_with = "status_or_default")]
    pub status: MedicineStatus,
}

impl MedicineRecord {
    /// Stock value at purchase price (`quantity × cost_price`).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.cost_price.multiply_quantity(self.quantity)
    }

    /// Whether this record may be offered as a sale candidate.
    ///
    /// Zero-stock and expired medicines are never sellable, whatever the
    /// search or filter state.
    #[inline]
    pub fn is_sellable(&self) -> bool {
        self.quantity > 0 && self.status != MedicineStatus::Expired
    }
}

// =============================================================================
// Medicine Input (create / update body)
// =============================================================================

/// Body of `POST /inventory/medicines` and `PUT /inventory/medicines/{id}`.
///
/// Status is absent on purpose: the backend assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineInput {
    pub medicine_name: String,
    pub generic_name: String,
    pub category: String,
    pub batch_no: String,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
    pub cost_price: Money,
    pub mrp: Money,
    pub supplier: String,
}

impl From<&MedicineRecord> for MedicineInput {
    fn from(record: &MedicineRecord) -> Self {
        MedicineInput {
            medicine_name: record.medicine_name.clone(),
            generic_name: record.generic_name.clone(),
            category: record.category.clone(),
            batch_no: record.batch_no.clone(),
            expiry_date: record.expiry_date,
            quantity: record.quantity,
            cost_price: record.cost_price,
            mrp: record.mrp,
            supplier: record.supplier.clone(),
        }
    }
}

// =============================================================================
// Medicine Form
// =============================================================================

/// Raw, unvalidated contents of the add/edit medicine form.
///
/// Every field is kept as typed by the user; [`crate::validation::validate_medicine_form`]
/// turns it into a [`MedicineInput`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineForm {
    pub medicine_name: String,
    pub generic_name: String,
    pub category: String,
    pub batch_no: String,
    /// `YYYY-MM-DD`
    pub expiry_date: String,
    pub quantity: String,
    pub cost_price: String,
    pub mrp: String,
    pub supplier: String,
}

impl From<&MedicineRecord> for MedicineForm {
    fn from(record: &MedicineRecord) -> Self {
        MedicineForm {
            medicine_name: record.medicine_name.clone(),
            generic_name: record.generic_name.clone(),
            category: record.category.clone(),
            batch_no: record.batch_no.clone(),
            expiry_date: record.expiry_date.format("%Y-%m-%d").to_string(),
            quantity: record.quantity.to_string(),
            cost_price: record.cost_price.to_string(),
            mrp: record.mrp.to_string(),
            supplier: record.supplier.clone(),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMethod {
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            other => Err(format!(
                "Unknown payment method: '{}'. Valid options: Cash, Card, UPI",
                other
            )),
        }
    }
}

// =============================================================================
// Sales
// =============================================================================

/// One line of a sale request. Only the id and quantity travel; the backend
/// re-reads price and stock itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItemRequest {
    pub medicine_id: MedicineId,
    pub quantity: u32,
}

/// Body of `POST /sales/create-sale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub invoice_no: String,
    pub customer_name: String,
    /// Total units across all lines.
    pub items_count: u64,
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub items: Vec<SaleItemRequest>,
}

/// A recorded sale as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleSummary {
    pub id: i64,
    pub invoice_no: String,
    pub customer_name: String,
    pub items_count: u64,
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub date: NaiveDateTime,
    pub status: String,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Today's figures, aggregated server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub todays_sales: Money,
    pub items_sold_today: u32,
    pub low_stock_items: u32,
    /// Inventory value at cost price.
    pub purchase_orders: Money,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
