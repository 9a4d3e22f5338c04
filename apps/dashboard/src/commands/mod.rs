//! # Commands Module
//!
//! One function per user action. Each runs the action end to end: lock the
//! session, check and mutate, release, call the backend, lock again to apply
//! the result.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── dashboard.rs  ◄─── Stats cards, recent sales, health
//! ├── sale.rs       ◄─── New Sale form: cart and submission
//! └── inventory.rs  ◄─── Catalog view, add/edit/delete medicine
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  main.rs (clap)                                                         │
//! │      │                                                                  │
//! │      │  commands::sale::submit_sale(&backend, &sale_state, page_size)   │
//! │      ▼                                                                  │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │  state.with_mut(|s| s.begin_submit())    (lock, validate)     │     │
//! │  │          │                                                    │     │
//! │  │          ▼                                                    │     │
//! │  │  backend.create_sale(&sale).await        (no lock held)       │     │
//! │  │          │                                                    │     │
//! │  │          ▼                                                    │     │
//! │  │  state.with_mut(|s| s.finish_submit(..)) (lock, apply)        │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Result<SaleSummary, AppError> ──► render.rs / stderr                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take `&dyn PharmacyBackend`, so tests drive them with
//! `MockPharmacyBackend`.

pub mod dashboard;
pub mod inventory;
pub mod sale;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, NaiveDateTime};
    use pharma_core::{
        MedicineId, MedicineRecord, MedicineStatus, Money, PaymentMethod, SaleSummary,
    };

    pub fn medicine(id: MedicineId, name: &str, quantity: u32, mrp_cents: i64) -> MedicineRecord {
        MedicineRecord {
            id,
            medicine_name: name.to_string(),
            generic_name: format!("{name} generic"),
            category: "General".to_string(),
            batch_no: format!("B{id}"),
            expiry_date: NaiveDate::from_ymd_opt(2028, 12, 31).unwrap(),
            quantity,
            cost_price: Money::from_cents(mrp_cents / 2),
            mrp: Money::from_cents(mrp_cents),
            supplier: "MedSupply".to_string(),
            status: if quantity == 0 {
                MedicineStatus::OutOfStock
            } else {
                MedicineStatus::Active
            },
        }
    }

    pub fn sale_summary(invoice_no: &str, total_cents: i64, items_count: u64) -> SaleSummary {
        SaleSummary {
            id: 1,
            invoice_no: invoice_no.to_string(),
            customer_name: "Walk-in".to_string(),
            items_count,
            total_amount: Money::from_cents(total_cents),
            payment_method: PaymentMethod::Cash,
            date: NaiveDateTime::parse_from_str("2025-01-15 10:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            status: "Completed".to_string(),
        }
    }
}
