//! # pharma-core: Pure Business Logic for the Pharmacy Dashboard
//!
//! This crate holds every rule the dashboard enforces on its own, as plain
//! functions and in-memory types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pharmacy Dashboard Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pharma-dashboard (CLI)                       │   │
//! │  │    Dashboard ──► New Sale (cart) ──► Inventory (search/filter)  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pharma-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ inventory │  │   │
//! │  │   │ Medicine  │  │   Money   │  │   Cart    │  │  filter   │  │   │
//! │  │   │   Sale    │  │  (paise)  │  │ SaleDraft │  │  stats    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                pharma-api (Backend HTTP client)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (MedicineRecord, SaleSummary, NewSale, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Sale cart with per-item stock ceilings
//! - [`sale`] - Sale draft and submission validation
//! - [`inventory`] - Catalog search, status filters and statistics
//! - [`validation`] - Form validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pharma_core::cart::Cart;
//! use pharma_core::money::Money;
//! use pharma_core::types::{MedicineRecord, MedicineStatus};
//!
//! let paracetamol = MedicineRecord {
//!     id: 1,
//!     medicine_name: "Paracetamol".to_string(),
//!     generic_name: "Acetaminophen".to_string(),
//!     category: "Analgesic".to_string(),
//!     batch_no: "B-001".to_string(),
//!     expiry_date: chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
//!     quantity: 10,
//!     cost_price: Money::from_cents(300),
//!     mrp: Money::from_cents(500),
//!     supplier: "MedSupply".to_string(),
//!     status: MedicineStatus::Active,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(&paracetamol).unwrap();
//! cart.add(&paracetamol).unwrap();
//!
//! assert_eq!(cart.total_item_count(), 2);
//! assert_eq!(cart.total_amount(), Money::from_cents(1000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod inventory;
pub mod money;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{InventoryStats, StatusCounts, StatusFilter};
pub use money::Money;
pub use sale::SaleDraft;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a catalog search term.
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Maximum length of free-text form fields (names, batch, supplier).
pub const MAX_TEXT_FIELD_LENGTH: usize = 200;
