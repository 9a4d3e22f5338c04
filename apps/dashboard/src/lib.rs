//! # pharma-dashboard: Command-Line Front End for the Pharmacy CRM
//!
//! Session state, one command per user action and table rendering. The
//! binary in `main.rs` only parses arguments and wires these together.
//!
//! ## Module Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dashboard Module Structure                           │
//! │                                                                         │
//! │  lib.rs (this file)                                                     │
//! │     │                                                                   │
//! │     ├── state/      ◄─── Session objects behind Arc<Mutex<T>>          │
//! │     │     ├── DashboardState  (stats, recent sales, last error)        │
//! │     │     ├── SaleState       (draft, cart, submission guard)          │
//! │     │     └── InventoryState  (catalog, filters, medicine form)        │
//! │     │                                                                   │
//! │     ├── commands/   ◄─── One async fn per user action                  │
//! │     │     ├── dashboard.rs                                             │
//! │     │     ├── sale.rs                                                  │
//! │     │     └── inventory.rs                                             │
//! │     │                                                                   │
//! │     ├── render.rs   ◄─── tabled output, currency formatting            │
//! │     │                                                                   │
//! │     └── error.rs    ◄─── AppError { code, message }                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,pharma=debug,reqwest=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so table output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages from every crate
/// - `RUST_LOG=pharma_api=trace` - Trace the backend client only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
