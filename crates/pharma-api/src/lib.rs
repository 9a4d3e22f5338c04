//! # pharma-api: Pharmacy Backend Client
//!
//! Everything that crosses the network lives here. The dashboard talks to
//! the backend only through the [`PharmacyBackend`] trait.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  pharma-dashboard command                                               │
//! │        │                                                                │
//! │        │ &dyn PharmacyBackend                                           │
//! │        ▼                                                                │
//! │  ┌──────────────┐   reqwest    ┌──────────────────────────────────┐    │
//! │  │ HttpBackend  │ ───────────► │ backend service  /api/...        │    │
//! │  │              │ ◄─────────── │ JSON bodies, {"detail"} errors   │    │
//! │  └──────────────┘              └──────────────────────────────────┘    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  pharma-core types (MedicineRecord, SaleSummary, ...) or ClientError    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`backend`] - The `PharmacyBackend` trait and its generated mock
//! - [`http`] - `reqwest` implementation
//! - [`config`] - Base URL, timeouts and display settings
//! - [`error`] - `ClientError`

pub mod backend;
pub mod config;
pub mod error;
pub mod http;

pub use backend::{CatalogQuery, MockPharmacyBackend, PharmacyBackend};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;
