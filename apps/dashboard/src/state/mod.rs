//! # State Module
//!
//! Session state for the three dashboard views.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  DashboardState  │  │    SaleState     │  │   InventoryState     │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  stats           │  │  SaleDraft       │  │  catalog             │  │
//! │  │  recent sales    │  │  catalog         │  │  search + statuses   │  │
//! │  │  last error      │  │  busy/generation │  │  medicine form       │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  Each is Shared<T> = Arc<Mutex<T>>. The lock is held only for the      │
//! │  synchronous part of a command, never across a backend call.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod dashboard;
mod inventory;
mod sale;

use std::sync::{Arc, Mutex, PoisonError};

pub use dashboard::DashboardSession;
pub use inventory::{InventorySession, MedicineFormState, PendingSave};
pub use sale::{SaleSession, SubmitOutcome, SubmitTicket};

/// Session state shared between the commands of one view.
#[derive(Debug, Default)]
pub struct Shared<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = sale_state.with(|s| CartTotals::from(s.cart()));
    /// ```
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Executes a function with write access to the session.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub type DashboardState = Shared<DashboardSession>;
pub type SaleState = Shared<SaleSession>;
pub type InventoryState = Shared<InventorySession>;
