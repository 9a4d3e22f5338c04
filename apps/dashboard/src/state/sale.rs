//! # Sale Session
//!
//! State of the "New Sale" form: the draft, the catalog snapshot it is
//! checked against, and the submission guard.
//!
//! ## Submission Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  open() ─► generation = N, draft empty                                  │
//! │                                                                         │
//! │  begin_submit() ─► validate draft                                       │
//! │       │            in_flight = Some(N)        (2nd call → Busy)         │
//! │       │            returns SubmitTicket { N } + NewSale                 │
//! │       ▼                                                                 │
//! │  ... POST /sales/create-sale (lock NOT held) ...                        │
//! │       │                                                                 │
//! │       │   cancel() meanwhile ─► generation = N+1, in_flight = None      │
//! │       ▼                                                                 │
//! │  finish_submit(ticket, ok)                                              │
//! │       ├── ticket.N != generation ──► Stale   (state untouched)          │
//! │       ├── ok    ──► draft cleared, form closed, generation + 1          │
//! │       └── error ──► draft kept, in_flight = None                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pharma_core::inventory::sellable_candidates;
use pharma_core::{Cart, MedicineId, MedicineRecord, NewSale, PaymentMethod, SaleDraft};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

/// Proof that a submission was started for a particular draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
}

/// What `finish_submit` did with a backend response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The response belonged to the current draft and was applied.
    Applied,
    /// The draft was cancelled or replaced while the request was in flight.
    Stale,
}

#[derive(Debug, Default)]
pub struct SaleSession {
    draft: SaleDraft,
    catalog: Vec<MedicineRecord>,
    open: bool,
    generation: u64,
    in_flight: Option<u64>,
}

impl SaleSession {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens a fresh sale form, discarding any previous draft.
    pub fn open(&mut self) {
        self.draft.reset();
        self.generation += 1;
        self.in_flight = None;
        self.open = true;
        debug!(generation = self.generation, "Sale form opened");
    }

    /// Closes the form and discards the draft. A response still in flight
    /// for it will come back stale.
    pub fn cancel(&mut self) {
        self.draft.reset();
        self.generation += 1;
        self.in_flight = None;
        self.open = false;
        debug!(generation = self.generation, "Sale form cancelled");
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Replaces the catalog snapshot used for candidates and stock checks.
    pub fn set_catalog(&mut self, catalog: Vec<MedicineRecord>) {
        self.catalog = catalog;
    }

    pub fn catalog(&self) -> &[MedicineRecord] {
        &self.catalog
    }

    /// Medicines that may be offered for `search`.
    pub fn candidates(&self, search: &str) -> Vec<&MedicineRecord> {
        sellable_candidates(&self.catalog, search)
    }

    // =========================================================================
    // Draft Editing
    // =========================================================================

    pub fn draft(&self) -> &SaleDraft {
        &self.draft
    }

    pub fn cart(&self) -> &Cart {
        &self.draft.cart
    }

    pub fn set_details(
        &mut self,
        invoice_no: &str,
        customer_name: &str,
        payment_method: PaymentMethod,
    ) -> AppResult<()> {
        self.ensure_editable()?;
        self.draft.invoice_no = invoice_no.to_string();
        self.draft.customer_name = customer_name.to_string();
        self.draft.payment_method = payment_method;
        Ok(())
    }

    /// Adds one unit of a catalog medicine to the cart.
    pub fn add(&mut self, medicine_id: MedicineId) -> AppResult<u32> {
        self.ensure_editable()?;

        let medicine = self
            .catalog
            .iter()
            .find(|m| m.id == medicine_id)
            .ok_or_else(|| AppError::not_found(format!("Medicine #{medicine_id} not found")))?;

        if !medicine.is_sellable() && medicine.quantity > 0 {
            return Err(AppError::validation(format!(
                "{} is {} and cannot be sold",
                medicine.medicine_name, medicine.status
            )));
        }

        Ok(self.draft.cart.add(medicine)?)
    }

    /// Sets a line's quantity, checked against the current catalog snapshot.
    pub fn set_quantity(&mut self, medicine_id: MedicineId, quantity: i64) -> AppResult<()> {
        self.ensure_editable()?;
        self.draft
            .cart
            .set_quantity(medicine_id, quantity, &self.catalog)?;
        Ok(())
    }

    pub fn remove(&mut self, medicine_id: MedicineId) -> AppResult<bool> {
        self.ensure_editable()?;
        Ok(self.draft.cart.remove(medicine_id))
    }

    fn ensure_editable(&self) -> AppResult<()> {
        if !self.open {
            return Err(AppError::validation("Open a new sale first"));
        }
        if self.is_busy() {
            return Err(AppError::busy("Sale submission"));
        }
        Ok(())
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Validates the draft and marks the session busy.
    ///
    /// Nothing changes if validation fails.
    pub fn begin_submit(&mut self) -> AppResult<(SubmitTicket, NewSale)> {
        self.ensure_editable()?;

        let sale = self.draft.to_new_sale()?;
        self.in_flight = Some(self.generation);

        Ok((
            SubmitTicket {
                generation: self.generation,
            },
            sale,
        ))
    }

    /// Applies the backend's answer to a submission started by `begin_submit`.
    pub fn finish_submit(&mut self, ticket: SubmitTicket, succeeded: bool) -> SubmitOutcome {
        if ticket.generation != self.generation || self.in_flight != Some(ticket.generation) {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "Ignoring response for a discarded sale"
            );
            return SubmitOutcome::Stale;
        }

        self.in_flight = None;
        if succeeded {
            self.draft.reset();
            self.open = false;
            self.generation += 1;
        }
        SubmitOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use pharma_core::{MedicineStatus, Money};

    fn medicine(id: MedicineId, quantity: u32, status: MedicineStatus) -> MedicineRecord {
        MedicineRecord {
            id,
            medicine_name: format!("Medicine {id}"),
            generic_name: "Generic".to_string(),
            category: String::new(),
            batch_no: format!("B{id}"),
            expiry_date: NaiveDate::from_ymd_opt(2029, 1, 1).unwrap(),
            quantity,
            cost_price: Money::from_cents(100),
            mrp: Money::from_cents(250),
            supplier: "Supplier".to_string(),
            status,
        }
    }

    fn open_session() -> SaleSession {
        let mut session = SaleSession::new();
        session.set_catalog(vec![
            medicine(1, 10, MedicineStatus::Active),
            medicine(2, 5, MedicineStatus::Expired),
            medicine(3, 0, MedicineStatus::OutOfStock),
        ]);
        session.open();
        session
            .set_details("INV-1", "Asha", PaymentMethod::Card)
            .unwrap();
        session
    }

    #[test]
    fn test_edits_require_open_form() {
        let mut session = SaleSession::new();
        session.set_catalog(vec![medicine(1, 10, MedicineStatus::Active)]);

        let err = session.add(1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_add_rejects_expired_and_zero_stock() {
        let mut session = open_session();

        assert_eq!(session.add(2).unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(session.add(3).unwrap_err().code, ErrorCode::StockExceeded);
        assert_eq!(session.add(99).unwrap_err().code, ErrorCode::NotFound);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_candidates_skip_unsellable() {
        let session = open_session();
        let ids: Vec<_> = session.candidates("medicine").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_second_submit_is_busy() {
        let mut session = open_session();
        session.add(1).unwrap();

        let (_ticket, sale) = session.begin_submit().unwrap();
        assert_eq!(sale.items_count, 1);
        assert!(session.is_busy());

        assert_eq!(session.begin_submit().unwrap_err().code, ErrorCode::Busy);
        assert_eq!(session.add(1).unwrap_err().code, ErrorCode::Busy);
    }

    #[test]
    fn test_invalid_draft_does_not_mark_busy() {
        let mut session = open_session();
        // empty cart
        assert_eq!(
            session.begin_submit().unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert!(!session.is_busy());
    }

    #[test]
    fn test_success_clears_and_closes() {
        let mut session = open_session();
        session.add(1).unwrap();
        let (ticket, _) = session.begin_submit().unwrap();

        assert_eq!(session.finish_submit(ticket, true), SubmitOutcome::Applied);
        assert!(!session.is_open());
        assert!(!session.is_busy());
        assert!(session.cart().is_empty());
        assert_eq!(session.draft().invoice_no, "");
    }

    #[test]
    fn test_failure_keeps_draft() {
        let mut session = open_session();
        session.add(1).unwrap();
        session.add(1).unwrap();
        let (ticket, _) = session.begin_submit().unwrap();

        assert_eq!(session.finish_submit(ticket, false), SubmitOutcome::Applied);
        assert!(session.is_open());
        assert!(!session.is_busy());
        assert_eq!(session.cart().quantity_of(1), 2);
        assert_eq!(session.draft().invoice_no, "INV-1");
    }

    #[test]
    fn test_late_response_after_cancel_is_stale() {
        let mut session = open_session();
        session.add(1).unwrap();
        let (ticket, _) = session.begin_submit().unwrap();

        session.cancel();
        session.open();
        session.add(1).unwrap();

        assert_eq!(session.finish_submit(ticket, true), SubmitOutcome::Stale);
        // The new draft is untouched
        assert!(session.is_open());
        assert_eq!(session.cart().quantity_of(1), 1);
    }
}
