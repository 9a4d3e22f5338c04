//! # Sale Draft
//!
//! The contents of the open "New Sale" form: invoice number, customer,
//! payment method and the cart.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   open form ──► SaleDraft::new()                                        │
//! │                    │                                                    │
//! │                    │  edit fields / cart operations                     │
//! │                    ▼                                                    │
//! │              to_new_sale() ──── Err(Validation) ──► stay open, unchanged│
//! │                    │                                                    │
//! │                    │ Ok(NewSale)                                        │
//! │                    ▼                                                    │
//! │           POST /sales/create-sale                                       │
//! │                    │                                                    │
//! │          success ──┴──► reset()        failure ──► stay open, unchanged │
//! │                                                                         │
//! │   cancel ──► reset()                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{CoreResult, ValidationError};
use crate::types::{NewSale, PaymentMethod};
use crate::validation::validate_required;

/// An unsubmitted sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub invoice_no: String,
    pub customer_name: String,
    pub payment_method: PaymentMethod,
    pub cart: Cart,
}

impl SaleDraft {
    /// Creates an empty draft with the default payment method (Cash).
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards everything entered so far.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validates the draft and builds the create-sale request body.
    ///
    /// ## Rules
    /// - Invoice number present (not whitespace-only)
    /// - Customer name present (not whitespace-only)
    /// - At least one cart line
    ///
    /// Does not touch the draft; the caller resets it once the backend
    /// accepts the sale.
    pub fn to_new_sale(&self) -> CoreResult<NewSale> {
        let invoice_no = validate_required("Invoice number", &self.invoice_no)?;
        let customer_name = validate_required("Customer name", &self.customer_name)?;

        if self.cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        Ok(NewSale {
            invoice_no,
            customer_name,
            items_count: self.cart.total_item_count(),
            total_amount: self.cart.total_amount(),
            payment_method: self.payment_method,
            items: self.cart.sale_items(),
        })
    }
}
