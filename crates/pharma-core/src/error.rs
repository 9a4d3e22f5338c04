//! # Error Types
//!
//! Domain-specific error types for pharma-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pharma-core errors (this file)                                        │
//! │  ├── CoreError        - Cart and business rule failures                │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  pharma-api errors (separate crate)                                    │
//! │  └── ClientError      - Transport failures and backend rejections      │
//! │                                                                         │
//! │  Dashboard errors (in app)                                             │
//! │  └── AppError         - What the user sees ({ code, message })         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ──┐                                 │
//! │                         ClientError ─┴──► AppError → terminal          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant here is recoverable by the user: the operation that
//! produced it left its state untouched.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Requested cart quantity is above the stock on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Add Paracetamol (in cart: 3, stock: 3)
    ///      │
    ///      ▼
    /// 3 + 1 > 3
    ///      │
    ///      ▼
    /// StockExceeded { medicine: "Paracetamol", available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// UI shows: "Cannot add more Paracetamol. Max available: 3"
    /// ```
    #[error("Cannot add more {medicine}. Max available: {available}")]
    StockExceeded {
        medicine: String,
        available: u32,
        requested: i64,
    },

    /// The cart total would no longer be an exact amount on the wire.
    #[error("Cart total is too large to record with more {medicine}")]
    AmountTooLarge { medicine: String },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything is handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or whitespace-only.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be greater than zero.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value could not be parsed (number, date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Selling price below purchase price.
    #[error("MRP must be greater than or equal to cost price")]
    PriceOrdering,

    /// Sale submitted with nothing in the cart.
    #[error("Please add at least one medicine to the cart")]
    EmptyCart,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_exceeded_message_names_medicine_and_max() {
        let err = CoreError::StockExceeded {
            medicine: "Paracetamol".to_string(),
            available: 3,
            requested: 4,
        };
        assert_eq!(
            err.to_string(),
            "Cannot add more Paracetamol. Max available: 3"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "Invoice number".to_string(),
        };
        assert_eq!(err.to_string(), "Invoice number is required");

        let err = ValidationError::MustBePositive {
            field: "MRP".to_string(),
        };
        assert_eq!(err.to_string(), "MRP must be greater than 0");

        assert_eq!(
            ValidationError::PriceOrdering.to_string(),
            "MRP must be greater than or equal to cost price"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::EmptyCart.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        // Wrapped message is shown as-is
        assert_eq!(
            core_err.to_string(),
            "Please add at least one medicine to the cart"
        );
    }
}
