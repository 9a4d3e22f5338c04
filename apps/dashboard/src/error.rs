//! # App Error Type
//!
//! Unified error type for dashboard commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Dashboard                          │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<T, AppError>                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Cart rule broken? ──── CoreError::StockExceeded ───┐                   │
//! │         │                                           │                   │
//! │         ▼                                           ▼                   │
//! │  Form invalid? ──────── ValidationError ────────► AppError ──► stderr   │
//! │         │                                           ▲                   │
//! │         ▼                                           │                   │
//! │  Backend failed? ────── ClientError ────────────────┘                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ──────────────────────────────────────────────────► stdout    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error leaves the session state as it was before the command.

use pharma_api::ClientError;
use pharma_core::{CoreError, ValidationError};
use serde::Serialize;

/// Error returned from dashboard commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "STOCK_EXCEEDED",
///   "message": "Cannot add more Paracetamol. Max available: 3"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Cart quantity above the stock on hand
    StockExceeded,

    /// Missing or invalid form input
    ValidationError,

    /// Backend unreachable or request rejected
    TransportError,

    /// Record does not exist
    NotFound,

    /// Same action already in flight
    Busy,

    /// Unexpected failure
    Internal,
}

/// Result type for dashboard commands.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::NotFound, message)
    }

    /// A second trigger of an action that is still running.
    pub fn busy(action: &str) -> Self {
        AppError::new(
            ErrorCode::Busy,
            format!("{action} is already in progress, please wait"),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::StockExceeded { .. } => {
                AppError::new(ErrorCode::StockExceeded, err.to_string())
            }
            CoreError::AmountTooLarge { .. } => AppError::validation(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Terminal output failures.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Output error: {}", err);
        AppError::internal(format!("Could not write output: {err}"))
    }
}

/// Converts backend client errors to app errors.
///
/// A `detail` sent by the backend is shown verbatim.
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(detail) => AppError::not_found(detail),
            ClientError::Rejected { .. } => {
                AppError::new(ErrorCode::TransportError, err.to_string())
            }
            ClientError::Transport(ref e) => {
                tracing::error!("Backend request failed: {}", e);
                AppError::new(ErrorCode::TransportError, err.to_string())
            }
            ClientError::Decode(ref e) => {
                tracing::error!("Backend response could not be decoded: {}", e);
                AppError::new(
                    ErrorCode::TransportError,
                    "Unexpected response from the pharmacy backend",
                )
            }
            ClientError::InvalidConfig(_)
            | ClientError::ConfigLoadFailed(_)
            | ClientError::ConfigSaveFailed(_) => AppError::internal(err.to_string()),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_exceeded_keeps_message() {
        let err: AppError = CoreError::StockExceeded {
            medicine: "Paracetamol".into(),
            available: 3,
            requested: 4,
        }
        .into();

        assert_eq!(err.code, ErrorCode::StockExceeded);
        assert_eq!(err.message, "Cannot add more Paracetamol. Max available: 3");
    }

    #[test]
    fn test_validation_error_code() {
        let err: AppError = CoreError::Validation(ValidationError::EmptyCart).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_amount_too_large_is_validation() {
        let err: AppError = CoreError::AmountTooLarge {
            medicine: "Implant".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cart total is too large to record with more Implant");
    }

    #[test]
    fn test_backend_detail_surfaced_verbatim() {
        let err: AppError = ClientError::Rejected {
            status: 400,
            detail: Some("Invoice INV-7 already exists".into()),
        }
        .into();

        assert_eq!(err.code, ErrorCode::TransportError);
        assert_eq!(err.message, "Invoice INV-7 already exists");
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let err: AppError = ClientError::NotFound("Medicine not found".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_serializes_code_and_message() {
        let json = serde_json::to_string(&AppError::busy("Sale submission")).unwrap();
        assert_eq!(
            json,
            r#"{"code":"BUSY","message":"Sale submission is already in progress, please wait"}"#
        );
    }
}
