//! # Client Error Types
//!
//! Error types for calls to the pharmacy backend.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Backend             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Rejected {status,      │ │
//! │  │  ConfigLoad     │  │  (connect,      │  │           detail}       │ │
//! │  │  ConfigSave     │  │   timeout)      │  │  NotFound               │ │
//! │  │                 │  │                 │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for backend calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything that can go wrong talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never got a response (connection refused, timeout, TLS).
    #[error("Could not reach the pharmacy backend: {0}")]
    Transport(#[from] reqwest::Error),

    // =========================================================================
    // Backend Errors
    // =========================================================================
    /// The backend answered with a non-2xx status.
    ///
    /// `detail` is the `detail` field of the error body when there was one.
    #[error("{}", rejected_message(.status, .detail))]
    Rejected { status: u16, detail: Option<String> },

    /// The requested record does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// The response body did not match the expected shape.
    #[error("Unexpected response from backend: {0}")]
    Decode(String),
}

fn rejected_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Backend rejected the request (HTTP {status})"),
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidConfig(format!("invalid base_url: {err}"))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if sending the same request again may succeed.
    ///
    /// Transport failures and 5xx responses are retryable; validation
    /// rejections (4xx) and config problems are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// The human-readable reason supplied by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { detail, .. } => detail.as_deref(),
            ClientError::NotFound(detail) => Some(detail),
            _ => None,
        }
    }
}
