//! Error types for the Aruba Cloud client.

use thiserror::Error;

/// Result type alias for Aruba Cloud operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Aruba Cloud client.
#[derive(Error, Debug)]
pub enum Error {
    // ===== Transport Errors =====
    #[error("API error: {status} {status_text} - {message}")]
    Api {
        status: u16,
        status_text: String,
        message: String,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ===== Remote Errors =====
    /// The API answered with `Success: false`.
    #[error("{message}. Result code: {code}")]
    Remote { code: i64, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    // ===== Request Errors =====
    #[error("Invalid argument {field}: {message}")]
    Argument { field: String, message: String },

    #[error("Credentials not found: {0}")]
    CredentialsNotFound(String),

    // ===== Internal Errors =====
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Timeout: operation timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Cancelled: operation was cancelled")]
    Cancelled,
}

impl Error {
    /// Create an API error from HTTP response details.
    pub fn api(status: u16, status_text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            status_text: status_text.into(),
            message: message.into(),
        }
    }

    /// Create an error for a well-formed response reporting failure.
    pub fn remote(code: i64, message: impl Into<String>) -> Self {
        Self::Remote {
            code,
            message: message.into(),
        }
    }

    /// Create an argument validation error.
    pub fn argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Argument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a transport failure (network, HTTP status or decode).
    ///
    /// Waiters spend their failure budget on these and propagate
    /// everything else on first sight.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Api { .. } | Self::Http(_) | Self::Json(_) | Self::Timeout { .. }
        )
    }
}
