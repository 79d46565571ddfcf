//! # API Error Type
//!
//! Unified error type for counter commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Command Function ── Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── ValidationError (bad discount, bad row) ──┐                 │
//! │         │                                             ▼                 │
//! │         ├── CoreError (empty bill, unknown item) ── ApiError ──► screen │
//! │         │                                                               │
//! │         └── Success ─────────────────────────────────────────► screen   │
//! │                                                                         │
//! │  NOTE: a rejected "add to bill" is NOT an ApiError; the response       │
//! │  carries the reason and the row stays on screen.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cellshop_core::{CoreError, ValidationError};
use serde::Serialize;

/// API error returned from commands.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Bill item not found: IMEI-356938035643809"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => ApiError::not_found("Bill item", &id),
            CoreError::EmptyBill => ApiError::validation("Bill has no items"),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
