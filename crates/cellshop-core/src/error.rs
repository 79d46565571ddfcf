//! # Error Types
//!
//! Domain-specific error types for cellshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cellshop-core errors (this file)                                      │
//! │  ├── CoreError        - Draft bill operations that cannot proceed      │
//! │  └── ValidationError  - A line item that may not enter a bill          │
//! │                                                                         │
//! │  counter app errors (separate crate)                                   │
//! │  └── ApiError         - What the billing screen sees (serialized)      │
//! │                                                                         │
//! │  NOTE: the computation engine itself has NO error type. Bad numbers    │
//! │  are coerced to zero before they reach it.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Draft bill errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No committed line has the given identifier.
    #[error("Bill item not found: {0}")]
    ItemNotFound(String),

    /// Checkout or finalization was requested with nothing committed.
    #[error("Bill has no items")]
    EmptyBill,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Line item validation errors.
///
/// Returned when a pending row is promoted into the committed list. The
/// pending row itself is left untouched so the operator can correct it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
