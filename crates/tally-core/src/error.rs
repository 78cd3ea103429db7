//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  └── ValidationError  - Rejected user input (tax rates)                │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  └── DbError          - Store failures, corrupt persisted blobs        │
//! │                                                                         │
//! │  tally-app errors                                                      │
//! │  └── AppError         - What the display layer sees (serialized)       │
//! │                                                                         │
//! │  Flow: ValidationError / DbError → AppError → Display layer            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Most calculator input never errors: an unparseable entry is worth zero
//! and an invalid keypad press is ignored. Errors are reserved for input
//! that has no sensible fallback.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a rate that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
