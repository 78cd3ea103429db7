//! # App Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally                                  │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  AppResult<Snapshot>                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Store failed? ───── DbError::QueryFailed("...") ─────┐                │
//! │         │                                             │                │
//! │         ▼                                             ▼                │
//! │  Rate out of range? ── ValidationError::OutOfRange ── AppError ──────► │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ────────────────────────────────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keypad, entry and meal-log logic never fails; only storage and rate
//! validation reach this type.

use serde::Serialize;
use tally_core::ValidationError;
use tally_db::DbError;
use thiserror::Error;

/// Error returned from commands.
///
/// ## Serialization
/// What the display layer receives when a command fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "SST rate must be between 0 and 100"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Store operation failed
    DatabaseError,

    /// Internal error
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts persistence errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::CorruptPersistedState { key, reason } => {
                tracing::error!(key = %key, "Corrupt persisted state: {}", reason);
                AppError::new(
                    ErrorCode::DatabaseError,
                    format!("Stored data under '{}' is unreadable", key),
                )
            }
            DbError::Serialization(e) => {
                tracing::error!("Serialization failed: {}", e);
                AppError::internal("Could not encode calculator state")
            }
            DbError::ConnectionFailed(_) => {
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Result type for commands.
pub type AppResult<T> = Result<T, AppError>;
