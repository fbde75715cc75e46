//! # Engine Error Type
//!
//! Unified error type for engine operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bistro                                 │
//! │                                                                         │
//! │  UI controller               Engine                                     │
//! │  ─────────────               ──────                                     │
//! │                                                                         │
//! │  place_order()                                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session / service method                                        │  │
//! │  │  Result<T, EngineError>                                          │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage error? ─── DbError::QueryFailed("...") ──┐             │  │
//! │  │         │                                         │             │  │
//! │  │         ▼                                         ▼             │  │
//! │  │  Domain error? ──── CoreError::EmptyCart ──── EngineError ─────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The error serializes as { "code": "...", "message": "..." }, one      │
//! │  machine-readable code and one human-readable message.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout FIELD validation failures are not errors: they are
//! `Vec<FieldError>` data, rendered inline next to the form inputs.

use serde::Serialize;
use thiserror::Error;

use bistro_core::CoreError;
use bistro_db::DbError;

/// Error returned from engine operations.
///
/// ## Serialization
/// What a UI controller receives when an operation fails:
/// ```json
/// {
///   "code": "ORDER_NOT_FOUND",
///   "message": "Order not found: ORD1756300000000"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[error("{message}")]
pub struct EngineError {
    /// Machine-readable error code for programmatic handling.
    pub code: ErrorCode,

    /// Human-readable error message for display.
    pub message: String,
}

/// Error codes for engine responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Order record not found.
    OrderNotFound,

    /// Promo code not in the accepted set.
    InvalidPromoCode,

    /// Order placement attempted with an empty cart.
    EmptyCart,

    /// The checkout session already placed its order.
    AlreadySubmitted,

    /// Input validation failed.
    ValidationError,

    /// Storage operation failed.
    StorageError,

    /// Order placement was cancelled before it completed.
    Cancelled,

    /// Internal engine error.
    Internal,
}

impl EngineError {
    /// Creates a new engine error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        EngineError {
            code,
            message: message.into(),
        }
    }

    /// Order placement was cancelled.
    pub fn cancelled() -> Self {
        EngineError::new(ErrorCode::Cancelled, "Order placement was cancelled")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        EngineError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to engine errors.
impl From<DbError> for EngineError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => EngineError::new(
                ErrorCode::OrderNotFound,
                format!("{} not found: {}", entity, id),
            ),
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Storage operation failed: {}", other);
                EngineError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

/// Converts domain errors to engine errors.
impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        let code = match err {
            CoreError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            CoreError::UnknownPromoCode(_) => ErrorCode::InvalidPromoCode,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::AlreadySubmitted => ErrorCode::AlreadySubmitted,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        EngineError::new(code, message)
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================
