//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bistro-db errors (separate crate)                                     │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  bistro-engine errors (separate crate)                                 │
//! │  └── EngineError      - What UI controllers see (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → EngineError → UI        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, order number, etc.)
//! 3. Errors are enum variants, never String
//!
//! Note that cart mutations deliberately have NO error path: a missing line
//! is a no-op, never an error. Checkout field validation failures are data
//! (`Vec<FieldError>`), surfaced inline, and only become errors at the
//! engine boundary.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order record cannot be found.
    ///
    /// ## When This Occurs
    /// - Tracking an order number that was never placed
    /// - The order record was cleared from storage
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Promo code is not in the accepted set.
    #[error("Unknown promo code: {0}")]
    UnknownPromoCode(String),

    /// Order placement was attempted with an empty cart.
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,

    /// The checkout flow already reached its terminal state.
    ///
    /// ## When This Occurs
    /// - `place_order` called twice on the same session
    /// - Navigation attempted after submission
    #[error("Order has already been submitted")]
    AlreadySubmitted,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, card number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
