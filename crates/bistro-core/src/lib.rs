//! # bistro-core: Pure Business Logic for Bistro
//!
//! This crate is the **heart** of the Bistro ordering engine. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web UI Controllers (external)                  │   │
//! │  │    Menu page ──► Cart sidebar ──► Checkout wizard ──► Tracking │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bistro-engine                                │   │
//! │  │    CartStore, CheckoutSession, order tracking                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │ checkout  │  │   menu    │  │   │
//! │  │   │  pricing  │  │ LineItem  │  │  wizard   │  │  review   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TIMERS • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Pricing configuration and order totals
//! - [`cart`] - The cart and its line items
//! - [`checkout`] - Multi-step checkout state machine
//! - [`menu`] - Menu filtering, search and sorting
//! - [`review`] - Review validation and aggregation
//! - [`types`] - Shared domain types (order records, statuses)
//! - [`validation`] - Field validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::cart::{Cart, LineItem};
//! use bistro_core::pricing::PricingConfig;
//!
//! let mut cart = Cart::new();
//! cart.add(LineItem::new("margherita", "Pizza Margherita", 1500));
//!
//! // 15.00 subtotal, 10% tax, 2.99 delivery (below free threshold)
//! let totals = cart.totals(&PricingConfig::default());
//! assert_eq!(totals.total_cents, 1949);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod menu;
pub mod money;
pub mod pricing;
pub mod review;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bistro_core::Money` instead of
// `use bistro_core::money::Money`

pub use cart::{Cart, LineItem};
pub use checkout::{CheckoutFlow, CheckoutStep, FieldError};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{OrderTotals, PricingConfig};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item, enforced by the UI layer only.
///
/// ## Business Reason
/// The quantity stepper in the cart sidebar caps at 10 to prevent accidental
/// over-ordering. The cart itself does NOT enforce this: it is a presentation
/// rule, and programmatic callers (e.g. reorder) may exceed it.
pub const MAX_ITEM_QUANTITY: i64 = 10;

/// Maximum length of a review comment.
pub const MAX_COMMENT_LENGTH: usize = 1000;
