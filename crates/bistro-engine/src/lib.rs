//! # bistro-engine: Stateful Ordering Engine for Bistro
//!
//! This crate wires the pure logic (bistro-core) and storage (bistro-db)
//! into the stateful services a UI layer drives.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web UI Controllers (external)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-engine (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐  ┌─────────────────┐  ┌──────────────────┐  │   │
//! │  │   │  CartStore  │  │ CheckoutSession │  │ tracking::start  │  │   │
//! │  │   │  persist +  │  │ wizard + delayed│  │ random forward-  │  │   │
//! │  │   │  notify     │  │ placement task  │  │ only progress    │  │   │
//! │  │   └──────┬──────┘  └────────┬────────┘  └────────┬─────────┘  │   │
//! │  │          └──────────────────┼────────────────────┘            │   │
//! │  └─────────────────────────────┼─────────────────────────────────┘   │
//! │                                │                                        │
//! │          bistro-core (math) ───┴─── bistro-db (SQLite)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bistro_db::{Database, DbConfig};
//! use bistro_engine::{CartStore, CheckoutSession, EngineConfig};
//!
//! let config = EngineConfig::from_env();
//! let db = Database::new(DbConfig::new("bistro.db")).await?;
//! let cart = Arc::new(CartStore::load(db.clone(), config.pricing).await);
//!
//! cart.add_item(item).await;
//!
//! let session = CheckoutSession::new(db.clone(), cart.clone(), config.clone());
//! let record = session.place_order()?.wait().await?;
//!
//! let tracking = bistro_engine::tracking::start(db, &record.order_number, &config).await?;
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod checkout;
pub mod config;
pub mod error;
pub mod tracking;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_store::{CartSnapshot, CartStore, Subscription};
pub use checkout::{list_order_numbers, load_order, CheckoutSession, PlacementHandle};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult, ErrorCode};
pub use tracking::TrackingHandle;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bistro=trace` - Show trace for bistro crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bistro=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}
