//! # bistro-db: Storage Layer for Bistro
//!
//! This crate provides persistence for the Bistro ordering engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Data Flow                                 │
//! │                                                                         │
//! │  Engine call (CartStore::add, OrderService::place_order, ...)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bistro-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (storage.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ StorageRepo   │    │ 001_storage  │  │   │
//! │  │   │ Connection    │◄───│ ReviewRepo    │    │ 002_reviews  │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Key/Value Model
//!
//! The cart and each placed order are stored as whole JSON documents under
//! string keys (`cart`, `order_{number}`), mirroring the document-per-key
//! model the web frontend persists into. Reviews get a proper relational
//! table because they are queried per item and aggregated.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_db::{Database, DbConfig};
//! use bistro_db::repository::storage::CART_KEY;
//!
//! let db = Database::new(DbConfig::new("path/to/bistro.db")).await?;
//!
//! let cart: Option<Cart> = db.storage().get_json(CART_KEY).await?;
//! let reviews = db.reviews().list_for_item("margherita").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::review::ReviewRepository;
pub use repository::storage::{order_key, StorageRepository, CART_KEY, ORDER_KEY_PREFIX};
