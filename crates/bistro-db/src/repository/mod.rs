//! # Repository Module
//!
//! Database repository implementations for Bistro.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Engine call                                                            │
//! │       │                                                                 │
//! │       │  db.storage().put_json(CART_KEY, &cart)                        │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  StorageRepository                                                      │
//! │  ├── get / put / delete (raw strings)                                   │
//! │  ├── get_json / put_json (typed documents)                              │
//! │  └── keys_with_prefix                                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                        │
//! │  • Easy to test against an in-memory database                          │
//! │  • Clean separation of concerns                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`storage::StorageRepository`] - Key/value JSON documents (cart, orders)
//! - [`review::ReviewRepository`] - Customer reviews

pub mod review;
pub mod storage;
