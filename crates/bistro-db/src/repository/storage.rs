//! # Storage Repository
//!
//! Key/value JSON document storage.
//!
//! ## Document Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      storage table                                      │
//! │                                                                         │
//! │  key                      │ value (JSON)            │ updated_at       │
//! │  ─────────────────────────┼─────────────────────────┼────────────────  │
//! │  cart                     │ {"items":[...]}         │ 2026-08-27T...   │
//! │  order_ORD1756300000000   │ {"order_number":...}    │ 2026-08-27T...   │
//! │  order_ORD1756310000000   │ {"order_number":...}    │ 2026-08-27T...   │
//! │                                                                         │
//! │  One well-known key for the live cart, one key per placed order.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Well-known key holding the live cart document.
pub const CART_KEY: &str = "cart";

/// Prefix under which order records are stored.
pub const ORDER_KEY_PREFIX: &str = "order_";

/// Storage key for a placed order.
pub fn order_key(order_number: &str) -> String {
    format!("{ORDER_KEY_PREFIX}{order_number}")
}

/// Repository for key/value document operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.storage();
///
/// repo.put_json(CART_KEY, &cart).await?;
/// let cart: Option<Cart> = repo.get_json(CART_KEY).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    /// Creates a new StorageRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }

    /// Reads the raw value under a key, `None` when absent.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM storage WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    /// Writes a raw value under a key, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, "Writing storage document");

        sqlx::query(
            r#"
            INSERT INTO storage (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes the value under a key. No-op when absent.
    pub async fn delete(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Reads and deserializes the JSON document under a key.
    ///
    /// Absent key is `Ok(None)`; a present but corrupt document is an error,
    /// which callers may treat as absent (the cart store does).
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serializes and writes a JSON document under a key.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value)?;
        self.put(key, &raw).await
    }

    /// Lists all keys starting with a prefix, newest first.
    ///
    /// `_` and `%` in the prefix are escaped so `order_` matches literally.
    pub async fn keys_with_prefix(&self, prefix: &str) -> DbResult<Vec<String>> {
        let escaped = prefix
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("{escaped}%");

        let keys: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT key FROM storage
            WHERE key LIKE ? ESCAPE '\'
            ORDER BY updated_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use bistro_core::cart::{Cart, LineItem};

    async fn repo() -> StorageRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().storage()
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let repo = repo().await;

        assert!(repo.get("cart").await.unwrap().is_none());

        repo.put("cart", "{}").await.unwrap();
        assert_eq!(repo.get("cart").await.unwrap().as_deref(), Some("{}"));

        // Overwrite
        repo.put("cart", r#"{"items":[]}"#).await.unwrap();
        assert_eq!(
            repo.get("cart").await.unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );

        repo.delete("cart").await.unwrap();
        assert!(repo.get("cart").await.unwrap().is_none());

        // Deleting an absent key is fine
        repo.delete("cart").await.unwrap();
    }

    #[tokio::test]
    async fn test_json_round_trip() {
        let repo = repo().await;

        let mut cart = Cart::new();
        cart.add(LineItem::new("margherita", "Pizza Margherita", 1500));

        repo.put_json(CART_KEY, &cart).await.unwrap();
        let restored: Option<Cart> = repo.get_json(CART_KEY).await.unwrap();
        assert_eq!(restored, Some(cart));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let repo = repo().await;

        repo.put(CART_KEY, "not json at all").await.unwrap();
        let result: DbResult<Option<Cart>> = repo.get_json(CART_KEY).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_keys_with_prefix_matches_literally() {
        let repo = repo().await;

        repo.put("order_ORD1", "{}").await.unwrap();
        repo.put("order_ORD2", "{}").await.unwrap();
        // Would match "order_" under naive LIKE since _ is a wildcard
        repo.put("orderXORD3", "{}").await.unwrap();
        repo.put("cart", "{}").await.unwrap();

        let keys = repo.keys_with_prefix(ORDER_KEY_PREFIX).await.unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.iter().all(|k| k.starts_with("order_")));
    }

    #[test]
    fn test_order_key_format() {
        assert_eq!(order_key("ORD1756300000000"), "order_ORD1756300000000");
    }
}
