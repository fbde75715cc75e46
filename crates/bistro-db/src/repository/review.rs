//! # Review Repository
//!
//! Database operations for customer reviews.
//!
//! Aggregation happens in bistro-core ([`ReviewSummary::from_reviews`]); this
//! repository only fetches rows. Review volume per item is small, so pulling
//! the rows and folding in memory keeps the math in one place.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bistro_core::review::{Review, ReviewSummary};

/// Repository for review database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.reviews();
///
/// repo.insert(&review).await?;
/// let reviews = repo.list_for_item("margherita").await?;
/// let summary = repo.summary_for_item("margherita").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    /// Creates a new ReviewRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReviewRepository { pool }
    }

    /// Inserts a review.
    ///
    /// The review is validated at construction ([`Review::new`]); the CHECK
    /// constraint on `rating` is only a last line of defense.
    pub async fn insert(&self, review: &Review) -> DbResult<()> {
        debug!(id = %review.id, item_id = %review.item_id, "Inserting review");

        sqlx::query(
            r#"
            INSERT INTO reviews (id, item_id, author, rating, comment, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&review.id)
        .bind(&review.item_id)
        .bind(&review.author)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all reviews for a menu item, newest first.
    pub async fn list_for_item(&self, item_id: &str) -> DbResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, item_id, author, rating, comment, created_at
            FROM reviews
            WHERE item_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Aggregate rating stats for a menu item.
    pub async fn summary_for_item(&self, item_id: &str) -> DbResult<ReviewSummary> {
        let reviews = self.list_for_item(item_id).await?;
        Ok(ReviewSummary::from_reviews(&reviews))
    }

    /// Total number of reviews across all items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
