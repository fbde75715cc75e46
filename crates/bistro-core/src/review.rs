//! # Review Module
//!
//! Customer reviews: validation on the way in, aggregation on the way out.
//!
//! The average rating is kept in TENTHS (43 = 4.3 stars) so aggregation stays
//! in integer math end to end, same as the money pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::validation;

// =============================================================================
// Review
// =============================================================================

/// A single customer review of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Review {
    /// UUID, stored as text.
    pub id: String,
    pub item_id: String,
    pub author: String,
    /// Whole stars, 1-5.
    pub rating: i64,
    /// Free text; may be empty for a rating-only review.
    pub comment: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Creates a validated review with a fresh id and the current timestamp.
    pub fn new(
        item_id: impl Into<String>,
        author: impl Into<String>,
        rating: i64,
        comment: impl Into<String>,
    ) -> CoreResult<Self> {
        let author = author.into();
        let comment = comment.into();

        validation::validate_required("author", &author)?;
        validation::validate_rating(rating)?;
        validation::validate_comment(&comment)?;

        Ok(Review {
            id: Uuid::new_v4().to_string(),
            item_id: item_id.into(),
            author: author.trim().to_string(),
            rating,
            comment: comment.trim().to_string(),
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Review Summary
// =============================================================================

/// Aggregate rating stats for one menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub count: i64,
    /// Average rating in tenths (43 = 4.3 stars); 0 when there are none.
    pub average_x10: i64,
    /// Reviews per star value, index 0 = one star.
    pub distribution: [i64; 5],
}

impl ReviewSummary {
    /// Aggregates a set of reviews.
    ///
    /// Ratings outside 1-5 cannot exist (construction validates them), so the
    /// histogram indexing is safe.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return ReviewSummary::default();
        }

        let count = reviews.len() as i64;
        let mut distribution = [0i64; 5];
        let mut sum = 0i64;
        for review in reviews {
            sum += review.rating;
            distribution[(review.rating - 1) as usize] += 1;
        }

        // Round-half-up average in tenths
        let average_x10 = (sum * 10 + count / 2) / count;

        ReviewSummary {
            count,
            average_x10,
            distribution,
        }
    }

    /// Average as whole stars and a tenth, for display ("4.3").
    pub fn average_display(&self) -> String {
        format!("{}.{}", self.average_x10 / 10, self.average_x10 % 10)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
