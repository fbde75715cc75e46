//! # Order Tracking Simulation
//!
//! Simulates kitchen progress for a placed order.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tracking Loop                                      │
//! │                                                                         │
//! │  start(order_number)                                                    │
//! │       │  load record, publish current status                            │
//! │       ▼                                                                 │
//! │  every tracking_tick:                                                   │
//! │       │  roll random_bool(advance_probability)                          │
//! │       ├── miss ──► wait for next tick                                   │
//! │       └── hit ───► status = status.advance()                            │
//! │                    persist record, publish to watchers                  │
//! │                                                                         │
//! │  Confirmed ──► Preparing ──► OutForDelivery ──► Delivered (loop ends)   │
//! │                                                                         │
//! │  Status only ever moves forward. Stopping the handle aborts the loop;  │
//! │  the order keeps whatever status it last reached.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use bistro_core::types::OrderStatus;
use bistro_db::{order_key, Database};

use crate::checkout::load_order;
use crate::config::EngineConfig;
use crate::error::EngineResult;

/// One advancement roll.
fn should_advance(probability: f64) -> bool {
    rand::rng().random_bool(probability.clamp(0.0, 1.0))
}

// =============================================================================
// Tracking Handle
// =============================================================================

/// A running tracking simulation.
///
/// Watchers observe status changes through a `watch` channel; dropping the
/// handle does NOT stop the loop (the simulation outlives a page that
/// navigates away), `stop()` does.
#[derive(Debug)]
pub struct TrackingHandle {
    order_number: String,
    rx: watch::Receiver<OrderStatus>,
    task: JoinHandle<()>,
}

impl TrackingHandle {
    /// The order being tracked.
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// The last published status.
    pub fn status(&self) -> OrderStatus {
        *self.rx.borrow()
    }

    /// A receiver for observing status changes.
    pub fn watch(&self) -> watch::Receiver<OrderStatus> {
        self.rx.clone()
    }

    /// Waits until the order reaches `Delivered`.
    pub async fn delivered(&self) -> OrderStatus {
        let mut rx = self.rx.clone();
        // Closed sender means the loop finished, which only happens terminal
        let _ = rx.wait_for(|status| status.is_terminal()).await;
        OrderStatus::Delivered
    }

    /// Stops the simulation. The order keeps its current status.
    pub fn stop(&self) {
        self.task.abort();
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// Starts the tracking simulation for a placed order.
///
/// Errors if the order doesn't exist. An already-delivered order gets a
/// handle whose loop ends immediately.
pub async fn start(
    db: Database,
    order_number: &str,
    config: &EngineConfig,
) -> EngineResult<TrackingHandle> {
    let mut record = load_order(&db, order_number).await?;
    let (tx, rx) = watch::channel(record.status);

    let tick = config.tracking_tick;
    let probability = config.advance_probability;
    let number = order_number.to_string();

    info!(order_number = %number, status = ?record.status, "Tracking started");

    let task = tokio::spawn(async move {
        while !record.status.is_terminal() {
            tokio::time::sleep(tick).await;

            if !should_advance(probability) {
                continue;
            }

            record.status = record.status.advance();
            info!(order_number = %record.order_number, status = ?record.status, "Order advanced");

            if let Err(e) = db
                .storage()
                .put_json(&order_key(&record.order_number), &record)
                .await
            {
                warn!("Failed to persist order status: {}", e);
            }

            // All receivers gone: keep going, the record still advances
            let _ = tx.send(record.status);
        }
    });

    Ok(TrackingHandle {
        order_number: number,
        rx,
        task,
    })
}

/// Evaluates a single advancement roll right now, outside any running loop.
///
/// This is what a tracking page calls on load or manual refresh when no
/// simulation is running: one roll, persist on a hit, return the (possibly
/// unchanged) status. Terminal orders come back as-is without rolling.
pub async fn refresh(
    db: &Database,
    order_number: &str,
    config: &EngineConfig,
) -> EngineResult<OrderStatus> {
    let mut record = load_order(db, order_number).await?;
    if record.status.is_terminal() || !should_advance(config.advance_probability) {
        return Ok(record.status);
    }

    record.status = record.status.advance();
    db.storage()
        .put_json(&order_key(&record.order_number), &record)
        .await?;
    info!(order_number = %record.order_number, status = ?record.status, "Order advanced");
    Ok(record.status)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use bistro_core::checkout::DeliveryDetails;
    use bistro_core::pricing::OrderTotals;
    use bistro_core::types::{OrderRecord, PaymentMethod, PaymentSummary};
    use bistro_db::DbConfig;
    use chrono::Utc;
    use std::time::Duration;

    async fn seeded_order(db: &Database, status: OrderStatus) -> String {
        let record = OrderRecord {
            order_number: "ORD1756300000000".to_string(),
            items: Vec::new(),
            delivery: DeliveryDetails::default(),
            payment: PaymentSummary::for_method(PaymentMethod::Cash),
            totals: OrderTotals::default(),
            status,
            created_at: Utc::now(),
        };
        db.storage()
            .put_json(&order_key(&record.order_number), &record)
            .await
            .unwrap();
        record.order_number
    }

    #[tokio::test]
    async fn test_runs_to_delivered_and_persists() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let number = seeded_order(&db, OrderStatus::Confirmed).await;

        // Every tick advances, ticks are milliseconds
        let handle = start(db.clone(), &number, &EngineConfig::for_tests())
            .await
            .unwrap();

        let status = tokio::time::timeout(Duration::from_secs(5), handle.delivered())
            .await
            .unwrap();
        assert_eq!(status, OrderStatus::Delivered);

        let stored = load_order(&db, &number).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_stop_freezes_status() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let number = seeded_order(&db, OrderStatus::Preparing).await;

        let mut config = EngineConfig::for_tests();
        config.tracking_tick = Duration::from_secs(60);
        let handle = start(db.clone(), &number, &config).await.unwrap();
        assert_eq!(handle.status(), OrderStatus::Preparing);

        handle.stop();

        let stored = load_order(&db, &number).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_refresh_rolls_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let number = seeded_order(&db, OrderStatus::Confirmed).await;

        // Guaranteed miss: status stays and nothing is rewritten
        let mut config = EngineConfig::for_tests();
        config.advance_probability = 0.0;
        let status = refresh(&db, &number, &config).await.unwrap();
        assert_eq!(status, OrderStatus::Confirmed);

        // Guaranteed hit: one step forward, persisted
        config.advance_probability = 1.0;
        let status = refresh(&db, &number, &config).await.unwrap();
        assert_eq!(status, OrderStatus::Preparing);

        let stored = load_order(&db, &number).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_refresh_leaves_delivered_alone() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let number = seeded_order(&db, OrderStatus::Delivered).await;

        let status = refresh(&db, &number, &EngineConfig::for_tests())
            .await
            .unwrap();
        assert_eq!(status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = start(db, "ORD0", &EngineConfig::for_tests())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_delivered_order_ends_immediately() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let number = seeded_order(&db, OrderStatus::Delivered).await;

        let handle = start(db, &number, &EngineConfig::for_tests())
            .await
            .unwrap();
        assert_eq!(handle.status(), OrderStatus::Delivered);
        assert_eq!(handle.delivered().await, OrderStatus::Delivered);
    }
}
