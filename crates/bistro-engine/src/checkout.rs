//! # Checkout Session
//!
//! Drives the checkout wizard and places orders.
//!
//! ## Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Placement                                    │
//! │                                                                         │
//! │  place_order()                                                          │
//! │       │  validate: cart not empty, not already submitted                │
//! │       │  capture: items, delivery, payment summary, totals              │
//! │       ▼                                                                 │
//! │  spawned task ──► sleep(placement_delay)   ← simulated kitchen confirm  │
//! │       │                                                                 │
//! │       ├──► persist OrderRecord under order_{number}                     │
//! │       ├──► mark wizard Submitted                                        │
//! │       └──► clear the cart                                               │
//! │                                                                         │
//! │  The caller gets a PlacementHandle right away: await it for the        │
//! │  record, or cancel() while the delay is still running and NOTHING      │
//! │  has happened - no record, no cleared cart, wizard still on Review.    │
//! │  (Cancelling after the delay races the commit; see PlacementHandle.)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use bistro_core::checkout::{CheckoutFlow, CheckoutStep, DeliveryDetails, FieldError, PaymentDetails};
use bistro_core::pricing::OrderTotals;
use bistro_core::types::{OrderRecord, OrderStatus};
use bistro_core::CoreError;
use bistro_db::{order_key, Database, ORDER_KEY_PREFIX};

use crate::cart_store::CartStore;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, ErrorCode};

// =============================================================================
// Placement Handle
// =============================================================================

/// In-flight order placement.
///
/// Holds the spawned placement task. `cancel()` before the delay elapses
/// aborts it with no side effects. A cancel that lands AFTER the delay races
/// the commit: the record may already be persisted while the cart clear and
/// wizard update are skipped. UI flows cancel on navigation during the
/// spinner, so the pre-delay guarantee is the one that matters.
#[derive(Debug)]
pub struct PlacementHandle {
    /// The order number the record will be stored under.
    pub order_number: String,
    task: JoinHandle<EngineResult<OrderRecord>>,
}

impl PlacementHandle {
    /// Aborts the placement if it hasn't completed yet.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Waits for the placement to finish and returns the stored record.
    pub async fn wait(self) -> EngineResult<OrderRecord> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(EngineError::cancelled()),
            Err(e) => Err(EngineError::internal(format!("Placement task failed: {e}"))),
        }
    }
}

// =============================================================================
// Checkout Session
// =============================================================================

/// One customer's walk through checkout.
///
/// Wraps the pure [`CheckoutFlow`] state machine with the cart, storage and
/// the placement timer.
pub struct CheckoutSession {
    db: Database,
    cart: Arc<CartStore>,
    config: EngineConfig,
    flow: Arc<Mutex<CheckoutFlow>>,
}

impl CheckoutSession {
    /// Starts a fresh session at the delivery step.
    pub fn new(db: Database, cart: Arc<CartStore>, config: EngineConfig) -> Self {
        CheckoutSession {
            db,
            cart,
            config,
            flow: Arc::new(Mutex::new(CheckoutFlow::new())),
        }
    }

    /// The wizard's current step.
    pub fn step(&self) -> CheckoutStep {
        self.flow.lock().expect("Checkout mutex poisoned").step
    }

    /// Replaces the delivery form data.
    pub fn set_delivery(&self, delivery: DeliveryDetails) {
        self.flow.lock().expect("Checkout mutex poisoned").delivery = delivery;
    }

    /// Replaces the payment form data.
    pub fn set_payment(&self, payment: PaymentDetails) {
        self.flow.lock().expect("Checkout mutex poisoned").payment = payment;
    }

    /// Records the review-step terms and conditions checkbox.
    pub fn set_terms_accepted(&self, accepted: bool) {
        self.flow
            .lock()
            .expect("Checkout mutex poisoned")
            .terms_accepted = accepted;
    }

    /// Validates the current step and moves forward.
    pub fn advance(&self) -> Result<CheckoutStep, Vec<FieldError>> {
        self.flow.lock().expect("Checkout mutex poisoned").advance()
    }

    /// Moves back one step.
    pub fn back(&self) -> CheckoutStep {
        self.flow.lock().expect("Checkout mutex poisoned").back()
    }

    /// Applies a promo code; returns its discount in basis points.
    pub fn apply_promo(&self, code: &str) -> EngineResult<u32> {
        let bps = self
            .flow
            .lock()
            .expect("Checkout mutex poisoned")
            .apply_promo(code)?;
        info!(code = %code, bps, "Promo code applied");
        Ok(bps)
    }

    /// Removes the applied promo code.
    pub fn remove_promo(&self) {
        self.flow
            .lock()
            .expect("Checkout mutex poisoned")
            .remove_promo();
    }

    /// Order totals as the review step shows them: cart contents with the
    /// session's promo discount applied.
    pub fn totals(&self) -> OrderTotals {
        let discount_bps = self
            .flow
            .lock()
            .expect("Checkout mutex poisoned")
            .discount_bps();
        self.cart.totals_with_discount(discount_bps)
    }

    /// Places the order.
    ///
    /// Validates up front, then spawns the delayed placement task and
    /// returns its handle immediately.
    ///
    /// ## Errors
    /// - `EmptyCart` if the cart has no lines
    /// - `AlreadySubmitted` if this session already placed its order
    /// - `ValidationError` if the wizard hasn't reached the review step
    ///   (delivery and payment are validated on the way there) or the terms
    ///   checkbox is unticked
    pub fn place_order(&self) -> EngineResult<PlacementHandle> {
        let (delivery, payment) = {
            let flow = self.flow.lock().expect("Checkout mutex poisoned");
            if flow.step == CheckoutStep::Submitted {
                return Err(CoreError::AlreadySubmitted.into());
            }
            if flow.step != CheckoutStep::Review {
                return Err(EngineError::new(
                    ErrorCode::ValidationError,
                    "Checkout has not reached the review step",
                ));
            }
            if let Some(error) = flow.validate_review().into_iter().next() {
                return Err(EngineError::new(ErrorCode::ValidationError, error.message));
            }
            (flow.delivery.clone(), flow.payment_summary())
        };

        let snapshot = self.cart.snapshot();
        if snapshot.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        let totals = self.totals();

        let order_number = format!("ORD{}", Utc::now().timestamp_millis());
        info!(order_number = %order_number, total_cents = totals.total_cents, "Placing order");

        let record = OrderRecord {
            order_number: order_number.clone(),
            items: snapshot.cart.items,
            delivery,
            payment,
            totals,
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
        };

        let db = self.db.clone();
        let cart = self.cart.clone();
        let flow = self.flow.clone();
        let delay = self.config.placement_delay;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            db.storage()
                .put_json(&order_key(&record.order_number), &record)
                .await?;

            // The wizard may have been marked submitted by a racing call;
            // the stored record is already the source of truth then.
            if let Err(e) = flow.lock().expect("Checkout mutex poisoned").mark_submitted() {
                warn!("Wizard already submitted: {}", e);
            }
            cart.clear().await;

            info!(order_number = %record.order_number, "Order placed");
            Ok(record)
        });

        Ok(PlacementHandle { order_number, task })
    }
}

// =============================================================================
// Order Lookup
// =============================================================================

/// Loads a placed order by its order number.
pub async fn load_order(db: &Database, order_number: &str) -> EngineResult<OrderRecord> {
    match db
        .storage()
        .get_json::<OrderRecord>(&order_key(order_number))
        .await?
    {
        Some(record) => Ok(record),
        None => Err(CoreError::OrderNotFound(order_number.to_string()).into()),
    }
}

/// Lists the order numbers of all placed orders, newest first.
pub async fn list_order_numbers(db: &Database) -> EngineResult<Vec<String>> {
    let keys = db.storage().keys_with_prefix(ORDER_KEY_PREFIX).await?;
    Ok(keys
        .into_iter()
        .filter_map(|key| key.strip_prefix(ORDER_KEY_PREFIX).map(str::to_string))
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use bistro_core::cart::LineItem;
    use bistro_core::types::{OrderType, PaymentMethod};
    use bistro_db::DbConfig;
    use std::time::Duration;

    async fn session() -> (Database, Arc<CartStore>, CheckoutSession) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = EngineConfig::for_tests();
        let cart = Arc::new(CartStore::load(db.clone(), config.pricing).await);
        let session = CheckoutSession::new(db.clone(), cart.clone(), config);
        (db, cart, session)
    }

    fn fill_forms(session: &CheckoutSession) {
        session.set_delivery(DeliveryDetails {
            order_type: OrderType::Delivery,
            first_name: "Mario".to_string(),
            last_name: "Rossi".to_string(),
            email: "mario@example.com".to_string(),
            phone: "0123456789".to_string(),
            address: "Via Roma 1".to_string(),
            city: "Milano".to_string(),
            postal_code: "20121".to_string(),
            country: "IT".to_string(),
            delivery_time: "asap".to_string(),
            instructions: String::new(),
        });
        session.set_payment(PaymentDetails {
            method: PaymentMethod::Card,
            card_holder: "Mario Rossi".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            card_expiry: "12/27".to_string(),
            cvv: "123".to_string(),
        });
        session.set_terms_accepted(true);
    }

    /// Fills the forms and walks the wizard to the review step.
    fn to_review(session: &CheckoutSession) {
        fill_forms(session);
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.step(), CheckoutStep::Review);
    }

    #[tokio::test]
    async fn test_place_order_persists_and_clears_cart() {
        let (db, cart, session) = session().await;
        cart.add_item(LineItem::new("margherita", "Pizza Margherita", 1500))
            .await;
        to_review(&session);

        let handle = session.place_order().unwrap();
        let record = handle.wait().await.unwrap();

        assert!(record.order_number.starts_with("ORD"));
        assert_eq!(record.status, OrderStatus::Confirmed);
        assert_eq!(record.totals.total_cents, 1949);
        // Card number stays out of the record
        assert!(record.payment.card_last4.as_deref() == Some("1111"));

        assert_eq!(session.step(), CheckoutStep::Submitted);
        assert!(cart.snapshot().cart.is_empty());

        let loaded = load_order(&db, &record.order_number).await.unwrap();
        assert_eq!(loaded, record);

        let numbers = list_order_numbers(&db).await.unwrap();
        assert_eq!(numbers, vec![record.order_number]);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let (_db, _cart, session) = session().await;
        to_review(&session);

        let err = session.place_order().unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
    }

    #[tokio::test]
    async fn test_placement_requires_review_step() {
        let (db, cart, session) = session().await;
        cart.add_item(LineItem::new("margherita", "Pizza Margherita", 1500))
            .await;

        // Unfilled forms straight from step 1: the step gate refuses before
        // any record can be written
        session.set_terms_accepted(true);
        let err = session.place_order().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // Valid forms but still on the delivery step: same refusal
        fill_forms(&session);
        let err = session.place_order().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(list_order_numbers(&db).await.unwrap().is_empty());

        session.advance().unwrap();
        session.advance().unwrap();
        session.place_order().unwrap().wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_terms_must_be_accepted() {
        let (_db, cart, session) = session().await;
        cart.add_item(LineItem::new("margherita", "Pizza Margherita", 1500))
            .await;
        to_review(&session);
        session.set_terms_accepted(false);

        let err = session.place_order().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        session.set_terms_accepted(true);
        session.place_order().unwrap().wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_double_submission_rejected() {
        let (_db, cart, session) = session().await;
        cart.add_item(LineItem::new("margherita", "Pizza Margherita", 1500))
            .await;
        to_review(&session);

        session.place_order().unwrap().wait().await.unwrap();

        // Cart was cleared, but the session refuses first on its own state
        let err = session.place_order().unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadySubmitted);
    }

    #[tokio::test]
    async fn test_cancel_leaves_no_trace() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut config = EngineConfig::for_tests();
        config.placement_delay = Duration::from_secs(30);
        let cart = Arc::new(CartStore::load(db.clone(), config.pricing).await);
        let session = CheckoutSession::new(db.clone(), cart.clone(), config);

        cart.add_item(LineItem::new("margherita", "Pizza Margherita", 1500))
            .await;
        to_review(&session);

        let handle = session.place_order().unwrap();
        let order_number = handle.order_number.clone();
        handle.cancel();

        let err = handle.wait().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Cancelled);

        // Nothing happened: no record, cart intact, wizard not submitted
        assert!(load_order(&db, &order_number).await.is_err());
        assert!(!cart.snapshot().cart.is_empty());
        assert_ne!(session.step(), CheckoutStep::Submitted);
    }

    #[tokio::test]
    async fn test_promo_discount_flows_into_totals() {
        let (_db, cart, session) = session().await;
        cart.add_item(
            LineItem::new("margherita", "Pizza Margherita", 1500).with_quantity(2),
        )
        .await;

        session.apply_promo("SAVE10").unwrap();
        let totals = session.totals();
        assert_eq!(totals.discount_cents, 300);
        // 27.00 after discount clears the free-delivery threshold
        assert_eq!(totals.delivery_cents, 0);

        let err = session.apply_promo("NOPE").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPromoCode);
    }

    #[tokio::test]
    async fn test_order_not_found() {
        let (db, _cart, _session) = session().await;
        let err = load_order(&db, "ORD0").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }
}
