//! # Cart Store
//!
//! The persistent, observable cart the UI drives.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartStore                                       │
//! │                                                                         │
//! │  UI action                CartStore                    Effects          │
//! │  ─────────                ─────────                    ───────          │
//! │                                                                         │
//! │  Add to cart ───────────► add_item() ────┬──► persist under "cart"     │
//! │  Stepper +/- ───────────► adjust_quantity() ──► notify subscribers     │
//! │  Remove line ───────────► remove_item()  │    (badge, sidebar, totals) │
//! │  Clear ─────────────────► clear() ───────┘                             │
//! │                                                                         │
//! │  On startup: load() restores the cart from storage. A missing or       │
//! │  corrupt document silently becomes an empty cart - a broken cart       │
//! │  must never take the page down.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The cart is behind a `Mutex` because UI events can race. The lock is
//! never held across an await: mutations snapshot the cart, release the
//! lock, then persist and notify from the snapshot.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::{debug, warn};

use bistro_core::cart::{Cart, LineItem};
use bistro_core::pricing::{OrderTotals, PricingConfig};
use bistro_db::{Database, CART_KEY};

// =============================================================================
// Snapshot
// =============================================================================

/// Point-in-time view of the cart handed to subscribers.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    pub cart: Cart,
    pub totals: OrderTotals,
    /// Total units across all lines (the header badge number).
    pub item_count: i64,
}

/// Callback invoked with a fresh snapshot after every cart change.
///
/// `Arc` so notification can clone the list and run callbacks without
/// holding the registry lock; a callback may itself subscribe or drop a
/// [`Subscription`].
type Listener = Arc<dyn Fn(&CartSnapshot) + Send + Sync>;

// =============================================================================
// Subscription
// =============================================================================

/// Handle for a cart subscription; dropping it unsubscribes.
///
/// ## Why RAII?
/// A forgotten string-keyed unsubscribe call leaks callbacks forever. Tying
/// the registration to a value's lifetime means a subscriber that goes away
/// takes its callback with it.
#[must_use = "dropping the subscription immediately unsubscribes"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Vec<(u64, Listener)>>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut listeners = listeners.lock().expect("Listener mutex poisoned");
            listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Persistent, observable cart state.
pub struct CartStore {
    db: Database,
    pricing: PricingConfig,
    cart: Mutex<Cart>,
    listeners: Arc<Mutex<Vec<(u64, Listener)>>>,
    next_listener_id: AtomicU64,
}

impl CartStore {
    /// Restores the cart from storage.
    ///
    /// ## Degradation
    /// Never fails: a missing document starts an empty cart, and a corrupt
    /// one is logged and discarded. Persisting later overwrites the corrupt
    /// document.
    pub async fn load(db: Database, pricing: PricingConfig) -> Self {
        let cart = match db.storage().get_json::<Cart>(CART_KEY).await {
            Ok(Some(cart)) => {
                debug!(lines = cart.items.len(), "Restored cart from storage");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!("Discarding unreadable cart document: {}", e);
                Cart::new()
            }
        };

        CartStore {
            db,
            pricing,
            cart: Mutex::new(cart),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(1),
        }
    }

    /// Registers a callback invoked after every cart change.
    ///
    /// The callback also fires once immediately with the current state, so a
    /// freshly-mounted badge or sidebar doesn't render stale.
    pub fn subscribe(&self, listener: impl Fn(&CartSnapshot) + Send + Sync + 'static) -> Subscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);

        listener(&self.snapshot());

        let mut listeners = self.listeners.lock().expect("Listener mutex poisoned");
        listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Current snapshot of the cart and its totals (no promo discount).
    pub fn snapshot(&self) -> CartSnapshot {
        let cart = self.cart.lock().expect("Cart mutex poisoned").clone();
        let totals = cart.totals(&self.pricing);
        let item_count = cart.item_count();
        CartSnapshot {
            cart,
            totals,
            item_count,
        }
    }

    /// Totals with a promo discount applied, in basis points.
    pub fn totals_with_discount(&self, discount_bps: u32) -> OrderTotals {
        self.cart
            .lock()
            .expect("Cart mutex poisoned")
            .totals_with_discount(&self.pricing, discount_bps)
    }

    /// The pricing policy this store computes totals with.
    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Adds a line (merging with an existing identical line).
    pub async fn add_item(&self, item: LineItem) {
        self.mutate(|cart| cart.add(item)).await;
    }

    /// Removes the line matching (id, customizations). No-op when absent.
    pub async fn remove_item(&self, id: &str, customizations: &BTreeMap<String, String>) {
        self.mutate(|cart| cart.remove(id, customizations)).await;
    }

    /// Sets a line's quantity; zero or less removes it. No-op when absent.
    pub async fn set_quantity(
        &self,
        id: &str,
        customizations: &BTreeMap<String, String>,
        quantity: i64,
    ) {
        self.mutate(|cart| cart.set_quantity(id, customizations, quantity))
            .await;
    }

    /// Steps a line's quantity by a delta. No-op when absent.
    pub async fn adjust_quantity(
        &self,
        id: &str,
        customizations: &BTreeMap<String, String>,
        delta: i64,
    ) {
        self.mutate(|cart| cart.adjust_quantity(id, customizations, delta))
            .await;
    }

    /// Empties the cart.
    pub async fn clear(&self) {
        self.mutate(|cart| cart.clear()).await;
    }

    /// Applies a mutation, persists the result and notifies subscribers.
    ///
    /// Persistence failures are logged, not surfaced: the in-memory cart is
    /// the live truth and the next successful write catches storage up.
    async fn mutate(&self, f: impl FnOnce(&mut Cart)) {
        let snapshot = {
            let mut cart = self.cart.lock().expect("Cart mutex poisoned");
            f(&mut cart);
            let totals = cart.totals(&self.pricing);
            let item_count = cart.item_count();
            CartSnapshot {
                cart: cart.clone(),
                totals,
                item_count,
            }
        };

        if let Err(e) = self.db.storage().put_json(CART_KEY, &snapshot.cart).await {
            warn!("Failed to persist cart: {}", e);
        }

        // Clone the registry and notify outside the lock: a callback may
        // drop a Subscription or subscribe, both of which take this lock.
        let listeners: Vec<Listener> = {
            let listeners = self.listeners.lock().expect("Listener mutex poisoned");
            listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in &listeners {
            listener(&snapshot);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
