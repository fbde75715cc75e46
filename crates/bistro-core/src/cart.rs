//! # Cart Module
//!
//! The shopping cart and its line items.
//!
//! ## Merge Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Line Identity                                      │
//! │                                                                         │
//! │  A line is identified by (item id, customizations), not id alone:      │
//! │                                                                         │
//! │    add("margherita", {})                 ──► line A, qty 1              │
//! │    add("margherita", {})                 ──► line A, qty 2 (merged)     │
//! │    add("margherita", {size: "large"})    ──► line B, qty 1 (separate)   │
//! │                                                                         │
//! │  Customizations live in a BTreeMap, so two maps with the same entries  │
//! │  in a different insertion order are the SAME line.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations on a line that does not exist are no-ops, never errors: a stale
//! UI event (double-click on remove, update racing a removal) must not take
//! the whole cart down.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{OrderTotals, PricingConfig};

// =============================================================================
// Line Item
// =============================================================================

/// A single line in the cart.
///
/// Carries a snapshot of the menu item's name and unit price taken when the
/// line was added, so menu edits never rewrite carts or order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Menu item identifier.
    pub id: String,
    /// Display name, frozen at add time.
    pub name: String,
    /// Unit price in cents, frozen at add time.
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// Thumbnail URL for the cart drawer, if the menu item has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Selected options, e.g. `size → large`. Sorted map so equality does
    /// not depend on selection order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub customizations: BTreeMap<String, String>,
}

impl LineItem {
    /// Creates a line with quantity 1 and no customizations.
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price_cents: i64) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            unit_price_cents,
            quantity: 1,
            image: None,
            customizations: BTreeMap::new(),
        }
    }

    /// Sets the quantity (builder style).
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the thumbnail URL (builder style).
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Adds a customization (builder style).
    pub fn with_customization(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.customizations.insert(key.into(), value.into());
        self
    }

    /// Unit price as `Money`.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Whether this line and another refer to the same (id, customizations)
    /// combination and should be merged.
    fn same_line(&self, id: &str, customizations: &BTreeMap<String, String>) -> bool {
        self.id == id && &self.customizations == customizations
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered list of line items.
///
/// Lines keep their insertion order; merging an existing line bumps its
/// quantity in place without moving it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a line to the cart.
    ///
    /// If a line with the same (id, customizations) already exists its
    /// quantity is increased by the incoming quantity; otherwise the line is
    /// appended. Quantities of zero or less are ignored entirely.
    pub fn add(&mut self, item: LineItem) {
        if item.quantity <= 0 {
            return;
        }
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.same_line(&item.id, &item.customizations))
        {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    /// Removes the line matching (id, customizations). No-op when absent.
    pub fn remove(&mut self, id: &str, customizations: &BTreeMap<String, String>) {
        self.items
            .retain(|line| !line.same_line(id, customizations));
    }

    /// Sets the quantity of the line matching (id, customizations).
    ///
    /// A quantity of zero or less removes the line. No-op when the line is
    /// absent.
    pub fn set_quantity(
        &mut self,
        id: &str,
        customizations: &BTreeMap<String, String>,
        quantity: i64,
    ) {
        if quantity <= 0 {
            self.remove(id, customizations);
            return;
        }
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.same_line(id, customizations))
        {
            line.quantity = quantity;
        }
    }

    /// Changes a line's quantity by a delta (the +/- stepper buttons).
    ///
    /// Dropping to zero or below removes the line. No-op when absent.
    pub fn adjust_quantity(
        &mut self,
        id: &str,
        customizations: &BTreeMap<String, String>,
        delta: i64,
    ) {
        let new_quantity = match self
            .items
            .iter()
            .find(|line| line.same_line(id, customizations))
        {
            Some(line) => line.quantity + delta,
            None => return,
        };
        self.set_quantity(id, customizations, new_quantity);
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// True when the cart has no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines (the cart badge number).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total())
    }

    /// Full money breakdown with no promo discount.
    pub fn totals(&self, pricing: &PricingConfig) -> OrderTotals {
        self.totals_with_discount(pricing, 0)
    }

    /// Full money breakdown with a promo discount in basis points.
    pub fn totals_with_discount(&self, pricing: &PricingConfig, discount_bps: u32) -> OrderTotals {
        OrderTotals::compute(self.subtotal(), pricing, discount_bps)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn margherita() -> LineItem {
        LineItem::new("margherita", "Pizza Margherita", 1500)
    }

    #[test]
    fn test_add_appends_new_line() {
        let mut cart = Cart::new();
        cart.add(margherita());
        cart.add(LineItem::new("tiramisu", "Tiramisu", 650));

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_merges_identical_lines() {
        let mut cart = Cart::new();
        cart.add(margherita());
        cart.add(margherita().with_quantity(2));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_different_customizations_stay_separate() {
        let mut cart = Cart::new();
        cart.add(margherita());
        cart.add(margherita().with_customization("size", "large"));

        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn test_customization_order_does_not_matter() {
        let mut cart = Cart::new();
        cart.add(
            margherita()
                .with_customization("size", "large")
                .with_customization("crust", "thin"),
        );
        cart.add(
            margherita()
                .with_customization("crust", "thin")
                .with_customization("size", "large"),
        );

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_remove_absent_line_is_noop() {
        let mut cart = Cart::new();
        cart.add(margherita());

        cart.remove("carbonara", &BTreeMap::new());
        assert_eq!(cart.items.len(), 1);

        // Same id but different customizations is a different line
        let mut other = BTreeMap::new();
        other.insert("size".to_string(), "large".to_string());
        cart.remove("margherita", &other);
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(margherita().with_quantity(3));

        cart.set_quantity("margherita", &BTreeMap::new(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(margherita());

        cart.set_quantity("carbonara", &BTreeMap::new(), 5);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_adjust_quantity_steps_and_removes() {
        let mut cart = Cart::new();
        cart.add(margherita().with_quantity(2));

        cart.adjust_quantity("margherita", &BTreeMap::new(), 1);
        assert_eq!(cart.items[0].quantity, 3);

        cart.adjust_quantity("margherita", &BTreeMap::new(), -3);
        assert!(cart.is_empty());

        // Absent line: no-op
        cart.adjust_quantity("margherita", &BTreeMap::new(), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_nonpositive_quantity_ignored() {
        let mut cart = Cart::new();
        cart.add(margherita().with_quantity(0));
        cart.add(margherita().with_quantity(-2));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_and_totals() {
        let mut cart = Cart::new();
        cart.add(margherita()); // 15.00
        cart.add(LineItem::new("tiramisu", "Tiramisu", 650).with_quantity(2)); // 13.00

        assert_eq!(cart.subtotal().cents(), 2800);

        // Above free-delivery threshold: 28.00 + 2.80 tax
        let totals = cart.totals(&PricingConfig::default());
        assert_eq!(totals.tax_cents, 280);
        assert_eq!(totals.delivery_cents, 0);
        assert_eq!(totals.total_cents, 3080);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(margherita());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_serde_round_trip_preserves_lines() {
        let mut cart = Cart::new();
        cart.add(
            margherita()
                .with_image("/static/images/margherita.jpg")
                .with_customization("size", "large"),
        );

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.contains("unitPriceCents"));

        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
