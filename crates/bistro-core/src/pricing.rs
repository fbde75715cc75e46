//! # Pricing Module
//!
//! The single source of truth for pricing policy and order totals.
//!
//! ## The Totals Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Totals Pipeline                                   │
//! │                                                                         │
//! │   subtotal ──► − discount ──► + tax ──► + delivery ──► total            │
//! │                                                                         │
//! │   1. subtotal  = Σ unit_price × quantity over all line items            │
//! │   2. discount  = subtotal × promo bps (0 if no promo)                   │
//! │   3. tax       = (subtotal − discount) × tax rate                       │
//! │   4. delivery  = fee, waived when (subtotal − discount) > threshold     │
//! │   5. total     = (subtotal − discount) + tax + delivery                 │
//! │                                                                         │
//! │   Every step is integer cents; rounding happens once per percentage.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::TaxRate;

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Pricing policy: tax rate, delivery fee and the free-delivery threshold.
///
/// The defaults mirror what the restaurant actually charges (10% VAT, 2.99 €
/// delivery, free above 20.00 €), but every consumer takes the config as a
/// parameter so a different deployment can change the policy in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// VAT applied to the discounted subtotal.
    pub tax_rate: TaxRate,
    /// Flat delivery fee.
    pub delivery_fee: Money,
    /// Delivery is free when the discounted subtotal strictly exceeds this.
    pub free_delivery_threshold: Money,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tax_rate: TaxRate::from_bps(1000),            // 10%
            delivery_fee: Money::from_cents(299),         // 2.99 €
            free_delivery_threshold: Money::from_cents(2000), // 20.00 €
        }
    }
}

impl PricingConfig {
    /// The delivery fee owed for a given discounted subtotal.
    ///
    /// Strictly-greater comparison: a subtotal of exactly 20.00 € still pays
    /// the fee. An empty cart (zero subtotal) also pays it, which matches the
    /// order summary the site has always shown.
    pub fn delivery_fee_for(&self, discounted_subtotal: Money) -> Money {
        if discounted_subtotal > self.free_delivery_threshold {
            Money::zero()
        } else {
            self.delivery_fee
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The computed money breakdown of an order.
///
/// Stored as raw cents rather than `Money` so the persisted JSON documents
/// stay plain integers and the TS bindings export as `number` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub tax_cents: i64,
    pub delivery_cents: i64,
    pub total_cents: i64,
}

impl OrderTotals {
    /// Computes the full breakdown from a subtotal.
    ///
    /// `discount_bps` is the promo discount in basis points (0 for none).
    /// Tax and the delivery waiver both apply to the subtotal AFTER the
    /// discount, so a promo can push an order below the free-delivery line.
    pub fn compute(subtotal: Money, pricing: &PricingConfig, discount_bps: u32) -> Self {
        let discount = subtotal.percent(discount_bps);
        let after_discount = subtotal - discount;
        let tax = after_discount.calculate_tax(pricing.tax_rate);
        let delivery = pricing.delivery_fee_for(after_discount);
        let total = after_discount + tax + delivery;

        OrderTotals {
            subtotal_cents: subtotal.cents(),
            discount_cents: discount.cents(),
            tax_cents: tax.cents(),
            delivery_cents: delivery.cents(),
            total_cents: total.cents(),
        }
    }

    /// The subtotal as `Money`.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// The grand total as `Money`.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
