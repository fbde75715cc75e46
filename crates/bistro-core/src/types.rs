//! # Domain Types
//!
//! Shared domain types for the Bistro ordering engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderRecord   │   │  OrderStatus    │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  order_number   │   │  Confirmed      │   │  Card           │       │
//! │  │  items          │   │  Preparing      │   │  Paypal         │       │
//! │  │  delivery       │   │  OutForDelivery │   │  Cash           │       │
//! │  │  payment        │   │  Delivered      │   └─────────────────┘       │
//! │  │  totals, status │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │   OrderType     │                             │
//! │  │  bps (u32)      │   │   Delivery      │                             │
//! │  │  1000 = 10%     │   │   Pickup        │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::LineItem;
use crate::checkout::DeliveryDetails;
use crate::pricing::OrderTotals;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the site's VAT rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Order Type
// =============================================================================

/// How the order is fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Delivered to the customer's address.
    Delivery,
    /// Picked up at the restaurant.
    Pickup,
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::Delivery
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// PayPal (handled externally).
    Paypal,
    /// Cash on delivery.
    Cash,
}

// =============================================================================
// Order Status
// =============================================================================

/// The four tracker steps of a placed order.
///
/// Forward-only: status never moves backwards, and `Delivered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order accepted; the kitchen has not started yet.
    Confirmed,
    /// The kitchen is preparing the order.
    Preparing,
    /// A delivery partner is on the way.
    OutForDelivery,
    /// Order handed over to the customer.
    Delivered,
}

impl OrderStatus {
    /// Returns the next status, or `Delivered` again once terminal.
    pub const fn advance(self) -> OrderStatus {
        match self {
            OrderStatus::Confirmed => OrderStatus::Preparing,
            OrderStatus::Preparing => OrderStatus::OutForDelivery,
            OrderStatus::OutForDelivery => OrderStatus::Delivered,
            OrderStatus::Delivered => OrderStatus::Delivered,
        }
    }

    /// 1-based position on the four-step tracker.
    pub const fn step_index(self) -> u8 {
        match self {
            OrderStatus::Confirmed => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::OutForDelivery => 3,
            OrderStatus::Delivered => 4,
        }
    }

    /// Fill percentage of the tracker progress line: (step - 1) / 3.
    pub const fn progress_percent(self) -> u8 {
        ((self.step_index() - 1) as u16 * 100 / 3) as u8
    }

    /// Whether the status can no longer change.
    pub const fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Confirmed
    }
}

// =============================================================================
// Payment Summary
// =============================================================================

/// What the order record retains about the payment.
///
/// The card number and CVV are excluded by construction: this type simply has
/// no place to put them. Only the method, the cardholder name and the last
/// four digits survive into storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub method: PaymentMethod,
    pub card_holder: Option<String>,
    pub card_last4: Option<String>,
}

impl PaymentSummary {
    /// Summary for a non-card payment method.
    pub fn for_method(method: PaymentMethod) -> Self {
        PaymentSummary {
            method,
            card_holder: None,
            card_last4: None,
        }
    }
}

// =============================================================================
// Order Record
// =============================================================================

/// A placed order, persisted under its per-order storage key.
///
/// Uses the snapshot pattern: line items carry the name and unit price frozen
/// at the time they were added to the cart, so later menu edits don't rewrite
/// order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Business identifier, `ORD{unix-millis}`.
    pub order_number: String,
    pub items: Vec<LineItem>,
    pub delivery: DeliveryDetails,
    pub payment: PaymentSummary,
    pub totals: OrderTotals,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1000);
        assert_eq!(rate.bps(), 1000);
        assert!((rate.percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(10.0);
        assert_eq!(rate.bps(), 1000);
    }

    #[test]
    fn test_status_advances_forward_only() {
        let mut status = OrderStatus::default();
        assert_eq!(status, OrderStatus::Confirmed);

        status = status.advance();
        assert_eq!(status, OrderStatus::Preparing);
        status = status.advance();
        assert_eq!(status, OrderStatus::OutForDelivery);
        status = status.advance();
        assert_eq!(status, OrderStatus::Delivered);

        // Terminal: advancing again stays put
        assert_eq!(status.advance(), OrderStatus::Delivered);
        assert!(status.is_terminal());
    }

    #[test]
    fn test_status_progress() {
        assert_eq!(OrderStatus::Confirmed.progress_percent(), 0);
        assert_eq!(OrderStatus::Preparing.progress_percent(), 33);
        assert_eq!(OrderStatus::OutForDelivery.progress_percent(), 66);
        assert_eq!(OrderStatus::Delivered.progress_percent(), 100);
    }

    #[test]
    fn test_payment_summary_has_no_secret_fields() {
        let summary = PaymentSummary::for_method(PaymentMethod::Cash);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("cvv"));
        assert!(!json.contains("number"));
    }
}
