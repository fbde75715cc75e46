//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The original cart computed totals in floating point:                  │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    subtotal * 0.1 for tax then toFixed(2) for display                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    15.00 € is 1500 cents; 10% tax is exactly 150 cents                 │
//! │    Rounding happens once, explicitly, in basis-point math               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1500); // 15.00 €
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // 30.00 €
//! let total = price + Money::from_cents(299);    // 17.99 €
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (euro cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discounts and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for the persisted JSON documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let price = Money::from_cents(1500); // 15.00 €
    /// assert_eq!(price.cents(), 1500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-euro portion.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cent portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Takes a percentage of this amount, expressed in basis points.
    ///
    /// 1 basis point = 0.01%, so 1000 bps = 10%. Uses round-half-up integer
    /// math: `(amount * bps + 5000) / 10000`. Computed in i128 so large
    /// amounts cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(1500);
    /// assert_eq!(subtotal.percent(1000).cents(), 150); // 10% of 15.00 €
    /// ```
    pub fn percent(&self, bps: u32) -> Money {
        let cents = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Calculates tax on this amount.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    /// use bistro_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(1500);     // 15.00 €
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1000)); // 10%
    /// assert_eq!(tax.cents(), 150);               // 1.50 €
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percent(rate.bps())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(899);  // 8.99 €
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 2697);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display follows the site's euro-suffix convention: `12.34 €`.
///
/// ## Note
/// This is the canonical display format of the system (the original rendered
/// `toFixed(2) + " €"` everywhere). Localization beyond this is a UI concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02} €", sign, self.euros().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1599);
        assert_eq!(money.cents(), 1599);
        assert_eq!(money.euros(), 15);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1599)), "15.99 €");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00 €");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50 €");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00 €");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(299);

        assert_eq!((a + b).cents(), 1299);
        assert_eq!((a - b).cents(), 701);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_percent_exact() {
        // 10% of 15.00 € is exactly 1.50 €
        let amount = Money::from_cents(1500);
        assert_eq!(amount.percent(1000).cents(), 150);
    }

    #[test]
    fn test_percent_rounds_half_up() {
        // 15% of 0.50 € = 0.075 € → rounds to 0.08 €
        let amount = Money::from_cents(50);
        assert_eq!(amount.percent(1500).cents(), 8);
    }

    #[test]
    fn test_calculate_tax() {
        let amount = Money::from_cents(2500);
        let tax = amount.calculate_tax(TaxRate::from_bps(1000));
        assert_eq!(tax.cents(), 250);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(899);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 2697);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }
}
