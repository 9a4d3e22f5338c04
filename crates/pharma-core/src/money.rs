//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing MRPs as floats across a cart:                                  │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ drifts with every line           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer hundredths (paise)                               │
//! │    Each amount is rounded ONCE when it enters from the wire,            │
//! │    every sum and product after that is exact.                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The backend sends and expects plain JSON numbers (`"mrp": 12.5`).
//! `Money` serializes to and from those numbers; only the boundary
//! conversion touches floating point.
//!
//! ## Usage
//! ```rust
//! use pharma_core::money::Money;
//!
//! let mrp = Money::from_cents(1250); // 12.50
//! let line = mrp.multiply_quantity(3);
//! assert_eq!(line.cents(), 3750);
//! assert_eq!(line.to_string(), "37.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// Largest magnitude (in hundredths) that still round-trips through `f64`.
const MAX_EXACT_CENTS: i64 = 1 << 53;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in hundredths of the currency unit (paise for INR).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  MedicineRecord.mrp ──► CartLine.line_total ──► Cart.total_amount      │
/// │                                                    │                    │
/// │                                                    ▼                    │
/// │                                          NewSale.total_amount (wire)   │
/// │                                                                         │
/// │  MedicineRecord.cost_price × quantity ──► InventoryStats.total_value   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from hundredths of the currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use pharma_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount (as sent by the backend) to Money.
    ///
    /// Rounds to the nearest hundredth. Returns `None` for NaN, infinities
    /// and magnitudes too large to represent exactly.
    ///
    /// ## Example
    /// ```rust
    /// use pharma_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(12.5), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::from_amount(0.1 + 0.2), Some(Money::from_cents(30)));
    /// assert_eq!(Money::from_amount(f64::NAN), None);
    /// ```
    pub fn from_amount(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let scaled = (amount * 100.0).round();
        if scaled.abs() >= MAX_EXACT_CENTS as f64 {
            return None;
        }
        Some(Money(scaled as i64))
    }

    /// Returns the amount as a decimal number for the wire.
    #[inline]
    pub fn to_amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in hundredths.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the amount survives the trip through a JSON number.
    #[inline]
    pub const fn is_exact_on_wire(&self) -> bool {
        self.0 > -MAX_EXACT_CENTS && self.0 < MAX_EXACT_CENTS
    }

    /// Multiplies money by a stock or cart quantity, saturating at the
    /// `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use pharma_core::money::Money;
    ///
    /// let mrp = Money::from_cents(299);
    /// assert_eq!(mrp.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// `self × qty`, or `None` when the product is not exact on the wire.
    ///
    /// ## Example
    /// ```rust
    /// use pharma_core::money::Money;
    ///
    /// let mrp = Money::from_cents(299);
    /// assert_eq!(mrp.checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(Money::from_cents(i64::MAX / 2).checked_multiply_quantity(3), None);
    /// ```
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        self.0
            .checked_mul(i64::from(qty))
            .map(Money)
            .filter(Money::is_exact_on_wire)
    }

    /// `self + other`, or `None` when the sum is not exact on the wire.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .filter(Money::is_exact_on_wire)
    }

    /// Formats with a currency symbol in front, e.g. `₹12.34`.
    ///
    /// ## Example
    /// ```rust
    /// use pharma_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1234).format_with_symbol("₹"), "₹12.34");
    /// assert_eq!(Money::from_cents(-550).format_with_symbol("₹"), "-₹5.50");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.major().abs(),
            self.minor_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal display without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.to_amount()
    }
}

impl TryFrom<f64> for Money {
    type Error = String;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Money::from_amount(amount).ok_or_else(|| format!("{amount} is not a valid amount"))
    }
}

/// Saturates at the `i64` bounds.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_amount_rounds_once() {
        assert_eq!(Money::from_amount(5.0), Some(Money::from_cents(500)));
        assert_eq!(Money::from_amount(12.345), Some(Money::from_cents(1235)));
        assert_eq!(Money::from_amount(-0.5), Some(Money::from_cents(-50)));
        assert_eq!(Money::from_amount(f64::INFINITY), None);
        assert_eq!(Money::from_amount(1.0e300), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::from_cents(-1).is_positive());
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_arithmetic_at_bounds_does_not_overflow() {
        let huge = Money::from_cents(i64::MAX - 1);

        assert_eq!(huge.multiply_quantity(u32::MAX).cents(), i64::MAX);
        assert_eq!((huge + Money::from_cents(5)).cents(), i64::MAX);
        let total: Money = [huge, huge].iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        assert_eq!(huge.checked_multiply_quantity(2), None);
        assert_eq!(huge.checked_add(Money::from_cents(5)), None);
    }

    #[test]
    fn test_checked_ops_stay_exact_on_wire() {
        let limit = Money::from_cents((1 << 53) - 1);
        assert!(limit.is_exact_on_wire());
        assert_eq!(limit.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(1 << 20).checked_multiply_quantity(1 << 20),
            Some(Money::from_cents(1 << 40))
        );
        assert_eq!(Money::from_cents(1 << 30).checked_multiply_quantity(1 << 23), None);
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "12.5");

        let parsed: Money = serde_json::from_str("49.99").unwrap();
        assert_eq!(parsed.cents(), 4999);

        let parsed: Money = serde_json::from_str("20").unwrap();
        assert_eq!(parsed.cents(), 2000);
    }

    /// Summing ten 0.10 amounts stays exact, unlike the float sum.
    #[test]
    fn test_no_float_drift_across_many_lines() {
        let float_sum: f64 = (0..10).map(|_| 0.1).sum();
        assert_ne!(float_sum, 1.0);

        let dime = Money::from_amount(0.1).unwrap();
        let money_sum: Money = (0..10).map(|_| dime).sum();
        assert_eq!(money_sum, Money::from_cents(100));
    }
}
