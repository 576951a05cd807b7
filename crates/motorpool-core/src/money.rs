//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! `DiscountRate` type for the multi-booking discount.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    A daily rate of 40.00 is stored as 4000 cents.                      │
//! │    Every rate, gross, discount and net in the system is an i64 of      │
//! │    cents; only display code ever formats decimals.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, FleetResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate settlement math may subtract
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use motorpool_core::Money;
    ///
    /// let rate = Money::from_cents(4000); // 40.00 per day
    /// assert_eq!(rate.cents(), 4000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_units(&self) -> i64 {
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
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable decimal format.
/// Currency-agnostic: symbol and localization are presentation concerns.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.major_units().abs(),
            self.minor_units()
        )
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

/// Multiplication by integer (e.g., rate × rental days).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators (used by settlement to total prices).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the usual multi-booking tier)
///
/// The rate is range-checked at construction: values above 10000 bps (100%)
/// are unrepresentable, so settlement never has to re-validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    ///
    /// Fails with [`FleetError::InvalidDiscount`] for rates above 100%.
    ///
    /// ## Example
    /// ```rust
    /// use motorpool_core::DiscountRate;
    ///
    /// let rate = DiscountRate::from_bps(1000).unwrap(); // 10%
    /// assert_eq!(rate.bps(), 1000);
    /// assert!(DiscountRate::from_bps(10001).is_err());
    /// ```
    pub fn from_bps(bps: u32) -> FleetResult<Self> {
        if bps > 10_000 {
            return Err(FleetError::InvalidDiscount { bps });
        }
        Ok(DiscountRate(bps))
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

    /// Zero discount rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes the discount amount on a gross total.
    ///
    /// ## Implementation
    /// Integer math with rounding: `(gross_cents * bps + 5000) / 10000`,
    /// computed over i128 to prevent overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use motorpool_core::{DiscountRate, Money};
    ///
    /// let gross = Money::from_cents(10_000); // 100.00
    /// let rate = DiscountRate::from_bps(1000).unwrap(); // 10%
    /// assert_eq!(rate.discount_on(gross).cents(), 1000); // 10.00
    /// ```
    pub fn discount_on(&self, gross: Money) -> Money {
        let cents = (gross.cents() as i128 * self.0 as i128 + 5000) / 10_000;
        Money::from_cents(cents as i64)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
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
        let money = Money::from_cents(4099);
        assert_eq!(money.cents(), 4099);
        assert_eq!(money.major_units(), 40);
        assert_eq!(money.minor_units(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(4099)), "40.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
        c -= b;
        assert_eq!(c.cents(), 1000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [4000, 6000, 500]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 10_500);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }

    #[test]
    fn test_discount_rate_range() {
        assert!(DiscountRate::from_bps(0).is_ok());
        assert!(DiscountRate::from_bps(10_000).is_ok());

        let err = DiscountRate::from_bps(10_001).unwrap_err();
        assert!(matches!(
            err,
            FleetError::InvalidDiscount { bps: 10_001 }
        ));
    }

    #[test]
    fn test_discount_on_gross() {
        let rate = DiscountRate::from_bps(1000).unwrap(); // 10%
        assert_eq!(rate.discount_on(Money::from_cents(10_000)).cents(), 1000);

        // Rounding: 0.15% of 10.00 = 0.015 → rounds to 0.02
        let rate = DiscountRate::from_bps(15).unwrap();
        assert_eq!(rate.discount_on(Money::from_cents(1000)).cents(), 2);
    }

    #[test]
    fn test_full_discount() {
        let rate = DiscountRate::from_bps(10_000).unwrap(); // 100%
        let gross = Money::from_cents(5000);
        assert_eq!(rate.discount_on(gross), gross);
    }
}
