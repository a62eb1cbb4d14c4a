//! # Money Module
//!
//! Provides the `Money` and `RateBps` types for handling monetary values
//! and fractional rates safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 5% discount on $72.00 must be EXACTLY $3.60, every time, on every   │
//! │  machine — a breakdown that is off by one cent is a wrong charge.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                            │
//! │    7200 cents × 500 bps / 10000 = 360 cents, exactly                   │
//! │    Rounding happens ONCE per published component, never mid-stream     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nestbrew_core::money::{Money, RateBps};
//!
//! let subtotal = Money::from_cents(7200);        // $72.00
//! let discount = RateBps::from_bps(500);         // 5%
//! assert_eq!(discount.amount_of(subtotal).cents(), 360); // $3.60
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate subtraction may pass through negatives
///   while a breakdown is being assembled; published values are validated
///   non-negative at the configuration boundary instead
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use nestbrew_core::money::Money;
    ///
    /// let price = Money::from_cents(650); // $6.50
    /// assert_eq!(price.cents(), 650);
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

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use nestbrew_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(600); // $6.00
    /// assert_eq!(unit_price.multiply_quantity(12).cents(), 7200);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Clamps the value at zero (used for "spend $X more" style remainders).
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }
}

// =============================================================================
// Rate Type (Basis Points)
// =============================================================================

/// A fractional rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. A `discountFraction` of 0.05 is 500 bps;
/// a 9% tax rate is 900 bps. Integer bps keep every rate application exact
/// and reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateBps(u32);

impl RateBps {
    /// Full rate (100%) in basis points.
    pub const MAX_BPS: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        RateBps(bps)
    }

    /// Creates a rate from a percentage (for convenience in fixtures).
    pub fn from_percentage(pct: f64) -> Self {
        RateBps((pct * 100.0).round() as u32)
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

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        RateBps(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Applies this rate to an amount, rounding half-up to the cent.
    ///
    /// This is the ONLY place a rate meets an amount: every discount and
    /// tax component in a published breakdown is the result of exactly one
    /// call to this function, so cent-level output is reproducible.
    ///
    /// ## Implementation
    /// Integer math in i128 to prevent overflow:
    /// `(amount_cents * bps + 5000) / 10000` — the +5000 rounds half-up.
    ///
    /// ## Example
    /// ```rust
    /// use nestbrew_core::money::{Money, RateBps};
    ///
    /// let base = Money::from_cents(7390);  // $73.90
    /// let tax = RateBps::from_bps(900);    // 9%
    /// // $73.90 × 9% = $6.651 → rounds to $6.65
    /// assert_eq!(tax.amount_of(base).cents(), 665);
    /// ```
    pub fn amount_of(&self, amount: Money) -> Money {
        let cents = (amount.cents() as i128 * self.0 as i128 + 5000) / 10_000;
        Money::from_cents(cents as i64)
    }
}

impl Default for RateBps {
    fn default() -> Self {
        RateBps::zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle currency symbols and localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(650);
        assert_eq!(money.cents(), 650);
        assert_eq!(money.dollars(), 6);
        assert_eq!(money.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(650)), "$6.50");
        assert_eq!(format!("{}", Money::from_cents(7200)), "$72.00");
        assert_eq!(format!("{}", Money::from_cents(-360)), "-$3.60");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(360);

        assert_eq!((a + b).cents(), 1360);
        assert_eq!((a - b).cents(), 640);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_cents(-500).clamp_non_negative().cents(), 0);
        assert_eq!(Money::from_cents(500).clamp_non_negative().cents(), 500);
    }

    #[test]
    fn test_rate_amount_of_exact() {
        // $72.00 at 5% = $3.60, no rounding involved
        let subtotal = Money::from_cents(7200);
        let rate = RateBps::from_bps(500);
        assert_eq!(rate.amount_of(subtotal).cents(), 360);
    }

    #[test]
    fn test_rate_amount_of_rounds_half_up() {
        // $73.90 at 9% = $6.651 → $6.65
        assert_eq!(
            RateBps::from_bps(900).amount_of(Money::from_cents(7390)).cents(),
            665
        );
        // $0.50 at 25% = $0.125 → rounds half up to $0.13
        assert_eq!(
            RateBps::from_bps(2500).amount_of(Money::from_cents(50)).cents(),
            13
        );
    }

    #[test]
    fn test_rate_from_percentage() {
        assert_eq!(RateBps::from_percentage(5.0).bps(), 500);
        assert_eq!(RateBps::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_zero_rate_yields_zero_amount() {
        let rate = RateBps::zero();
        assert!(rate.is_zero());
        assert_eq!(rate.amount_of(Money::from_cents(9999)).cents(), 0);
    }
}
