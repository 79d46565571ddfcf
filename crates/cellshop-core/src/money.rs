//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts exactly.
//!
//! ## Why Fixed-Point Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    (a + b) + c != a + (c + b)       ❌ item order changes the bill      │
//! │                                                                         │
//! │  GST is charged at 18%, 12%, 5%, sometimes 2.5%:                       │
//! │    ₹180.00 × 18% = ₹32.40, split ₹16.20 CGST + ₹16.20 SGST             │
//! │    ₹0.03  × 18% = ₹0.0054, split must still add back up EXACTLY        │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 fixed point (rust_decimal)                      │
//! │    No rounding inside the engine. Sums are exact and commutative,      │
//! │    halves are exact. Rounding to paise happens only at the edges       │
//! │    (`cents()`, `Display`).                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cellshop_core::money::Money;
//!
//! let price = Money::from_cents(10_050); // ₹100.50
//! let doubled = price * 2;               // ₹201.00
//! let total = doubled + Money::from_cents(500);
//! assert_eq!(total.cents(), 20_600);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Percent;

/// Decimal places of the minor currency unit (paise).
pub const MINOR_UNIT_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in rupees, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: intermediate values such as `subTotal - billDiscount`
///   may go negative before the engine clamps them
/// - **Saturating arithmetic**: a half-typed "99999999999999" never panics the
///   live recompute, it just saturates
/// - **Serialized as a string**: `"32.4"` survives JSON without float drift
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► LineTotals.gross ──► net ──► tax ──► line_total
///                                                  │
///                                                  ▼
///                          BillSummary.sub_total / tax_total / grand_total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ```rust
    /// use cellshop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // ₹10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MINOR_UNIT_PLACES))
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -₹5.50. Out-of-range values saturate.
    #[inline]
    pub fn from_major_minor(major: i64, minor: i64) -> Self {
        let major_paise = major.saturating_mul(100);
        if major < 0 {
            Money::from_cents(major_paise.saturating_sub(minor))
        } else {
            Money::from_cents(major_paise.saturating_add(minor))
        }
    }

    /// Wraps an exact decimal rupee amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact rupee amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the value in whole paise, rounding half away from zero.
    ///
    /// This is the hand-off value for collaborators that store integers.
    /// Values beyond the `i64` range saturate.
    ///
    /// ```rust
    /// use cellshop_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let tax = Money::from_decimal(Decimal::new(54, 4)); // ₹0.0054
    /// assert_eq!(tax.cents(), 1);
    /// ```
    pub fn cents(&self) -> i64 {
        let paise = self
            .0
            .saturating_mul(Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        paise.to_i64().unwrap_or(if paise.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    /// Returns this amount rounded to whole paise (half away from zero).
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(MINOR_UNIT_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Clamps negative amounts to zero.
    ///
    /// This is the `max(x, 0)` used for line net amounts and for the grand
    /// total after the bill-level discount.
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        Money(self.0.max(Decimal::ZERO))
    }

    /// Returns exactly half of this amount. No rounding is applied.
    ///
    /// ```rust
    /// use cellshop_core::money::Money;
    ///
    /// let odd = Money::from_cents(3); // ₹0.03
    /// assert_eq!(odd.half() + odd.half(), odd);
    /// ```
    #[inline]
    pub fn half(&self) -> Self {
        Money(self.0 / Decimal::TWO)
    }

    /// Returns `rate` percent of this amount, unrounded.
    ///
    /// Used for tax (`net × rate / 100`) and percentage discounts
    /// (`gross × value / 100`).
    ///
    /// ```rust
    /// use cellshop_core::money::Money;
    /// use cellshop_core::types::Percent;
    ///
    /// let net = Money::from_cents(18_000); // ₹180.00
    /// let tax = net.percent_of(Percent::from_bps(1800)); // 18%
    /// assert_eq!(tax, Money::from_cents(3_240));
    /// ```
    pub fn percent_of(&self, rate: Percent) -> Money {
        Money(
            self.0
                .saturating_mul(rate.value())
                .checked_div(Decimal::ONE_HUNDRED)
                .unwrap_or(Decimal::ZERO),
        )
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use cellshop_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(29_900); // ₹299.00 tempered glass
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 89_700);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the amount to two decimal places, without a currency symbol.
///
/// The symbol is a shop setting; see the counter app's `format_currency`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_to_cents().0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

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
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
