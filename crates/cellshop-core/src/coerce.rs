//! # Input Coercion
//!
//! Turns raw form text into numbers without ever failing.
//!
//! The billing screens recompute on every keystroke, so a field may hold
//! `""`, `"-"`, `"12."` or `"abc"` at any moment. Every such value becomes
//! zero here instead of an error further down.
//!
//! ```text
//!  "12.50"  ──► 12.50        ""      ──► 0
//!  " 3 "    ──► 3            "abc"   ──► 0
//!  "1e3"    ──► 1000         "-4"    ──► 0 (money, quantity, percent)
//! ```
//!
//! Money is rounded to paise and percentages to `PERCENT_PLACES`, so every
//! amount the engine derives stays far inside `Decimal` precision.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::money::Money;
use crate::types::Percent;

/// Parses `raw` as a decimal number, or returns zero.
///
/// Signs are kept; use the typed helpers below for fields that cannot be
/// negative.
pub fn number_or_zero(raw: &str) -> Decimal {
    let raw = raw.trim();
    if raw.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}

/// Parses a quantity field.
///
/// Fractions are truncated. Zero, negative or oversized input yields 0.
pub fn quantity_or_zero(raw: &str) -> u32 {
    let value = number_or_zero(raw).trunc();
    if value <= Decimal::ZERO {
        return 0;
    }
    value.to_u32().unwrap_or(0)
}

/// Parses a rupee amount, rounded to paise. Negative input yields zero.
pub fn money_or_zero(raw: &str) -> Money {
    Money::from_decimal(number_or_zero(raw).max(Decimal::ZERO)).round_to_cents()
}

/// Parses a percentage field, rounded to `PERCENT_PLACES`. Negative input
/// yields zero.
pub fn percent_or_zero(raw: &str) -> Percent {
    Percent::new(number_or_zero(raw).max(Decimal::ZERO)).round_to_places()
}
