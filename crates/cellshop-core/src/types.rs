//! # Domain Types
//!
//! Core domain types shared by the three billing screens.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │    Discount     │   │   BillSummary   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  identifier     │   │  None           │   │  sub_total      │       │
//! │  │  name           │   │  Percent(0-100) │   │  item_discount  │       │
//! │  │  quantity       │   │  Flat(₹)        │   │  bill_discount  │       │
//! │  │  unit_price     │   └─────────────────┘   │  tax_total      │       │
//! │  │  tax_rate       │                         │  tax_split      │       │
//! │  │  discount       │   ┌─────────────────┐   │  grand_total    │       │
//! │  └─────────────────┘   │    Percent      │   └─────────────────┘       │
//! │                        │  18 = 18%       │                              │
//! │  ┌─────────────────┐   └─────────────────┘   ┌─────────────────┐       │
//! │  │  CheckoutLine   │                         │    BillKind     │       │
//! │  │  name, id, qty  │                         │  Sale / Service │       │
//! │  └─────────────────┘                         │  AdvanceReceipt │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Percent
// =============================================================================

/// Decimal places kept for percentages entered at the counter (`2.5`, `0.25`).
pub const PERCENT_PLACES: u32 = 4;

/// A percentage, e.g. `18` for 18% GST or `10` for 10% off.
///
/// Held as an exact decimal so fractional slabs such as 2.5% stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(#[ts(type = "string")] Decimal);

impl Percent {
    /// Creates a percentage from its decimal value (`18` = 18%).
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Percent(value)
    }

    /// Creates a percentage from basis points (1800 = 18%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        Percent(Decimal::new(i64::from(bps), 2))
    }

    /// Returns the percentage value (`18` for 18%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(Decimal::ZERO)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to `PERCENT_PLACES` decimal places (half away from zero).
    pub fn round_to_places(&self) -> Percent {
        Percent(
            self.0
                .round_dp_with_strategy(PERCENT_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Clamps into `0..=100`.
    ///
    /// A rate outside that range would make tax negative or exceed the
    /// amount it is charged on.
    pub fn clamp_to_range(self) -> Percent {
        Percent(self.0.max(Decimal::ZERO).min(Decimal::ONE_HUNDRED))
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A discount, either on one line or on the whole bill.
///
/// ## Wire Format
/// ```json
/// { "kind": "none" }
/// { "kind": "percent", "value": "10" }
/// { "kind": "flat", "value": "500" }
/// ```
///
/// A flat discount is a fixed deduction for the whole line (or bill); it is
/// never scaled by quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// No discount.
    None,
    /// Percentage of the amount being discounted (0..=100).
    Percent(Percent),
    /// Fixed rupee deduction.
    Flat(Money),
}

impl Default for Discount {
    fn default() -> Self {
        Discount::None
    }
}

impl Discount {
    /// Returns the discount amount against `base`.
    ///
    /// Flat discounts are returned as-is; callers decide whether to clamp.
    pub fn amount_against(&self, base: Money) -> Money {
        match self {
            Discount::None => Money::zero(),
            Discount::Percent(pct) => base.percent_of(*pct),
            Discount::Flat(value) => *value,
        }
    }

    /// Rounds a flat amount to paise and a percentage to `PERCENT_PLACES`.
    pub fn rounded(&self) -> Discount {
        match self {
            Discount::None => Discount::None,
            Discount::Percent(pct) => Discount::Percent(pct.round_to_places()),
            Discount::Flat(value) => Discount::Flat(value.round_to_cents()),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Discount::None)
    }
}

/// The single bill-level discount of a bill.
pub type BillAdjustment = Discount;

// =============================================================================
// Line Item
// =============================================================================

/// One product, part or service entry on a bill.
///
/// ## Invariants
/// Items in a bill's committed list always have a non-empty name, a quantity
/// of at least 1 and a positive price (see `validation::validate_line_item`).
/// The engine itself does not re-check them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Stock identifier (IMEI, barcode, part number) or a generated UUID.
    pub identifier: String,

    /// Display name shown on the bill.
    pub name: String,

    /// Units sold.
    pub quantity: u32,

    /// Price per unit, before discount and tax.
    pub unit_price: Money,

    /// GST rate applied to the line's net amount.
    #[serde(rename = "taxRatePercent")]
    pub tax_rate: Percent,

    /// Per-line discount.
    #[serde(default)]
    pub discount: Discount,
}

impl LineItem {
    /// Creates an untaxed, undiscounted line with a generated identifier.
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        LineItem {
            identifier: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity,
            unit_price,
            tax_rate: Percent::zero(),
            discount: Discount::None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn with_tax_rate(mut self, rate: Percent) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    /// Returns the quantity × unit price, before any discount.
    #[inline]
    pub fn gross(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// Amounts derived from one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineTotals {
    /// quantity × unit price
    pub gross: Money,
    /// Discount deducted from gross (may exceed gross)
    pub discount_amount: Money,
    /// max(gross - discount, 0)
    pub net_amount: Money,
    /// net × tax rate
    pub tax_amount: Money,
    /// net + tax
    pub line_total: Money,
}

// =============================================================================
// Bill Summary
// =============================================================================

/// Tax total divided into its two co-equal components (CGST + SGST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxSplit {
    /// Central component, half of the tax total.
    pub central: Money,
    /// State component, the remainder. `central + state == total` always.
    pub state: Money,
}

impl TaxSplit {
    /// Splits `total` into two halves that add back up to it exactly.
    ///
    /// With amounts at minor-unit or percent scale the halves are equal. If a
    /// half would need more precision than `Decimal` holds, the state
    /// component absorbs the rounding.
    pub fn halve(total: Money) -> Self {
        let central = total.half();
        TaxSplit {
            central,
            state: total - central,
        }
    }

    #[inline]
    pub fn total(&self) -> Money {
        self.central + self.state
    }
}

/// Financial summary of a bill.
///
/// A pure projection of the current items and bill discount. It has no
/// identity and is recomputed on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    /// Sum of line net amounts (after line discounts, before tax).
    pub sub_total: Money,
    /// Sum of per-line discount amounts.
    pub item_discount_total: Money,
    /// Bill-level discount against `sub_total`, not clamped.
    pub bill_discount_amount: Money,
    /// Sum of per-line tax.
    pub tax_total: Money,
    /// `tax_total` in two exact halves.
    pub tax_split: TaxSplit,
    /// max(sub_total - bill_discount_amount, 0) + tax_total
    pub grand_total: Money,
}

// =============================================================================
// Bill Kind
// =============================================================================

/// The billing screen a bill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BillKind {
    /// Counter sale of handsets and accessories.
    Sale,
    /// Repair job: parts as lines plus a labour charge.
    Service,
    /// Advance taken against a booked item.
    AdvanceReceipt,
}

impl Default for BillKind {
    fn default() -> Self {
        BillKind::Sale
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// What the persistence collaborator receives per committed line.
///
/// Price and tax are deliberately absent: the server prices the sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub name: String,
    pub identifier: String,
    pub quantity: u32,
}

impl From<&LineItem> for CheckoutLine {
    fn from(item: &LineItem) -> Self {
        CheckoutLine {
            name: item.name.clone(),
            identifier: item.identifier.clone(),
            quantity: item.quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
