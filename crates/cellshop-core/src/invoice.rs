//! # Invoice Computation Engine
//!
//! Turns a list of line items plus one bill-level discount into a
//! [`BillSummary`]. Pure and cheap: the screens call it on every keystroke.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  per line                                                               │
//! │    gross     = quantity × unit_price                                    │
//! │    discount  = gross × pct / 100        | flat value (not × quantity)   │
//! │    net       = max(gross - discount, 0)                                 │
//! │    tax       = net × rate / 100                                         │
//! │    total     = net + tax                                                │
//! │                                                                         │
//! │  per bill                                                               │
//! │    sub_total       = Σ net                                              │
//! │    bill_discount   = sub_total × pct / 100  | flat value (NOT clamped)  │
//! │    tax_total       = Σ tax                  (NOT re-based on discount)  │
//! │    tax_split       = (tax_total / 2, tax_total / 2)                     │
//! │    grand_total     = max(sub_total - bill_discount, 0) + tax_total      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax stays anchored to each line's own net amount. The bill-level discount
//! reduces the taxable sub-total shown to the customer but never the tax.
//!
//! ## Screens
//! The sale bill, service bill and advance receipt share this engine through
//! [`BillProfile`], which decides which inputs each screen feeds in.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{
    BillAdjustment, BillKind, BillSummary, Discount, LineItem, LineTotals, Percent, TaxSplit,
};

/// Identifier used for the synthesized labour line on service bills.
pub const LABOUR_IDENTIFIER: &str = "LABOUR";

// =============================================================================
// Engine
// =============================================================================

/// Computes the amounts of a single line.
///
/// Inputs are assumed valid; a discount bigger than the gross amount clamps
/// the net (and therefore the tax) to zero.
///
/// ```rust
/// use cellshop_core::invoice::compute_line_total;
/// use cellshop_core::{Discount, LineItem, Money, Percent};
///
/// let case = LineItem::new("Case", 2, Money::from_cents(10_000))
///     .with_tax_rate(Percent::from_bps(1800))
///     .with_discount(Discount::Percent(Percent::from_bps(1000)));
///
/// let totals = compute_line_total(&case);
/// assert_eq!(totals.net_amount, Money::from_cents(18_000));
/// assert_eq!(totals.tax_amount, Money::from_cents(3_240));
/// assert_eq!(totals.line_total, Money::from_cents(21_240));
/// ```
pub fn compute_line_total(item: &LineItem) -> LineTotals {
    let gross = item.gross();
    let discount_amount = item.discount.amount_against(gross);
    let net_amount = (gross - discount_amount).clamp_non_negative();
    let tax_amount = net_amount.percent_of(item.tax_rate);

    LineTotals {
        gross,
        discount_amount,
        net_amount,
        tax_amount,
        line_total: net_amount + tax_amount,
    }
}

/// Computes the summary of a bill.
///
/// Item order never affects the result: every accumulation is an exact
/// decimal sum.
pub fn compute_bill_summary(items: &[LineItem], adjustment: &BillAdjustment) -> BillSummary {
    let (sub_total, item_discount_total, tax_total) = items.iter().map(compute_line_total).fold(
        (Money::zero(), Money::zero(), Money::zero()),
        |(sub, disc, tax), line| {
            (
                sub + line.net_amount,
                disc + line.discount_amount,
                tax + line.tax_amount,
            )
        },
    );

    let bill_discount_amount = adjustment.amount_against(sub_total);
    let grand_total = (sub_total - bill_discount_amount).clamp_non_negative() + tax_total;

    BillSummary {
        sub_total,
        item_discount_total,
        bill_discount_amount,
        tax_total,
        tax_split: TaxSplit::halve(tax_total),
        grand_total,
    }
}

// =============================================================================
// Bill Profile
// =============================================================================

/// A flat labour charge added to service bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Labour {
    pub charge: Money,
    #[serde(rename = "taxRatePercent")]
    pub tax_rate: Percent,
}

/// Per-screen configuration of the engine.
///
/// ```rust
/// use cellshop_core::invoice::BillProfile;
/// use cellshop_core::{Discount, LineItem, Money, Percent};
///
/// let profile = BillProfile::service()
///     .with_labour(Money::from_cents(30_000), Percent::from_bps(1800));
///
/// let screen_guard = LineItem::new("Display", 1, Money::from_cents(150_000))
///     .with_tax_rate(Percent::from_bps(1800));
///
/// let statement = profile.compute(&[screen_guard], &Discount::None);
/// assert_eq!(statement.summary.sub_total, Money::from_cents(180_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillProfile {
    kind: BillKind,
    line_discounts: bool,
    bill_discount: bool,
    default_tax_rate: Percent,
    labour: Option<Labour>,
    advance_paid: Money,
}

impl BillProfile {
    fn base(kind: BillKind) -> Self {
        BillProfile {
            kind,
            line_discounts: true,
            bill_discount: true,
            default_tax_rate: Percent::zero(),
            labour: None,
            advance_paid: Money::zero(),
        }
    }

    /// Counter sale: line and bill discounts allowed.
    pub fn sale() -> Self {
        Self::base(BillKind::Sale)
    }

    /// Repair bill: parts as lines, a labour addend, bill discount only.
    pub fn service() -> Self {
        Self::base(BillKind::Service).allow_line_discount(false)
    }

    /// Advance receipt: booked items at list price, less the advance taken.
    pub fn advance_receipt() -> Self {
        Self::base(BillKind::AdvanceReceipt)
            .allow_line_discount(false)
            .allow_bill_discount(false)
    }

    /// Returns the default profile for a screen.
    pub fn for_kind(kind: BillKind) -> Self {
        match kind {
            BillKind::Sale => Self::sale(),
            BillKind::Service => Self::service(),
            BillKind::AdvanceReceipt => Self::advance_receipt(),
        }
    }

    pub fn allow_line_discount(mut self, allowed: bool) -> Self {
        self.line_discounts = allowed;
        self
    }

    pub fn allow_bill_discount(mut self, allowed: bool) -> Self {
        self.bill_discount = allowed;
        self
    }

    /// GST rate used for rows whose rate field is left blank.
    ///
    /// Clamped into `0..=100`.
    pub fn default_tax_rate(mut self, rate: Percent) -> Self {
        self.default_tax_rate = rate.clamp_to_range().round_to_places();
        self
    }

    /// Adds a labour charge. A zero charge removes it.
    ///
    /// The charge is rounded to paise and the rate clamped into `0..=100`:
    /// the labour line never passes through item validation, and a negative
    /// rate would drive the grand total below zero.
    pub fn with_labour(mut self, charge: Money, tax_rate: Percent) -> Self {
        let charge = charge.round_to_cents();
        self.labour = if charge.is_positive() {
            Some(Labour {
                charge,
                tax_rate: tax_rate.clamp_to_range().round_to_places(),
            })
        } else {
            None
        };
        self
    }

    /// Records an advance already paid against this bill, rounded to paise.
    pub fn with_advance(mut self, advance: Money) -> Self {
        self.advance_paid = advance.round_to_cents().clamp_non_negative();
        self
    }

    pub fn kind(&self) -> BillKind {
        self.kind
    }

    pub fn tax_rate_default(&self) -> Percent {
        self.default_tax_rate
    }

    pub fn line_discounts_allowed(&self) -> bool {
        self.line_discounts
    }

    pub fn bill_discount_allowed(&self) -> bool {
        self.bill_discount
    }

    pub fn labour(&self) -> Option<Labour> {
        self.labour
    }

    pub fn advance_paid(&self) -> Money {
        self.advance_paid
    }

    /// Builds the line list this screen feeds into the engine.
    ///
    /// Line discounts are dropped when the screen does not offer them, and
    /// the labour charge is appended as a single line.
    pub fn effective_items(&self, items: &[LineItem]) -> Vec<LineItem> {
        let mut effective: Vec<LineItem> = items
            .iter()
            .map(|item| {
                if self.line_discounts {
                    item.clone()
                } else {
                    item.clone().with_discount(Discount::None)
                }
            })
            .collect();

        if let Some(labour) = self.labour {
            effective.push(
                LineItem::new("Labour charge", 1, labour.charge)
                    .with_identifier(LABOUR_IDENTIFIER)
                    .with_tax_rate(labour.tax_rate),
            );
        }

        effective
    }

    /// Runs the engine with this screen's configuration.
    pub fn compute(&self, items: &[LineItem], adjustment: &BillAdjustment) -> BillStatement {
        let effective = self.effective_items(items);
        let adjustment = if self.bill_discount {
            *adjustment
        } else {
            Discount::None
        };

        let summary = compute_bill_summary(&effective, &adjustment);
        let labour = self.labour.map(|_| {
            effective
                .last()
                .map(compute_line_total)
                .unwrap_or_default()
        });

        BillStatement {
            kind: self.kind,
            balance_due: (summary.grand_total - self.advance_paid).clamp_non_negative(),
            advance_paid: self.advance_paid,
            labour,
            summary,
        }
    }
}

impl Default for BillProfile {
    fn default() -> Self {
        Self::sale()
    }
}

/// A bill summary as one screen presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillStatement {
    pub kind: BillKind,
    pub summary: BillSummary,
    /// Totals of the labour line, when the screen has one.
    pub labour: Option<LineTotals>,
    pub advance_paid: Money,
    /// max(grand_total - advance_paid, 0)
    pub balance_due: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn money(value: Decimal) -> Money {
        Money::from_decimal(value)
    }

    fn pct(value: Decimal) -> Percent {
        Percent::new(value)
    }

    fn case() -> LineItem {
        LineItem::new("Case", 2, money(dec!(100)))
            .with_tax_rate(pct(dec!(18)))
            .with_discount(Discount::Percent(pct(dec!(10))))
    }

    #[test]
    fn test_line_with_percent_discount() {
        let totals = compute_line_total(&case());
        assert_eq!(totals.gross, money(dec!(200)));
        assert_eq!(totals.discount_amount, money(dec!(20)));
        assert_eq!(totals.net_amount, money(dec!(180)));
        assert_eq!(totals.tax_amount, money(dec!(32.4)));
        assert_eq!(totals.line_total, money(dec!(212.4)));
    }

    #[test]
    fn test_single_item_bill() {
        let summary = compute_bill_summary(&[case()], &Discount::None);
        assert_eq!(summary.sub_total, money(dec!(180)));
        assert_eq!(summary.item_discount_total, money(dec!(20)));
        assert_eq!(summary.bill_discount_amount, Money::zero());
        assert_eq!(summary.tax_total, money(dec!(32.4)));
        assert_eq!(summary.grand_total, money(dec!(212.4)));
        assert_eq!(summary.tax_split.central, money(dec!(16.2)));
        assert_eq!(summary.tax_split.state, money(dec!(16.2)));
    }

    #[test]
    fn test_flat_discount_larger_than_gross_clamps_line() {
        let charger = LineItem::new("Charger", 3, money(dec!(100)))
            .with_tax_rate(pct(dec!(28)))
            .with_discount(Discount::Flat(money(dec!(500))));

        let totals = compute_line_total(&charger);
        assert_eq!(totals.gross, money(dec!(300)));
        assert_eq!(totals.discount_amount, money(dec!(500)));
        assert_eq!(totals.net_amount, Money::zero());
        assert_eq!(totals.tax_amount, Money::zero());

        let summary = compute_bill_summary(&[case(), charger], &Discount::None);
        assert_eq!(summary.sub_total, money(dec!(180)));
        assert_eq!(summary.tax_total, money(dec!(32.4)));
        assert_eq!(summary.item_discount_total, money(dec!(520)));
    }

    #[test]
    fn test_flat_line_discount_is_not_scaled_by_quantity() {
        let item = LineItem::new("Cable", 4, money(dec!(50)))
            .with_discount(Discount::Flat(money(dec!(20))));
        assert_eq!(compute_line_total(&item).net_amount, money(dec!(180)));
    }

    #[test]
    fn test_bill_flat_discount_is_not_clamped_but_grand_total_is() {
        let summary = compute_bill_summary(&[case()], &Discount::Flat(money(dec!(1000))));
        assert_eq!(summary.bill_discount_amount, money(dec!(1000)));
        assert_eq!(summary.grand_total, summary.tax_total);
        assert_eq!(summary.grand_total, money(dec!(32.4)));
    }

    #[test]
    fn test_bill_discount_does_not_reduce_tax() {
        let summary = compute_bill_summary(&[case()], &Discount::Percent(pct(dec!(50))));
        assert_eq!(summary.bill_discount_amount, money(dec!(90)));
        assert_eq!(summary.tax_total, money(dec!(32.4)));
        assert_eq!(summary.grand_total, money(dec!(122.4)));
    }

    #[test]
    fn test_empty_bill_is_all_zero() {
        let summary = compute_bill_summary(&[], &Discount::None);
        assert_eq!(summary, BillSummary::default());
        assert_eq!(summary.tax_split, TaxSplit::default());
    }

    #[test]
    fn test_sale_profile_matches_raw_engine() {
        let items = vec![case()];
        let adj = Discount::Flat(money(dec!(30)));
        let statement = BillProfile::sale().compute(&items, &adj);
        assert_eq!(statement.summary, compute_bill_summary(&items, &adj));
        assert_eq!(statement.balance_due, statement.summary.grand_total);
        assert!(statement.labour.is_none());
    }

    #[test]
    fn test_service_profile_adds_labour_and_drops_line_discount() {
        let profile = BillProfile::service().with_labour(money(dec!(300)), pct(dec!(18)));
        let statement = profile.compute(&[case()], &Discount::None);

        // Case without its 10% line discount: net 200, tax 36.
        // Labour: net 300, tax 54.
        assert_eq!(statement.summary.sub_total, money(dec!(500)));
        assert_eq!(statement.summary.item_discount_total, Money::zero());
        assert_eq!(statement.summary.tax_total, money(dec!(90)));
        assert_eq!(statement.summary.grand_total, money(dec!(590)));

        let labour = statement.labour.unwrap();
        assert_eq!(labour.line_total, money(dec!(354)));
    }

    #[test]
    fn test_zero_labour_is_no_labour() {
        let profile = BillProfile::service().with_labour(Money::zero(), pct(dec!(18)));
        assert!(profile.labour().is_none());
        assert_eq!(profile.effective_items(&[case()]).len(), 1);
    }

    #[test]
    fn test_labour_rate_is_clamped() {
        let profile = BillProfile::service().with_labour(money(dec!(100)), pct(dec!(-500)));
        assert_eq!(profile.labour().map(|l| l.tax_rate), Some(Percent::zero()));

        let statement = profile.compute(&[], &Discount::None);
        assert_eq!(statement.summary.tax_total, Money::zero());
        assert_eq!(statement.summary.grand_total, money(dec!(100)));
        assert!(!statement.summary.grand_total.is_negative());

        let profile = BillProfile::service().with_labour(money(dec!(100)), pct(dec!(250)));
        let statement = profile.compute(&[], &Discount::None);
        assert_eq!(statement.summary.tax_total, money(dec!(100)));
    }

    #[test]
    fn test_profile_amounts_are_rounded_to_paise() {
        let profile = BillProfile::service()
            .with_labour(money(dec!(0.0000000000000000000000000001)), pct(dec!(100)));
        assert!(profile.labour().is_none());

        let profile = BillProfile::advance_receipt().with_advance(money(dec!(99.999)));
        assert_eq!(profile.advance_paid(), money(dec!(100)));
    }

    #[test]
    fn test_default_tax_rate_is_clamped() {
        let profile = BillProfile::sale().default_tax_rate(pct(dec!(-18)));
        assert_eq!(profile.tax_rate_default(), Percent::zero());
    }

    #[test]
    fn test_tax_split_adds_up_for_max_scale_price() {
        let tiny = LineItem::new("Tiny", 1, money(Decimal::new(1, 28)))
            .with_tax_rate(pct(dec!(100)));
        let summary = compute_bill_summary(&[tiny], &Discount::None);
        assert_eq!(summary.tax_split.total(), summary.tax_total);
    }

    #[test]
    fn test_advance_receipt_ignores_discounts_and_tracks_balance() {
        let profile = BillProfile::advance_receipt().with_advance(money(dec!(100)));
        let statement = profile.compute(&[case()], &Discount::Percent(pct(dec!(50))));

        assert_eq!(statement.summary.bill_discount_amount, Money::zero());
        assert_eq!(statement.summary.grand_total, money(dec!(236)));
        assert_eq!(statement.advance_paid, money(dec!(100)));
        assert_eq!(statement.balance_due, money(dec!(136)));
    }

    #[test]
    fn test_advance_larger_than_total_leaves_zero_balance() {
        let profile = BillProfile::advance_receipt().with_advance(money(dec!(5000)));
        let statement = profile.compute(&[case()], &Discount::None);
        assert_eq!(statement.balance_due, Money::zero());
    }

    #[test]
    fn test_for_kind() {
        assert_eq!(BillProfile::for_kind(BillKind::Service).kind(), BillKind::Service);
        assert!(!BillProfile::for_kind(BillKind::Service).line_discounts_allowed());
        assert!(!BillProfile::for_kind(BillKind::AdvanceReceipt).bill_discount_allowed());
        assert_eq!(BillProfile::default(), BillProfile::sale());
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn arb_discount() -> impl Strategy<Value = Discount> {
        prop_oneof![
            Just(Discount::None),
            (0i64..=10_000).prop_map(|bps| Discount::Percent(Percent::new(Decimal::new(bps, 2)))),
            (0i64..5_000_000).prop_map(|cents| Discount::Flat(Money::from_cents(cents))),
        ]
    }

    fn arb_item() -> impl Strategy<Value = LineItem> {
        (1u32..=999, 0i64..10_000_000, 0u32..=2800, arb_discount()).prop_map(
            |(qty, cents, bps, discount)| {
                LineItem::new("Item", qty, Money::from_cents(cents))
                    .with_tax_rate(Percent::from_bps(bps))
                    .with_discount(discount)
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Any permutation of the items yields the identical summary.
        #[test]
        fn summary_is_order_independent(
            (items, shuffled) in prop::collection::vec(arb_item(), 0..12)
                .prop_flat_map(|items| {
                    let shuffled = Just(items.clone()).prop_shuffle();
                    (Just(items), shuffled)
                }),
            adj in arb_discount(),
        ) {
            prop_assert_eq!(
                compute_bill_summary(&items, &adj),
                compute_bill_summary(&shuffled, &adj)
            );
        }

        /// A discount at or above gross zeroes both net and tax.
        #[test]
        fn oversized_discount_clamps_net_and_tax(item in arb_item(), extra in 0i64..1_000_000) {
            let flat = item.gross() + Money::from_cents(extra);
            let totals = compute_line_total(&item.with_discount(Discount::Flat(flat)));
            prop_assert_eq!(totals.net_amount, Money::zero());
            prop_assert_eq!(totals.tax_amount, Money::zero());
            prop_assert_eq!(totals.line_total, Money::zero());
        }

        /// The two tax halves always add back to the tax total exactly.
        #[test]
        fn tax_split_adds_up(items in prop::collection::vec(arb_item(), 0..12), adj in arb_discount()) {
            let summary = compute_bill_summary(&items, &adj);
            prop_assert_eq!(summary.tax_split.central, summary.tax_split.state);
            prop_assert_eq!(summary.tax_split.total(), summary.tax_total);
        }

        /// The grand total is never negative and never below the tax total.
        #[test]
        fn grand_total_never_negative(items in prop::collection::vec(arb_item(), 0..12), adj in arb_discount()) {
            let summary = compute_bill_summary(&items, &adj);
            prop_assert!(!summary.grand_total.is_negative());
            prop_assert!(summary.grand_total >= summary.tax_total);
        }
    }
}
