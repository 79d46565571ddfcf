//! # Draft Bill
//!
//! The bill being keyed in at the counter, before checkout consumes it.
//!
//! ## Two-Tier Visibility
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   input row (raw text)          committed items                         │
//! │   ┌────────────────────┐        ┌────────────────────────────┐          │
//! │   │ PendingRow         │ add to │ LineItem                   │          │
//! │   │ name  qty  price   │──bill─►│ LineItem                   │          │
//! │   └─────────┬──────────┘        │ ...                        │          │
//! │             │                   └──────┬──────────────┬──────┘          │
//! │   qty > 0 && price > 0                 │              │                 │
//! │             │                          │       remove last / remove     │
//! │             ▼                          ▼                                │
//! │   preview_summary()  = committed + pending     checkout_lines()         │
//! │   committed_summary() = committed only         (committed only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## States
//! `Empty → Editing → Finalizable`. A draft is `Finalizable` whenever it has
//! at least one committed item and stays editable until checkout takes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::coerce::{money_or_zero, percent_or_zero, quantity_or_zero};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::invoice::{BillProfile, BillStatement};
use crate::types::{BillAdjustment, CheckoutLine, Discount, LineItem};
use crate::validation::{validate_bill_size, validate_discount, validate_line_item};

// =============================================================================
// Pending Row
// =============================================================================

/// Which discount input the row's discount field is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    #[default]
    None,
    Percent,
    Flat,
}

/// The item input row, exactly as typed.
///
/// Every numeric field is raw text; conversion goes through `coerce` so a
/// half-typed value reads as zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct PendingRow {
    pub name: String,
    /// IMEI / barcode / part number. Blank gets a generated id on commit.
    pub identifier: String,
    pub quantity: String,
    pub unit_price: String,
    /// Blank uses the screen's default GST rate.
    #[serde(rename = "taxRatePercent")]
    pub tax_rate: String,
    pub discount_kind: DiscountKind,
    pub discount_value: String,
}

impl PendingRow {
    /// True when the row should show in the live totals.
    pub fn is_previewable(&self) -> bool {
        quantity_or_zero(&self.quantity) > 0 && money_or_zero(&self.unit_price).is_positive()
    }

    /// Reads the row as a line item.
    pub fn to_line_item(&self, profile: &BillProfile) -> LineItem {
        let identifier = match self.identifier.trim() {
            "" => Uuid::new_v4().to_string(),
            id => id.to_string(),
        };

        let tax_rate = if self.tax_rate.trim().is_empty() {
            profile.tax_rate_default()
        } else {
            percent_or_zero(&self.tax_rate)
        };

        let discount = match self.discount_kind {
            DiscountKind::None => Discount::None,
            DiscountKind::Percent => Discount::Percent(percent_or_zero(&self.discount_value)),
            DiscountKind::Flat => Discount::Flat(money_or_zero(&self.discount_value)),
        };

        LineItem::new(
            self.name.trim(),
            quantity_or_zero(&self.quantity),
            money_or_zero(&self.unit_price),
        )
        .with_identifier(identifier)
        .with_tax_rate(tax_rate)
        .with_discount(discount)
    }
}

// =============================================================================
// Draft Bill
// =============================================================================

/// Coarse state of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    /// Nothing entered.
    Empty,
    /// A row or a bill discount is being entered, nothing committed.
    Editing,
    /// At least one committed item; checkout may take it.
    Finalizable,
}

/// Outcome of "add to bill".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Promotion {
    /// The pending row became a committed item and the input row is cleared.
    Committed(LineItem),
    /// The pending row failed validation and was left in place.
    Rejected(ValidationError),
    /// There was no pending row.
    NothingPending,
}

/// A bill being drafted on one of the billing screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftBill {
    profile: BillProfile,
    committed: Vec<LineItem>,
    pending: Option<PendingRow>,
    adjustment: BillAdjustment,
    started_at: DateTime<Utc>,
}

impl DraftBill {
    /// Starts an empty draft for a screen.
    pub fn new(profile: BillProfile) -> Self {
        DraftBill {
            profile,
            committed: Vec::new(),
            pending: None,
            adjustment: Discount::None,
            started_at: Utc::now(),
        }
    }

    pub fn profile(&self) -> &BillProfile {
        &self.profile
    }

    /// Replaces the screen configuration, keeping entered items.
    pub fn set_profile(&mut self, profile: BillProfile) {
        self.profile = profile;
    }

    pub fn items(&self) -> &[LineItem] {
        &self.committed
    }

    pub fn pending(&self) -> Option<&PendingRow> {
        self.pending.as_ref()
    }

    pub fn adjustment(&self) -> &BillAdjustment {
        &self.adjustment
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn status(&self) -> DraftStatus {
        if !self.committed.is_empty() {
            DraftStatus::Finalizable
        } else if self.pending.is_some() || !self.adjustment.is_none() {
            DraftStatus::Editing
        } else {
            DraftStatus::Empty
        }
    }

    /// Replaces the input row.
    pub fn set_pending(&mut self, row: PendingRow) {
        self.pending = Some(row);
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Promotes the input row into the committed items.
    ///
    /// Rejection is not an error: the row stays as typed for correction.
    pub fn commit_pending(&mut self) -> Promotion {
        let Some(row) = self.pending.as_ref() else {
            return Promotion::NothingPending;
        };

        let item = row.to_line_item(&self.profile);
        if let Err(err) = Self::check_promotable(&item, self.committed.len()) {
            return Promotion::Rejected(err);
        }

        self.pending = None;
        self.committed.push(item.clone());
        Promotion::Committed(item)
    }

    fn check_promotable(item: &LineItem, current_items: usize) -> Result<(), ValidationError> {
        validate_line_item(item)?;
        validate_bill_size(current_items)
    }

    /// Removes the most recently committed item.
    pub fn remove_last(&mut self) -> Option<LineItem> {
        self.committed.pop()
    }

    /// Removes the committed item with `identifier`.
    pub fn remove_item(&mut self, identifier: &str) -> CoreResult<LineItem> {
        let index = self
            .committed
            .iter()
            .position(|item| item.identifier == identifier)
            .ok_or_else(|| CoreError::ItemNotFound(identifier.to_string()))?;
        Ok(self.committed.remove(index))
    }

    /// Sets the bill-level discount.
    ///
    /// Flat amounts are rounded to paise, percentages to `PERCENT_PLACES`.
    pub fn set_adjustment(&mut self, adjustment: BillAdjustment) -> Result<(), ValidationError> {
        validate_discount(&adjustment)?;
        self.adjustment = adjustment.rounded();
        Ok(())
    }

    /// Totals of the committed items only.
    pub fn committed_summary(&self) -> BillStatement {
        self.profile.compute(&self.committed, &self.adjustment)
    }

    /// Totals shown live: committed items plus the input row when its
    /// quantity and price are both positive.
    pub fn preview_summary(&self) -> BillStatement {
        match self.pending.as_ref().filter(|row| row.is_previewable()) {
            Some(row) => {
                let mut items = self.committed.clone();
                items.push(row.to_line_item(&self.profile));
                self.profile.compute(&items, &self.adjustment)
            }
            None => self.committed_summary(),
        }
    }

    /// What the persistence collaborator receives at checkout.
    pub fn checkout_lines(&self) -> CoreResult<Vec<CheckoutLine>> {
        if self.committed.is_empty() {
            return Err(CoreError::EmptyBill);
        }
        Ok(self.committed.iter().map(CheckoutLine::from).collect())
    }

    /// Discards everything entered and restarts the draft on the same screen.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.pending = None;
        self.adjustment = Discount::None;
        self.started_at = Utc::now();
    }
}

impl Default for DraftBill {
    fn default() -> Self {
        DraftBill::new(BillProfile::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
