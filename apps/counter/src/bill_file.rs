//! # Bill Files
//!
//! A whole bill described in one JSON document, replayed through the same
//! commands the screens use.
//!
//! ```json
//! {
//!   "kind": "service",
//!   "labour": "300",
//!   "billDiscount": { "kind": "flat", "value": "50" },
//!   "items": [
//!     { "name": "Display", "quantity": "1", "unitPrice": "1500", "taxRatePercent": "18" }
//!   ]
//! }
//! ```

use cellshop_core::{BillAdjustment, BillKind, Money, PendingRow};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::draft::{
    add_to_bill, get_draft, set_bill_discount, set_pending_row, start_bill, DraftResponse,
};
use crate::error::ApiError;
use crate::state::{ConfigState, DraftState};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillFile {
    #[serde(default)]
    pub kind: BillKind,
    #[serde(default)]
    pub items: Vec<PendingRow>,
    #[serde(default)]
    pub bill_discount: BillAdjustment,
    #[serde(default)]
    pub labour: Option<Money>,
    #[serde(default)]
    pub advance: Option<Money>,
}

/// A row of the file that "add to bill" refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    /// Zero-based position in `items`.
    pub index: usize,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillReport {
    pub draft: DraftResponse,
    pub rejected_rows: Vec<RejectedRow>,
}

/// Replays a bill file into `draft`.
///
/// Refused rows are collected, not fatal. An invalid bill discount is.
pub fn load_bill(
    draft: &DraftState,
    config: &ConfigState,
    bill: BillFile,
) -> Result<BillReport, ApiError> {
    start_bill(draft, config, bill.kind, bill.labour, bill.advance);
    if !bill.bill_discount.is_none() {
        set_bill_discount(draft, bill.bill_discount)?;
    }

    let mut rejected_rows = Vec::new();
    for (index, row) in bill.items.into_iter().enumerate() {
        let name = row.name.clone();
        set_pending_row(draft, row);
        if let Some(reason) = add_to_bill(draft).rejected {
            rejected_rows.push(RejectedRow {
                index,
                name,
                reason,
            });
        }
    }

    // A refused last row would otherwise linger in the preview.
    draft.with_draft_mut(|d| d.clear_pending());

    let report = BillReport {
        draft: get_draft(draft),
        rejected_rows,
    };
    info!(
        kind = ?report.draft.kind,
        items = report.draft.items.len(),
        rejected = report.rejected_rows.len(),
        "Bill file loaded"
    );
    Ok(report)
}
