//! # Draft Commands
//!
//! The actions of the three billing screens.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  set_pending_row  ┌──────────┐  add_to_bill  ┌─────────┐  │
//! │  │  Empty   │──────────────────►│ Editing  │──────────────►│Finalize-│  │
//! │  │          │◄──────────────────│          │◄──────────────│  able   │  │
//! │  └──────────┘    clear_draft    └──────────┘ remove_last / └─────────┘  │
//! │                                              remove_bill_item    │      │
//! │                                                                  ▼      │
//! │                                                        checkout (checkout.rs)
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the whole draft so the screen re-renders from one
//! response.

use cellshop_core::{
    BillAdjustment, BillKind, BillStatement, DraftBill, DraftStatus, LineItem, Money,
    PendingRow, Promotion,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::{ConfigState, DraftState};

/// The draft as the screen renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub kind: BillKind,
    pub status: DraftStatus,
    pub started_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub pending: Option<PendingRow>,
    pub bill_discount: BillAdjustment,
    /// Live totals: committed items plus a previewable input row.
    pub preview: BillStatement,
    /// Totals of committed items only.
    pub committed: BillStatement,
    /// Why the last "add to bill" was refused, if it was.
    pub rejected: Option<String>,
}

impl From<&DraftBill> for DraftResponse {
    fn from(draft: &DraftBill) -> Self {
        DraftResponse {
            kind: draft.profile().kind(),
            status: draft.status(),
            started_at: draft.started_at(),
            items: draft.items().to_vec(),
            pending: draft.pending().cloned(),
            bill_discount: *draft.adjustment(),
            preview: draft.preview_summary(),
            committed: draft.committed_summary(),
            rejected: None,
        }
    }
}

/// Gets the current draft.
pub fn get_draft(draft: &DraftState) -> DraftResponse {
    debug!("get_draft command");
    draft.with_draft(|d| DraftResponse::from(d))
}

/// Starts a fresh bill on one of the screens.
///
/// ## Arguments
/// * `kind` - Sale, service bill or advance receipt
/// * `labour` - Labour charge; ignored on anything but a service bill
/// * `advance` - Advance already received (advance receipts)
pub fn start_bill(
    draft: &DraftState,
    config: &ConfigState,
    kind: BillKind,
    labour: Option<Money>,
    advance: Option<Money>,
) -> DraftResponse {
    debug!(?kind, "start_bill command");

    let mut profile = config.profile_for(kind);
    match labour {
        Some(charge) if kind == BillKind::Service => {
            profile = profile.with_labour(charge, config.labour_gst);
        }
        Some(charge) => warn!(?kind, %charge, "Labour charge ignored outside a service bill"),
        None => {}
    }
    if let Some(advance) = advance {
        profile = profile.with_advance(advance);
    }

    draft.with_draft_mut(|d| {
        d.clear();
        d.set_profile(profile);
        DraftResponse::from(&*d)
    })
}

/// Replaces the item input row. Called on every keystroke.
pub fn set_pending_row(draft: &DraftState, row: PendingRow) -> DraftResponse {
    debug!(name = %row.name, "set_pending_row command");
    draft.with_draft_mut(|d| {
        d.set_pending(row);
        DraftResponse::from(&*d)
    })
}

/// "Add to bill": promotes the input row into the bill.
///
/// A refused row is reported in `rejected` and left in place.
pub fn add_to_bill(draft: &DraftState) -> DraftResponse {
    debug!("add_to_bill command");
    draft.with_draft_mut(|d| {
        let rejected = match d.commit_pending() {
            Promotion::Committed(item) => {
                debug!(identifier = %item.identifier, quantity = item.quantity, "Item added to bill");
                None
            }
            Promotion::Rejected(reason) => {
                warn!(%reason, "Pending row rejected");
                Some(reason.to_string())
            }
            Promotion::NothingPending => None,
        };

        DraftResponse {
            rejected,
            ..DraftResponse::from(&*d)
        }
    })
}

/// "Remove last": drops the most recently added item.
pub fn remove_last_item(draft: &DraftState) -> DraftResponse {
    debug!("remove_last_item command");
    draft.with_draft_mut(|d| {
        d.remove_last();
        DraftResponse::from(&*d)
    })
}

/// Removes one item by identifier.
pub fn remove_bill_item(draft: &DraftState, identifier: &str) -> Result<DraftResponse, ApiError> {
    debug!(identifier, "remove_bill_item command");
    draft.with_draft_mut(|d| {
        d.remove_item(identifier)?;
        Ok(DraftResponse::from(&*d))
    })
}

/// Sets the bill-level discount.
pub fn set_bill_discount(
    draft: &DraftState,
    discount: BillAdjustment,
) -> Result<DraftResponse, ApiError> {
    debug!(?discount, "set_bill_discount command");
    draft.with_draft_mut(|d| {
        d.set_adjustment(discount)?;
        Ok(DraftResponse::from(&*d))
    })
}

/// Discards the draft, keeping the current screen.
pub fn clear_draft(draft: &DraftState) -> DraftResponse {
    debug!("clear_draft command");
    draft.with_draft_mut(|d| {
        d.clear();
        DraftResponse::from(&*d)
    })
}
