//! # Checkout Command
//!
//! Hands the committed items to the sales service.
//!
//! Only identity and quantity leave the counter; the sales service prices
//! the sale itself. The draft is left intact so a failed submission can be
//! retried; the caller clears it once the service accepts the sale.

use cellshop_core::{BillKind, CheckoutLine};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DraftState;

/// Request body for the sales service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub bill_kind: BillKind,
    pub lines: Vec<CheckoutLine>,
}

/// Builds the checkout request for the current draft.
///
/// ## Errors
/// `VALIDATION_ERROR` when nothing has been added to the bill. A pending
/// input row does not count.
pub fn checkout(draft: &DraftState) -> Result<CheckoutRequest, ApiError> {
    debug!("checkout command");

    let request = draft.with_draft(|d| {
        d.checkout_lines().map(|lines| CheckoutRequest {
            bill_kind: d.profile().kind(),
            lines,
        })
    })?;

    info!(
        kind = ?request.bill_kind,
        lines = request.lines.len(),
        "Checkout request prepared"
    );
    Ok(request)
}
