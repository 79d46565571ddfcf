//! # Stock Commands
//!
//! The notifications bell: low-stock alerts against the operator's seen set.

use cellshop_core::stock::{LowStockAlert, LowStockFeed, StockItem};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::ConfigState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockResponse {
    pub alerts: Vec<LowStockAlert>,
    pub unseen_count: usize,
    /// Seen set after this poll, for the caller to persist.
    pub seen: Vec<String>,
}

/// Polls the stock list for low items.
///
/// ## Arguments
/// * `seen` - Identifiers the operator acknowledged earlier
/// * `stock` - Current stock rows
pub fn low_stock(config: &ConfigState, seen: Vec<String>, stock: &[StockItem]) -> LowStockResponse {
    debug!(items = stock.len(), "low_stock command");

    let mut feed = LowStockFeed::with_seen(config.low_stock_threshold, seen);
    let alerts = feed.poll(stock);

    LowStockResponse {
        unseen_count: alerts.iter().filter(|a| !a.seen).count(),
        seen: feed.seen().map(str::to_string).collect(),
        alerts,
    }
}
