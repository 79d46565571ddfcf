//! # Low-Stock Feed
//!
//! Computes the notifications bell: which handsets and accessories have run
//! low, and which of those the operator has already looked at.
//!
//! ```text
//! poll(stock) ──► [ LowStockAlert { seen: false }, LowStockAlert { seen: true } ]
//!                        │
//!                 mark_seen(id)
//!                        │
//!   item restocked above threshold ──► forgotten, alerts again next time
//! ```
//!
//! Fetching the stock list and persisting the seen set are the shell's job.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Stock category shown in the shop's inventory screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockCategory {
    Mobile,
    Accessory,
}

/// One inventory row as reported by the stock service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub identifier: String,
    pub name: String,
    pub category: StockCategory,
    pub quantity: i64,
    /// Alert when quantity falls to this level. `None` uses the shop default.
    #[serde(default)]
    pub threshold: Option<i64>,
}

impl StockItem {
    pub fn is_low(&self, default_threshold: i64) -> bool {
        self.quantity <= self.threshold.unwrap_or(default_threshold)
    }
}

/// A low-stock notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LowStockAlert {
    pub identifier: String,
    pub name: String,
    pub category: StockCategory,
    pub quantity: i64,
    pub threshold: i64,
    pub seen: bool,
}

/// The operator's low-stock notifications, with the set already seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockFeed {
    default_threshold: i64,
    seen: BTreeSet<String>,
}

impl LowStockFeed {
    pub fn new(default_threshold: i64) -> Self {
        LowStockFeed {
            default_threshold,
            seen: BTreeSet::new(),
        }
    }

    /// Restores a feed with a previously persisted seen set.
    pub fn with_seen(default_threshold: i64, seen: impl IntoIterator<Item = String>) -> Self {
        LowStockFeed {
            default_threshold,
            seen: seen.into_iter().collect(),
        }
    }

    pub fn default_threshold(&self) -> i64 {
        self.default_threshold
    }

    /// Identifiers the operator has acknowledged.
    pub fn seen(&self) -> impl Iterator<Item = &str> {
        self.seen.iter().map(String::as_str)
    }

    /// Lists every low item, flagging the ones already seen.
    ///
    /// Seen entries for items that are no longer low (or no longer listed)
    /// are dropped, so a later shortage alerts afresh.
    pub fn poll(&mut self, stock: &[StockItem]) -> Vec<LowStockAlert> {
        let alerts: Vec<LowStockAlert> = stock
            .iter()
            .filter(|item| item.is_low(self.default_threshold))
            .map(|item| LowStockAlert {
                identifier: item.identifier.clone(),
                name: item.name.clone(),
                category: item.category,
                quantity: item.quantity,
                threshold: item.threshold.unwrap_or(self.default_threshold),
                seen: self.seen.contains(&item.identifier),
            })
            .collect();

        self.seen
            .retain(|id| alerts.iter().any(|alert| &alert.identifier == id));

        alerts
    }

    /// Number of low items not yet seen.
    pub fn unseen_count(&self, stock: &[StockItem]) -> usize {
        stock
            .iter()
            .filter(|item| item.is_low(self.default_threshold))
            .filter(|item| !self.seen.contains(&item.identifier))
            .count()
    }

    pub fn mark_seen(&mut self, identifier: impl Into<String>) {
        self.seen.insert(identifier.into());
    }

    /// Marks every currently low item as seen.
    pub fn mark_all_seen(&mut self, stock: &[StockItem]) {
        let low: Vec<String> = stock
            .iter()
            .filter(|item| item.is_low(self.default_threshold))
            .map(|item| item.identifier.clone())
            .collect();
        self.seen.extend(low);
    }
}
