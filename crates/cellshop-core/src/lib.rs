//! # cellshop-core: Pure Billing Logic for the Cellshop Counter
//!
//! This crate holds the billing arithmetic shared by the sale bill, the
//! service (repair) bill and the advance receipt, as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cellshop Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Billing Screens                              │   │
//! │  │    Sale Bill ──► Service Bill ──► Advance Receipt ──► Print    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    counter app (commands, state)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cellshop-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  money   │ │ invoice  │ │  draft   │ │  stock   │          │   │
//! │  │   │  Money   │ │ engine   │ │ pending/ │ │ low-stock│          │   │
//! │  │   │  Percent │ │ profiles │ │ committed│ │ feed     │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal `Money`
//! - [`types`] - Line items, discounts, bill summary
//! - [`invoice`] - The computation engine and per-screen profiles
//! - [`draft`] - Draft bill with committed items and a pending row
//! - [`coerce`] - Raw form text to numbers, never failing
//! - [`validation`] - Rules for entering a bill
//! - [`stock`] - Low-stock notifications
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cellshop_core::invoice::compute_bill_summary;
//! use cellshop_core::{Discount, LineItem, Money, Percent};
//!
//! let case = LineItem::new("Case", 2, Money::from_cents(10_000))
//!     .with_tax_rate(Percent::from_bps(1800))
//!     .with_discount(Discount::Percent(Percent::from_bps(1000)));
//!
//! let summary = compute_bill_summary(&[case], &Discount::None);
//! assert_eq!(summary.grand_total.to_string(), "212.40");
//! assert_eq!(summary.tax_split.central.to_string(), "16.20");
//! ```

pub mod coerce;
pub mod draft;
pub mod error;
pub mod invoice;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

pub use draft::{DraftBill, DraftStatus, PendingRow, Promotion};
pub use error::{CoreError, ValidationError};
pub use invoice::{compute_bill_summary, compute_line_total, BillProfile, BillStatement};
pub use money::Money;
pub use types::*;

/// Maximum lines on a single bill.
pub const MAX_BILL_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Catches a slipped key (1000 instead of 10) at the counter.
pub const MAX_ITEM_QUANTITY: u32 = 999;
