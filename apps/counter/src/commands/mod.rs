//! # Commands Module
//!
//! Everything the billing screens can ask of the counter.
//!
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── draft.rs     ◄─── Item row, add/remove, bill discount
//! ├── checkout.rs  ◄─── Request for the sales service
//! ├── stock.rs     ◄─── Low-stock notifications
//! └── config.rs    ◄─── Shop configuration
//! ```
//!
//! Each command takes only the state it needs:
//! ```rust,ignore
//! fn add_to_bill(draft: &DraftState) -> DraftResponse
//! fn start_bill(draft: &DraftState, config: &ConfigState, ...) -> DraftResponse
//! fn low_stock(config: &ConfigState, ...) -> LowStockResponse
//! ```

pub mod checkout;
pub mod config;
pub mod draft;
pub mod stock;
