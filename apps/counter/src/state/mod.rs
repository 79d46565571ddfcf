//! # State Module
//!
//! Application state for the counter.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────────┐        │
//! │  │   DraftState         │          │   ConfigState            │        │
//! │  │                      │          │                          │        │
//! │  │  Arc<Mutex<          │          │  shop name, GSTIN        │        │
//! │  │    DraftBill         │          │  default / labour GST    │        │
//! │  │  >>                  │          │  low-stock threshold     │        │
//! │  └──────────────────────┘          └──────────────────────────┘        │
//! │                                                                         │
//! │  • DraftState: exclusive access per command                            │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod draft;

pub use config::{ConfigError, ConfigState};
pub use draft::DraftState;
