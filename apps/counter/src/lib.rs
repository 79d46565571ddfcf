//! # Cellshop Counter Library
//!
//! The operator-facing shell around `cellshop-core`.
//!
//! ## Module Organization
//! ```text
//! cellshop_counter/
//! ├── lib.rs          ◄─── You are here (logging setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── draft.rs    ◄─── Draft bill behind a mutex
//! │   └── config.rs   ◄─── Shop configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── draft.rs    ◄─── Billing screen actions
//! │   ├── checkout.rs ◄─── Sales service request
//! │   ├── stock.rs    ◄─── Low-stock notifications
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── bill_file.rs    ◄─── Replay a JSON bill through the commands
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management
//! Commands take the state they need by reference: `DraftState` for the bill
//! being keyed in, `ConfigState` for shop settings. Nothing here does
//! arithmetic on money; every total comes from the core engine.

pub mod bill_file;
pub mod commands;
pub mod error;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use error::{ApiError, ErrorCode};
pub use state::{ConfigState, DraftState};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cellshop=trace` - Trace for cellshop crates only
/// - Default: INFO, DEBUG for cellshop crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cellshop_counter=debug,cellshop_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
