//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current shop configuration.
///
/// ## When Used
/// - Screen startup (shop name, GST defaults)
/// - Bill printing (address, GSTIN)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
