//! Locations of the config and state files

use esc_core::config::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, STATE_FILE_NAME};
use esc_core::config::runtime::env_vars;
use esc_core::config::StorePreferences;
use esc_core::StateError;
use std::env;
use std::path::PathBuf;

/// `ESC_CONFIG`, else `<config dir>/esc/config.toml`
pub fn config_file() -> Option<PathBuf> {
    env::var_os(env_vars::CONFIG_FILE)
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)))
}

/// Configured state file, else `<data dir>/esc/state.json`
pub fn state_file(preferences: &StorePreferences) -> Result<PathBuf, StateError> {
    if let Some(path) = &preferences.state_file {
        return Ok(path.clone());
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(STATE_FILE_NAME))
        .ok_or_else(|| StateError::io(STATE_FILE_NAME, "could not determine the data directory"))
}
