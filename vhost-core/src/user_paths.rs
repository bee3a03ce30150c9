//! User directory lookups for the vhost tools.

use std::path::PathBuf;

use crate::error::{Result, VhostError};

/// Get the user's configuration directory for the vhost tools.
///
/// Returns:
/// - Linux: `~/.config/vhost` or `$XDG_CONFIG_HOME/vhost`
/// - macOS: `~/Library/Application Support/vhost`
#[must_use = "configuration directory path should be used"]
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("vhost"))
        .ok_or_else(|| VhostError::Config("Cannot determine config directory".to_string()))
}

/// Path of the settings file read when no `--config` is given.
#[must_use = "settings path should be used"]
pub fn settings_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join("config.yaml"))
}
