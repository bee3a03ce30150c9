//! Tool-wide settings: where vhost files live and how they are installed.
//!
//! Stored as YAML, by default in `~/.config/vhost/config.yaml`. Every field is
//! optional in the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use vhost_core::error::{Result, VhostError};
use vhost_core::user_paths;

use crate::vhost_file::DEFAULT_VHOSTNAME;

const RESOURCES_DIR: &str = "/Library/PreferencePanes/Passenger.prefPane/Contents/Resources";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneSettings {
    /// Directory holding one `<host>.vhost.conf` per application
    pub apps_dir: PathBuf,

    /// Program the installer and uninstaller scripts are run with
    pub interpreter: String,

    /// Script that writes vhost files and restarts the web server
    pub installer: PathBuf,

    /// Script that removes vhost files
    pub uninstaller: PathBuf,

    /// Bind address for new applications
    pub default_vhostname: String,
}

impl Default for PaneSettings {
    fn default() -> Self {
        Self {
            apps_dir: PathBuf::from("/private/etc/apache2/passenger_pane_vhosts"),
            interpreter: "/usr/bin/ruby".to_string(),
            installer: Path::new(RESOURCES_DIR).join("config_installer.rb"),
            uninstaller: Path::new(RESOURCES_DIR).join("config_uninstaller.rb"),
            default_vhostname: DEFAULT_VHOSTNAME.to_string(),
        }
    }
}

impl PaneSettings {
    /// Load settings from `path`, or from the user settings file when it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default file
    /// just yields the defaults. `VHOST_*` environment variables are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(explicit) => Self::from_file(explicit)?,
            None => match user_paths::settings_path() {
                Ok(default_path) if default_path.exists() => Self::from_file(&default_path)?,
                _ => Self::default(),
            },
        };
        Ok(settings.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading settings");
        let content = fs::read_to_string(path).map_err(|e| {
            VhostError::Config(format!("Failed to read settings {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Apply `VHOST_APPS_DIR`, `VHOST_INSTALLER` and `VHOST_UNINSTALLER`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("VHOST_APPS_DIR") {
            self.apps_dir = PathBuf::from(dir);
        }
        if let Some(installer) = lookup("VHOST_INSTALLER") {
            self.installer = PathBuf::from(installer);
        }
        if let Some(uninstaller) = lookup("VHOST_UNINSTALLER") {
            self.uninstaller = PathBuf::from(uninstaller);
        }
        self
    }
}
