//! Shared wiring handed to every record.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use vhost_config::PaneSettings;

use crate::listener::{DirtyListener, NoopListener};
use crate::scripts::{ConfigScripts, ScriptRunner};

/// Collaborators shared by every record: where vhost files live, how they are
/// installed, and who hears about unsaved changes.
pub struct AppContext {
    apps_dir: PathBuf,
    default_vhostname: String,
    scripts: Arc<dyn ConfigScripts>,
    listener: Arc<dyn DirtyListener>,
}

impl AppContext {
    /// Context backed by the real installer/uninstaller from `settings`.
    pub fn from_settings(settings: &PaneSettings) -> Self {
        Self {
            apps_dir: settings.apps_dir.clone(),
            default_vhostname: settings.default_vhostname.clone(),
            scripts: Arc::new(ScriptRunner::new(settings)),
            listener: Arc::new(NoopListener),
        }
    }

    pub fn new(apps_dir: impl Into<PathBuf>, scripts: Arc<dyn ConfigScripts>) -> Self {
        Self {
            apps_dir: apps_dir.into(),
            default_vhostname: vhost_config::DEFAULT_VHOSTNAME.to_string(),
            scripts,
            listener: Arc::new(NoopListener),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn DirtyListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn with_scripts(mut self, scripts: Arc<dyn ConfigScripts>) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn apps_dir(&self) -> &Path {
        &self.apps_dir
    }

    pub fn default_vhostname(&self) -> &str {
        &self.default_vhostname
    }

    pub fn scripts(&self) -> &dyn ConfigScripts {
        self.scripts.as_ref()
    }

    pub fn listener(&self) -> &dyn DirtyListener {
        self.listener.as_ref()
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("apps_dir", &self.apps_dir)
            .field("default_vhostname", &self.default_vhostname)
            .finish_non_exhaustive()
    }
}
