//! One virtual-host application record and its edit lifecycle.
//!
//! ```text
//! new/for_path ──edit──▶ valid + dirty ──apply──▶ clean
//! from_file ──edit──▶ dirty + revertable ──revert──▶ clean
//!                                       └─apply───▶ clean
//! ```

// Standard library
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// External crates
use tracing::{debug, info, warn};
use vhost_config::{RailsEnv, VhostFile};
use vhost_core::error::{Result, VhostError};
use vhost_core::file_system;

// Internal imports
use crate::context::AppContext;
use crate::data::{to_payload, ApplicationData};

/// Values as they were when the record was last loaded or saved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OriginalValues {
    host: String,
    path: String,
    environment: RailsEnv,
    allow_mod_rewrite: bool,
    user_defined_data: String,
}

/// Host name derived from an application directory: `~/src/My_App` → `my-app.local`.
pub fn default_host_for(path: &str) -> String {
    let base = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.local", base.to_lowercase().replace('_', "-"))
}

pub struct Application {
    context: Arc<AppContext>,

    host: String,
    path: String,
    environment: RailsEnv,
    allow_mod_rewrite: bool,
    vhostname: String,
    user_defined_data: String,

    new_app: bool,
    dirty: bool,
    valid: bool,
    revertable: bool,

    original: OriginalValues,
}

impl Application {
    /// A blank record that has never been installed.
    pub fn new(context: Arc<AppContext>) -> Self {
        let vhostname = context.default_vhostname().to_string();
        let mut app = Self {
            context,
            host: String::new(),
            path: String::new(),
            environment: RailsEnv::Development,
            allow_mod_rewrite: false,
            vhostname,
            user_defined_data: String::new(),
            new_app: true,
            dirty: false,
            valid: false,
            revertable: false,
            original: OriginalValues {
                host: String::new(),
                path: String::new(),
                environment: RailsEnv::Development,
                allow_mod_rewrite: false,
                user_defined_data: String::new(),
            },
        };
        app.set_original_values();
        app
    }

    /// Load an installed application from its vhost file.
    ///
    /// Directives missing from the file leave the matching field blank.
    pub fn from_file(context: Arc<AppContext>, file: &Path) -> Result<Self> {
        let mut app = Self::new(context);
        app.new_app = false;
        app.load_data_from_vhost_file(file)?;
        app.set_original_values();
        Ok(app)
    }

    /// A new application for `path`, with the host derived from the directory name.
    pub fn for_path(context: Arc<AppContext>, path: &str) -> Self {
        let mut app = Self::new(context);
        app.path = path.to_string();
        app.host = default_host_for(path);
        app.mark_dirty();
        app.valid = !app.host.is_empty() && !app.path.is_empty();
        app.set_original_values();
        app
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn environment(&self) -> RailsEnv {
        self.environment
    }

    pub fn allow_mod_rewrite(&self) -> bool {
        self.allow_mod_rewrite
    }

    pub fn vhostname(&self) -> &str {
        &self.vhostname
    }

    pub fn user_defined_data(&self) -> &str {
        &self.user_defined_data
    }

    pub fn is_new(&self) -> bool {
        self.new_app
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_revertable(&self) -> bool {
        self.revertable
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
        self.value_changed();
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        if self.host.is_empty() && !self.path.is_empty() {
            self.host = default_host_for(&self.path);
        }
        self.value_changed();
    }

    pub fn set_environment(&mut self, environment: RailsEnv) {
        self.environment = environment;
        self.value_changed();
    }

    pub fn set_allow_mod_rewrite(&mut self, allow: bool) {
        self.allow_mod_rewrite = allow;
        self.value_changed();
    }

    pub fn set_vhostname(&mut self, vhostname: impl Into<String>) {
        self.vhostname = vhostname.into();
        self.value_changed();
    }

    pub fn set_user_defined_data(&mut self, data: impl Into<String>) {
        self.user_defined_data = data.into();
        self.value_changed();
    }

    fn value_changed(&mut self) {
        self.revertable = true;
        self.mark_dirty();
        self.valid = !self.host.is_empty() && !self.path.is_empty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.context.listener().application_marked_dirty(self);
    }

    /// Where the installer writes this application's vhost file.
    pub fn config_path(&self) -> PathBuf {
        self.context
            .apps_dir()
            .join(format!("{}.vhost.conf", self.host))
    }

    /// Apply pending changes: install a new application or restart an existing one.
    ///
    /// Returns `false` without touching anything when the record is not valid.
    pub fn apply(&mut self) -> Result<bool> {
        if !self.valid {
            info!(path = %self.path, "Not applying changes to invalid application");
            return Ok(false);
        }

        info!(path = %self.path, host = %self.host, "Applying changes to application");
        if self.new_app {
            self.start()?;
        } else {
            self.restart()?;
        }
        Ok(self.mark_applied())
    }

    /// Clear the pending-change flags without running any script, for records
    /// that were installed in bulk.
    pub fn mark_applied(&mut self) -> bool {
        if !self.valid {
            return false;
        }
        self.new_app = false;
        self.dirty = false;
        self.valid = false;
        true
    }

    pub fn start(&mut self) -> Result<()> {
        info!(path = %self.path, "Starting application");
        self.save_config()
    }

    /// Reinstall if needed and tell the application to restart via `tmp/restart.txt`.
    ///
    /// A renamed host first has its old vhost uninstalled.
    pub fn restart(&mut self) -> Result<()> {
        if self.path.is_empty() {
            return Err(VhostError::Config(format!(
                "Cannot restart {}: application path is empty",
                self.host
            )));
        }
        info!(path = %self.path, "Restarting application");

        if self.host != self.original.host {
            let previous = to_payload(&[self.original_data()])?;
            debug!(old_host = %self.original.host, "uninstalling previous host");
            self.context.scripts().uninstall(&previous)?;
        }
        if self.dirty {
            self.save_config()?;
        }

        let tmp_dir = Path::new(&self.path).join("tmp");
        file_system::ensure_dir(&tmp_dir)?;
        file_system::touch(&tmp_dir.join("restart.txt"))?;
        Ok(())
    }

    /// Restore the values from the last load or save.
    pub fn revert(&mut self) {
        let original = self.original.clone();
        self.host = original.host;
        self.path = original.path;
        self.environment = original.environment;
        self.allow_mod_rewrite = original.allow_mod_rewrite;
        self.user_defined_data = original.user_defined_data;

        self.valid = false;
        self.dirty = false;
        self.revertable = false;
    }

    /// Re-read the vhost file, marking the record dirty if it changed on disk.
    pub fn reload(&mut self) -> Result<()> {
        if self.new_app {
            return Ok(());
        }
        let file = self.config_path();
        self.load_data_from_vhost_file(&file)?;
        if self.values_changed_after_load() {
            self.mark_dirty();
        }
        self.set_original_values();
        self.valid = true;
        Ok(())
    }

    /// Hand this record to the installer.
    pub fn save_config(&mut self) -> Result<()> {
        self.store_default_user_data();
        info!(config_path = %self.config_path().display(), "Saving configuration");
        let payload = to_payload(&[self.to_data()])?;
        self.context.scripts().install(&payload)
    }

    /// Give a new record the default directory-permission block, so it is
    /// still there once the record is no longer new.
    pub(crate) fn store_default_user_data(&mut self) {
        if self.new_app {
            self.user_defined_data = self.default_user_defined_data();
        }
    }

    /// The record as the config scripts see it. New records get the default
    /// directory-permission block as their user-defined data.
    pub fn to_data(&self) -> ApplicationData {
        ApplicationData {
            config_path: self.config_path(),
            host: self.host.clone(),
            path: self.path.clone(),
            environment: self.environment,
            allow_mod_rewrite: self.allow_mod_rewrite,
            vhostname: self.vhostname.clone(),
            user_defined_data: if self.new_app {
                self.default_user_defined_data()
            } else {
                self.user_defined_data.clone()
            },
        }
    }

    /// The vhost file text this record would produce.
    pub fn to_vhost_file(&self) -> VhostFile {
        let data = self.to_data();
        VhostFile {
            vhostname: Some(data.vhostname),
            host: Some(data.host),
            path: Some(data.path),
            environment: Some(data.environment),
            allow_mod_rewrite: Some(data.allow_mod_rewrite),
            user_defined_data: data.user_defined_data,
        }
    }

    fn original_data(&self) -> ApplicationData {
        ApplicationData {
            config_path: self
                .context
                .apps_dir()
                .join(format!("{}.vhost.conf", self.original.host)),
            host: self.original.host.clone(),
            path: self.original.path.clone(),
            environment: self.original.environment,
            allow_mod_rewrite: self.original.allow_mod_rewrite,
            vhostname: self.vhostname.clone(),
            user_defined_data: self.original.user_defined_data.clone(),
        }
    }

    fn default_user_defined_data(&self) -> String {
        let public = Path::new(&self.path).join("public");
        format!(
            "  <directory \"{}\">\n    Order allow,deny\n    Allow from all\n  </directory>",
            public.display()
        )
    }

    fn load_data_from_vhost_file(&mut self, file: &Path) -> Result<()> {
        let text = fs::read_to_string(file).map_err(|e| {
            VhostError::Filesystem(format!("Failed to read {}: {}", file.display(), e))
        })?;
        let parsed = VhostFile::parse(&text);

        if parsed.host.is_none() || parsed.path.is_none() {
            warn!(file = %file.display(), "vhost file is missing ServerName or DocumentRoot");
        }

        self.host = parsed.host.unwrap_or_default();
        self.path = parsed.path.unwrap_or_default();
        self.environment = parsed.environment.unwrap_or(RailsEnv::Production);
        self.allow_mod_rewrite = parsed.allow_mod_rewrite.unwrap_or(false);
        self.vhostname = parsed
            .vhostname
            .unwrap_or_else(|| self.context.default_vhostname().to_string());
        self.user_defined_data = parsed.user_defined_data;
        Ok(())
    }

    fn values_changed_after_load(&self) -> bool {
        let o = &self.original;
        // a new app's snapshot has no user block yet
        let user_data_changed =
            !o.user_defined_data.is_empty() && o.user_defined_data != self.user_defined_data;

        o.host != self.host
            || o.path != self.path
            || o.environment != self.environment
            || o.allow_mod_rewrite != self.allow_mod_rewrite
            || user_data_changed
    }

    fn set_original_values(&mut self) {
        self.original = OriginalValues {
            host: self.host.clone(),
            path: self.path.clone(),
            environment: self.environment,
            allow_mod_rewrite: self.allow_mod_rewrite,
            user_defined_data: self.user_defined_data.clone(),
        };
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("host", &self.host)
            .field("path", &self.path)
            .field("environment", &self.environment)
            .field("allow_mod_rewrite", &self.allow_mod_rewrite)
            .field("vhostname", &self.vhostname)
            .field("new_app", &self.new_app)
            .field("dirty", &self.dirty)
            .field("valid", &self.valid)
            .field("revertable", &self.revertable)
            .finish_non_exhaustive()
    }
}
