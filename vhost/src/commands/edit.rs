use std::path::{Path, PathBuf};

use tracing::info_span;
use vhost_app::Application;
use vhost_config::RailsEnv;
use vhost_core::error::{Result, VhostError};
use vhost_core::{vhost_info, vhost_success};

use super::Session;

pub struct NewApplication {
    pub path: PathBuf,
    pub host: Option<String>,
    pub environment: Option<RailsEnv>,
    pub rewrite: bool,
    pub vhostname: Option<String>,
}

pub struct Changes {
    pub rename: Option<String>,
    pub path: Option<PathBuf>,
    pub environment: Option<RailsEnv>,
    pub rewrite: Option<bool>,
    pub vhostname: Option<String>,
}

fn path_string(path: &Path) -> Result<String> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    absolute
        .to_str()
        .map(|s| s.trim_end_matches('/').to_string())
        .ok_or_else(|| VhostError::Config(format!("Path is not valid UTF-8: {}", path.display())))
}

pub fn handle_add(session: &Session, new: NewApplication) -> Result<()> {
    let path = path_string(&new.path)?;
    let _span = info_span!("add", path = %path).entered();

    let mut app = Application::for_path(session.context.clone(), &path);
    if let Some(host) = new.host {
        app.set_host(host);
    }
    if let Some(environment) = new.environment {
        app.set_environment(environment);
    }
    if new.rewrite {
        app.set_allow_mod_rewrite(true);
    }
    if let Some(vhostname) = new.vhostname {
        app.set_vhostname(vhostname);
    }

    if !app.apply()? {
        return Err(VhostError::Config(format!(
            "Cannot add {}: host and path are both required",
            path
        )));
    }
    vhost_success!("Installed {} → {}", app.host(), app.path());
    Ok(())
}

pub fn handle_set(session: &Session, host: &str, changes: Changes) -> Result<()> {
    let _span = info_span!("set", host = %host).entered();
    let mut app = session.find(host)?;

    if let Some(rename) = changes.rename {
        app.set_host(rename);
    }
    if let Some(path) = changes.path {
        app.set_path(path_string(&path)?);
    }
    if let Some(environment) = changes.environment {
        app.set_environment(environment);
    }
    if let Some(rewrite) = changes.rewrite {
        app.set_allow_mod_rewrite(rewrite);
    }
    if let Some(vhostname) = changes.vhostname {
        app.set_vhostname(vhostname);
    }

    if session.tracker.dirty_paths().is_empty() {
        vhost_info!("No changes given for {}", host);
        return Ok(());
    }

    if !app.apply()? {
        app.revert();
        return Err(VhostError::Config(format!(
            "Not applying changes to {}: host and path are both required",
            host
        )));
    }
    vhost_success!("Updated and restarted {}", app.host());
    Ok(())
}
