//! Operations over every installed application at once.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use vhost_core::error::{Result, VhostError};

use crate::application::Application;
use crate::context::AppContext;
use crate::data::to_payload;

/// Load every `*.vhost.conf` in the context's apps directory, sorted by file name.
pub fn existing_applications(context: &Arc<AppContext>) -> Result<Vec<Application>> {
    let dir = context.apps_dir().to_str().ok_or_else(|| {
        VhostError::Config(format!(
            "Apps directory is not valid UTF-8: {}",
            context.apps_dir().display()
        ))
    })?;
    let pattern = format!("{}/*.vhost.conf", glob::Pattern::escape(dir));

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| VhostError::Config(format!("Invalid apps directory pattern: {}", e)))?
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();

    files
        .iter()
        .map(|file| Application::from_file(Arc::clone(context), file))
        .collect()
}

pub fn serialized_applications_data(apps: &[Application]) -> Result<String> {
    let records: Vec<_> = apps.iter().map(Application::to_data).collect();
    to_payload(&records)
}

/// Install all `apps` with one installer run, then clear their pending flags.
pub fn start_applications(context: &AppContext, apps: &mut [Application]) -> Result<()> {
    for app in apps.iter_mut() {
        app.store_default_user_data();
    }
    let data = serialized_applications_data(apps)?;
    info!(count = apps.len(), "Starting applications");
    context.scripts().install(&data)?;
    for app in apps.iter_mut() {
        app.mark_applied();
    }
    Ok(())
}

/// Uninstall all `apps` with one uninstaller run.
pub fn remove_applications(context: &AppContext, apps: &[Application]) -> Result<()> {
    let data = serialized_applications_data(apps)?;
    info!(count = apps.len(), "Removing applications");
    context.scripts().uninstall(&data)
}
