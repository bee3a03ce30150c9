use vhost_app::{existing_applications, ApplicationData};
use vhost_core::error::Result;
use vhost_core::vhost_println;

use super::Session;

pub fn handle_list(session: &Session, json: bool) -> Result<()> {
    let apps = existing_applications(&session.context)?;

    if json {
        let records: Vec<ApplicationData> = apps.iter().map(|a| a.to_data()).collect();
        vhost_println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if apps.is_empty() {
        vhost_println!(
            "No applications installed in {}",
            session.settings.apps_dir.display()
        );
        return Ok(());
    }

    vhost_println!("{:<32} {:<12} {:<8} PATH", "HOST", "ENV", "REWRITE");
    for app in &apps {
        vhost_println!(
            "{:<32} {:<12} {:<8} {}",
            app.host(),
            app.environment(),
            if app.allow_mod_rewrite() { "on" } else { "off" },
            app.path()
        );
    }
    Ok(())
}

pub fn handle_show(session: &Session, host: &str, rendered: bool) -> Result<()> {
    let app = session.find(host)?;

    if rendered {
        vhost_println!("{}", app.to_vhost_file().render().trim_end());
        return Ok(());
    }

    vhost_println!("Host:        {}", app.host());
    vhost_println!("Path:        {}", app.path());
    vhost_println!("Environment: {}", app.environment());
    vhost_println!(
        "Rewrite:     {}",
        if app.allow_mod_rewrite() { "on" } else { "off" }
    );
    vhost_println!("Bind:        {}", app.vhostname());
    vhost_println!("Config:      {}", app.config_path().display());
    if !app.user_defined_data().is_empty() {
        vhost_println!();
        vhost_println!("{}", app.user_defined_data());
    }
    Ok(())
}
