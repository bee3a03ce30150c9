use vhost_app::{existing_applications, remove_applications, start_applications, Application};
use vhost_core::error::Result;
use vhost_core::{vhost_info, vhost_success};

use super::Session;

pub fn handle_restart(session: &Session, host: &str) -> Result<()> {
    let mut app = session.find(host)?;
    app.restart()?;
    vhost_success!("Restart requested for {}", app.host());
    Ok(())
}

pub fn handle_start(session: &Session) -> Result<()> {
    let mut apps = existing_applications(&session.context)?;
    if apps.is_empty() {
        vhost_info!("No applications to start");
        return Ok(());
    }
    start_applications(&session.context, &mut apps)?;
    vhost_success!("Started {} application(s)", apps.len());
    Ok(())
}

pub fn handle_remove(session: &Session, hosts: &[String]) -> Result<()> {
    let apps = hosts
        .iter()
        .map(|host| session.find(host))
        .collect::<Result<Vec<Application>>>()?;
    remove_applications(&session.context, &apps)?;
    for app in &apps {
        vhost_success!("Removed {}", app.host());
    }
    Ok(())
}
