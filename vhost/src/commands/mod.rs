// Command handlers for the vhost CLI

use std::sync::Arc;

use tracing::debug;
use vhost_app::{existing_applications, AppContext, Application, DirtyTracker};
use vhost_config::PaneSettings;
use vhost_core::error::{Result, VhostError};
use vhost_core::{is_tool_installed, vhost_warning};

use crate::cli::{Args, Command};

pub mod edit;
pub mod lifecycle;
pub mod list;

/// Settings and record context for one CLI invocation.
pub struct Session {
    pub settings: PaneSettings,
    pub context: Arc<AppContext>,
    pub tracker: Arc<DirtyTracker>,
}

impl Session {
    fn open(args: &Args) -> Result<Self> {
        let mut settings = PaneSettings::load(args.config.as_deref())?;
        if let Some(dir) = &args.apps_dir {
            settings.apps_dir = dir.clone();
        }
        debug!(apps_dir = %settings.apps_dir.display(), "opened session");

        let tracker = Arc::new(DirtyTracker::new());
        let context = Arc::new(AppContext::from_settings(&settings).with_listener(tracker.clone()));
        Ok(Self {
            settings,
            context,
            tracker,
        })
    }

    /// Warn early when the scripts cannot possibly run.
    fn check_interpreter(&self) {
        if !is_tool_installed(&self.settings.interpreter) {
            vhost_warning!(
                "Interpreter '{}' not found; configuration scripts will not run",
                self.settings.interpreter
            );
        }
    }

    pub fn find(&self, host: &str) -> Result<Application> {
        existing_applications(&self.context)?
            .into_iter()
            .find(|app| app.host() == host)
            .ok_or_else(|| {
                VhostError::Config(format!(
                    "No application with host '{}' in {}",
                    host,
                    self.settings.apps_dir.display()
                ))
            })
    }
}

/// Main command dispatcher
#[must_use = "command execution results should be handled"]
pub fn execute_command(args: Args) -> Result<()> {
    let session = Session::open(&args)?;

    match args.command {
        Command::List { json } => list::handle_list(&session, json),
        Command::Show { host, rendered } => list::handle_show(&session, &host, rendered),
        Command::Add {
            path,
            host,
            environment,
            rewrite,
            vhostname,
        } => {
            session.check_interpreter();
            edit::handle_add(
                &session,
                edit::NewApplication {
                    path,
                    host,
                    environment,
                    rewrite,
                    vhostname,
                },
            )
        }
        Command::Set {
            host,
            rename,
            path,
            environment,
            rewrite,
            vhostname,
        } => {
            session.check_interpreter();
            edit::handle_set(
                &session,
                &host,
                edit::Changes {
                    rename,
                    path,
                    environment,
                    rewrite,
                    vhostname,
                },
            )
        }
        Command::Restart { host } => lifecycle::handle_restart(&session, &host),
        Command::Start => {
            session.check_interpreter();
            lifecycle::handle_start(&session)
        }
        Command::Remove { hosts } => {
            session.check_interpreter();
            lifecycle::handle_remove(&session, &hosts)
        }
    }
}
