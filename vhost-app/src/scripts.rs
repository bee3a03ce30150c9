//! Invocation of the external installer and uninstaller.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use vhost_config::PaneSettings;
use vhost_core::command_stream::run_unchecked;
use vhost_core::error::Result;

/// The commands that materialize or remove vhost configuration.
///
/// `payload` is a YAML list of [`crate::ApplicationData`].
pub trait ConfigScripts: Send + Sync {
    fn install(&self, payload: &str) -> Result<()>;
    fn uninstall(&self, payload: &str) -> Result<()>;
}

/// Runs `<interpreter> <script> <payload>` as a child process.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    interpreter: String,
    installer: PathBuf,
    uninstaller: PathBuf,
}

impl ScriptRunner {
    pub fn new(settings: &PaneSettings) -> Self {
        Self {
            interpreter: settings.interpreter.clone(),
            installer: settings.installer.clone(),
            uninstaller: settings.uninstaller.clone(),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    // Failures are logged and swallowed: callers treat the change as applied.
    // TODO: surface the exit status once the installer scripts report one reliably.
    fn run(&self, script: &Path, payload: &str) -> Result<()> {
        let args = [script.as_os_str(), OsStr::new(payload)];
        match run_unchecked(&self.interpreter, &args) {
            Ok(outcome) if outcome.success => {
                info!(script = %script.display(), "config script finished");
            }
            Ok(outcome) => {
                warn!(
                    script = %script.display(),
                    code = ?outcome.code,
                    output = %outcome.output.trim_end(),
                    "config script exited unsuccessfully"
                );
            }
            Err(e) => {
                warn!(script = %script.display(), error = %e, "config script could not be run");
            }
        }
        Ok(())
    }
}

impl ConfigScripts for ScriptRunner {
    fn install(&self, payload: &str) -> Result<()> {
        self.run(&self.installer, payload)
    }

    fn uninstall(&self, payload: &str) -> Result<()> {
        self.run(&self.uninstaller, payload)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings_with(dir: &Path) -> PaneSettings {
        PaneSettings {
            interpreter: "sh".to_string(),
            installer: dir.join("install.sh"),
            uninstaller: dir.join("uninstall.sh"),
            ..PaneSettings::default()
        }
    }

    #[test]
    fn test_payload_passed_as_single_argument() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("received");
        fs::write(
            temp.path().join("install.sh"),
            format!("printf '%s' \"$1\" > '{}'\n", out.display()),
        )
        .unwrap();

        let runner = ScriptRunner::new(&settings_with(temp.path()));
        runner.install("- host: a.local\n  path: /a b\n").unwrap();

        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "- host: a.local\n  path: /a b\n"
        );
    }

    #[test]
    fn test_failing_script_is_not_an_error() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("uninstall.sh"), "exit 7\n").unwrap();

        let runner = ScriptRunner::new(&settings_with(temp.path()));
        assert!(runner.uninstall("[]").is_ok());
    }

    #[test]
    fn test_missing_interpreter_is_not_an_error() {
        let temp = tempdir().unwrap();
        let settings = PaneSettings {
            interpreter: "no-such-interpreter-xyz".to_string(),
            ..settings_with(temp.path())
        };
        assert!(ScriptRunner::new(&settings).install("[]").is_ok());
    }
}
