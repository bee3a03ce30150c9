// Standard library
use std::ffi::{OsStr, OsString};

// External crates
use crate::error::{Result, VhostError};
use duct::cmd;
use tracing::debug;
use which::which;

/// Result of a command whose exit status is left for the caller to judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub code: Option<i32>,
    /// Combined stdout and stderr.
    pub output: String,
}

fn full_command<A: AsRef<OsStr>>(command: &str, args: &[A]) -> String {
    format!(
        "{} {}",
        command,
        args.iter()
            .map(|a| a.as_ref().to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    )
}

/// Run a command to completion without failing on a non-zero exit.
///
/// Only a failure to start the process is reported as an error.
pub fn run_unchecked<A: AsRef<OsStr>>(command: &str, args: &[A]) -> Result<CommandOutcome> {
    let full_command = full_command(command, args);
    debug!(command = %full_command, "running command");

    let os_args: Vec<OsString> = args.iter().map(|a| a.as_ref().to_os_string()).collect();
    let output = cmd(command, os_args)
        .stderr_to_stdout()
        .stdout_capture()
        .unchecked()
        .run()
        .map_err(|e| {
            VhostError::Command(format!("Failed to start command '{}': {}", full_command, e))
        })?;

    let stdout_str = String::from_utf8_lossy(&output.stdout).into_owned();
    for line in stdout_str.lines() {
        debug!("{}", line);
    }

    Ok(CommandOutcome {
        success: output.status.success(),
        code: output.status.code(),
        output: stdout_str,
    })
}

/// Checks if a command-line tool is available in the system's PATH.
pub fn is_tool_installed(tool_name: &str) -> bool {
    which(tool_name).is_ok()
}
