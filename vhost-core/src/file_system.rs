//! File system helpers for restart markers and config directories.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::time::SystemTime;

use crate::error::{Result, VhostError};

/// Create a directory (and parents) unless it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| {
        VhostError::Filesystem(format!("Failed to create directory {}: {}", dir.display(), e))
    })
}

/// Create the file if missing and bump its modification time.
pub fn touch(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            VhostError::Filesystem(format!("Failed to touch {}: {}", path.display(), e))
        })?;
    file.set_modified(SystemTime::now())?;
    Ok(())
}
