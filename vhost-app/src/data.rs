//! The flat record handed to the installer and uninstaller.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vhost_config::RailsEnv;
use vhost_core::error::Result;

/// One application as the config scripts see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationData {
    pub config_path: PathBuf,
    pub host: String,
    pub path: String,
    pub environment: RailsEnv,
    pub allow_mod_rewrite: bool,
    pub vhostname: String,
    pub user_defined_data: String,
}

/// Serialize records into the single YAML argument the scripts take.
pub fn to_payload(records: &[ApplicationData]) -> Result<String> {
    Ok(serde_yaml_ng::to_string(records)?)
}

pub fn from_payload(payload: &str) -> Result<Vec<ApplicationData>> {
    Ok(serde_yaml_ng::from_str(payload)?)
}
