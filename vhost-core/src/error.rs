use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VhostError {
    Config(String),
    Io(#[from] std::io::Error),
    Command(String),
    Filesystem(String),
    Serialization(String),
    Internal(String),
}

impl Display for VhostError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            VhostError::Config(s) => write!(f, "Configuration error: {}", s),
            VhostError::Io(e) => write!(f, "I/O error: {}", e),
            VhostError::Command(s) => write!(f, "Command failed: {}", s),
            VhostError::Filesystem(s) => write!(f, "Filesystem error: {}", s),
            VhostError::Serialization(s) => write!(f, "Serialization error: {}", s),
            VhostError::Internal(s) => write!(f, "Internal error: {}", s),
        }
    }
}

impl From<serde_yaml_ng::Error> for VhostError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        VhostError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for VhostError {
    fn from(err: serde_json::Error) -> Self {
        VhostError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VhostError>;
