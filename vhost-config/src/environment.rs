//! The Rails environment a virtual host runs in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vhost_core::error::VhostError;

/// Runtime environment an application is served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RailsEnv {
    #[default]
    Development,
    Production,
}

impl RailsEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            RailsEnv::Development => "development",
            RailsEnv::Production => "production",
        }
    }
}

impl fmt::Display for RailsEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RailsEnv {
    type Err = VhostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(RailsEnv::Development),
            "production" => Ok(RailsEnv::Production),
            other => Err(VhostError::Config(format!(
                "Unknown environment '{}', expected development or production",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("development".parse::<RailsEnv>().unwrap(), RailsEnv::Development);
        assert_eq!("production".parse::<RailsEnv>().unwrap(), RailsEnv::Production);
        assert_eq!(RailsEnv::Production.to_string(), "production");
        assert!("staging".parse::<RailsEnv>().is_err());
    }

    #[test]
    fn test_serializes_lowercase() {
        let yaml = serde_yaml_ng::to_string(&RailsEnv::Production).unwrap();
        assert_eq!(yaml.trim(), "production");
    }
}
