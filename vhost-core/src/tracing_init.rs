//! Tracing initialization for the vhost tools.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Result, VhostError};

/// Initialize the tracing subscriber with environment-based configuration
///
/// Uses standard RUST_LOG environment variable for filtering:
/// - `RUST_LOG=debug` - Set global level
/// - `RUST_LOG=vhost_app=debug` - Set per-module levels
///
/// Uses RUST_LOG_FORMAT for output format (optional):
/// - `json` - JSON formatted output
/// - `pretty` - Pretty formatted output
/// - `compact` - Compact single-line output (default)
pub fn init() -> Result<()> {
    init_with_defaults("warn")
}

/// Initialize with a default filter if RUST_LOG is not set
pub fn init_with_defaults(default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // Logs go to stderr so command output stays pipeable.
    let result = match format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false).json())
            .try_init(),
        "pretty" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).pretty())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .try_init(),
    };

    result.map_err(|e| VhostError::Internal(format!("Failed to initialize tracing: {}", e)))
}

/// Initialize for testing with a specific configuration
#[cfg(test)]
pub fn init_for_testing() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init()
        .map_err(|e| VhostError::Internal(format!("Failed to initialize test tracing: {}", e)))
}
