//! Virtual-host configuration files and tool settings.
//!
//! `vhost_file` reads and writes the per-application `*.vhost.conf` format,
//! `settings` holds where those files live and which commands install them.

pub mod environment;
pub mod settings;
pub mod vhost_file;

pub use environment::RailsEnv;
pub use settings::PaneSettings;
pub use vhost_file::{VhostFile, DEFAULT_VHOSTNAME};
