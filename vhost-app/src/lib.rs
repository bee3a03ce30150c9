//! Virtual-host application records.
//!
//! An [`Application`] holds one vhost entry while it is being edited, tracks
//! whether it differs from what is installed, and hands the result to the
//! external installer and uninstaller through [`ConfigScripts`].

pub mod application;
pub mod collection;
pub mod context;
pub mod data;
pub mod listener;
pub mod mock;
pub mod scripts;

pub use application::{default_host_for, Application};
pub use collection::{
    existing_applications, remove_applications, serialized_applications_data, start_applications,
};
pub use context::AppContext;
pub use data::ApplicationData;
pub use listener::{DirtyListener, DirtyTracker, NoopListener};
pub use mock::{RecordingScripts, ScriptCall};
pub use scripts::{ConfigScripts, ScriptRunner};
