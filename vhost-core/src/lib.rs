pub mod command_stream;
pub mod error;
pub mod file_system;
pub mod output_macros;
pub mod tracing_init;
pub mod user_paths;

pub use command_stream::{is_tool_installed, run_unchecked, CommandOutcome};
