// External crates
use clap::Parser;
use tracing::debug;

// Internal imports
use vhost_core::{vhost_error, vhost_warning};

// Local modules
mod cli;
mod commands;

use cli::Args;
use commands::execute_command;

fn main() {
    if vhost_core::tracing_init::init().is_err() {
        vhost_warning!("Failed to initialize logging");
    }

    let args = Args::parse();
    debug!(command = ?args.command, "starting vhost");

    if let Err(e) = execute_command(args) {
        vhost_error!("❌ {:#}", e);
        std::process::exit(1);
    }
}
