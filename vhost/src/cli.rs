use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vhost_config::RailsEnv;

#[derive(Parser, Debug)]
#[command(name = "vhost")]
#[command(about = "Manage Passenger virtual hosts for local applications")]
#[command(version)]
pub struct Args {
    /// Settings file (default: ~/.config/vhost/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the *.vhost.conf files
    #[arg(long, global = true)]
    pub apps_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List installed applications
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one application
    Show {
        /// Host name of the application
        host: String,
        /// Print the vhost file this application would produce
        #[arg(long)]
        rendered: bool,
    },
    /// Install a new application for a directory
    Add {
        /// Application root (the directory containing public/)
        path: PathBuf,
        /// Host name (default: <directory>.local)
        #[arg(long)]
        host: Option<String>,
        /// Runtime environment
        #[arg(long = "env")]
        environment: Option<RailsEnv>,
        /// Allow mod_rewrite
        #[arg(long)]
        rewrite: bool,
        /// Bind address, e.g. "*:80"
        #[arg(long)]
        vhostname: Option<String>,
    },
    /// Change an installed application and restart it
    Set {
        /// Current host name of the application
        host: String,
        /// New host name
        #[arg(long)]
        rename: Option<String>,
        /// New application root
        #[arg(long)]
        path: Option<PathBuf>,
        /// Runtime environment
        #[arg(long = "env")]
        environment: Option<RailsEnv>,
        /// Allow mod_rewrite (on|off)
        #[arg(long, value_parser = parse_on_off)]
        rewrite: Option<bool>,
        /// Bind address, e.g. "*:80"
        #[arg(long)]
        vhostname: Option<String>,
    },
    /// Restart an application
    Restart {
        /// Host name of the application
        host: String,
    },
    /// Reinstall every application in one installer run
    Start,
    /// Uninstall applications
    Remove {
        /// Host names to remove
        #[arg(required = true)]
        hosts: Vec<String>,
    },
}

fn parse_on_off(value: &str) -> Result<bool, String> {
    match value {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(format!("expected on or off, got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_command() {
        let args = Args::parse_from([
            "vhost",
            "set",
            "blog.local",
            "--rename",
            "journal.local",
            "--env",
            "production",
            "--rewrite",
            "on",
        ]);
        let Command::Set {
            host,
            rename,
            environment,
            rewrite,
            ..
        } = args.command
        else {
            panic!("expected set command");
        };
        assert_eq!(host, "blog.local");
        assert_eq!(rename.as_deref(), Some("journal.local"));
        assert_eq!(environment, Some(RailsEnv::Production));
        assert_eq!(rewrite, Some(true));
    }

    #[test]
    fn test_rejects_bad_environment() {
        let result = Args::try_parse_from(["vhost", "add", "/srv/app", "--env", "staging"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_on_off() {
        assert_eq!(parse_on_off("off"), Ok(false));
        assert!(parse_on_off("maybe").is_err());
    }
}
