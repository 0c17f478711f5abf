//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand};
use deploy_config::constants::DEFAULT_PREFIX;
use std::path::PathBuf;

/// Config names loaded when none are given on the command line.
pub const DEFAULT_CONFNAMES: [&str; 2] = ["site.conf", "credentials"];

#[derive(Parser)]
#[command(name = "deployconf")]
#[command(about = "Load, inspect and seal layered application config files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  deployconf --app myapp show\n  deployconf --app myapp show site.conf --apply --base-dir /opt/myapp\n  deployconf --passphrase \"$SECRET\" encrypt credentials -o credentials.sealed\n  deployconf --app myapp --location s3://deploy-bucket/etc deploy-settings\n"
)]
pub struct Cli {
    /// Application name; selects `<APP>_CONFIG_*` variables and search paths
    #[arg(long, global = true, env = "DEPLOYCONF_APP")]
    pub app: Option<String>,

    /// Install-root path segment searched for config files
    #[arg(long, global = true, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Remote location of config files (e.g., s3://bucket/etc)
    #[arg(long, global = true, value_name = "URL")]
    pub location: Option<String>,

    /// Passphrase used to encrypt and decrypt config files
    #[arg(long, global = true, env = "DEPLOYCONF_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Log where each config file was loaded from
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load config files and print the merged values as JSON
    Show {
        /// Config names to load, in order (later files win)
        #[arg(value_name = "CONFNAME")]
        confnames: Vec<String>,

        /// Base directory used to render %(LOCALSTATEDIR)s (defaults to the working directory)
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,

        /// Apply the values onto a settings namespace and print the result
        #[arg(long)]
        apply: bool,
    },

    /// Encrypt a plaintext config file with the passphrase
    Encrypt {
        /// Plaintext config file
        input: PathBuf,

        /// Write the sealed file here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Decrypt a sealed config file with the passphrase
    Decrypt {
        /// Sealed config file
        input: PathBuf,

        /// Write the plaintext here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Resolve deployment target settings from the loaded config
    DeploySettings {
        /// Config names to load, in order (later files win)
        #[arg(value_name = "CONFNAME")]
        confnames: Vec<String>,

        /// Base directory used to render %(LOCALSTATEDIR)s (defaults to the working directory)
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,
    },
}

/// Returns `confnames`, or the default list when it is empty.
pub fn confnames_or_default(confnames: Vec<String>) -> Vec<String> {
    if confnames.is_empty() {
        DEFAULT_CONFNAMES.iter().map(|c| c.to_string()).collect()
    } else {
        confnames
    }
}
