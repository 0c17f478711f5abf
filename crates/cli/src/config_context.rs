//! Shared loading context for command execution.
//!
//! Responsibilities:
//! - Carry the global options (app, prefix, location, passphrase, verbose).
//! - Build a `ConfigLoader` for commands that load config files.
//!
//! Does NOT handle:
//! - CLI argument definitions (see `args` module).
//!
//! Invariants:
//! - Explicit CLI options win over `<APP>_CONFIG_*` environment variables.
//! - The passphrase is wrapped in `SecretString` as soon as it is parsed.

use anyhow::{Context, Result};
use deploy_config::ConfigLoader;
use secrecy::SecretString;

pub(crate) struct LoadContext {
    pub app: Option<String>,
    pub prefix: String,
    pub location: Option<String>,
    pub passphrase: Option<SecretString>,
    pub verbose: bool,
}

impl LoadContext {
    /// The application name, required by every command that loads configs.
    pub(crate) fn app(&self) -> Result<&str> {
        self.app
            .as_deref()
            .filter(|app| !app.trim().is_empty())
            .context("An application name is required (use --app or DEPLOYCONF_APP)")
    }

    /// The passphrase, required by encrypt and decrypt.
    pub(crate) fn require_passphrase(&self) -> Result<&SecretString> {
        self.passphrase
            .as_ref()
            .context("A passphrase is required (use --passphrase or DEPLOYCONF_PASSPHRASE)")
    }

    /// Loader for `confnames` with CLI options applied before the environment.
    pub(crate) fn loader(&self, confnames: Vec<String>) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new(self.app()?)
            .with_confnames(confnames)
            .with_prefix(self.prefix.clone())
            .with_verbose(self.verbose);
        if let Some(location) = &self.location {
            loader = loader.with_location(location.clone());
        }
        if let Some(passphrase) = &self.passphrase {
            loader = loader.with_passphrase(passphrase.clone());
        }

        loader
            .from_env()
            .context("Failed to read configuration from environment")
    }
}
