//! Configuration loader for deployment config files.
//!
//! Responsibilities:
//! - Fetch each requested config name from the object store or the local
//!   search path, decrypt it when a passphrase is set, and parse its
//!   `KEY = value` lines into one merged map.
//! - Provide a builder-pattern `ConfigLoader` and a one-shot `load_config`.
//! - Read loader settings from `<APP>_CONFIG_*` environment variables on request.
//!
//! Does NOT handle:
//! - Writing values onto a settings namespace (see `settings.rs`).
//! - `.env` file loading (the CLI gates that behind `DOTENV_DISABLED`).
//!
//! Invariants / Assumptions:
//! - Config names are processed in order; later files overwrite earlier keys.
//! - A missing config is a warning, never an error.
//! - Any fatal error discards the whole map.

mod builder;
mod env;
mod error;
mod parse;

pub use builder::{ConfigLoader, load_config};
pub use env::env_var_or_none;
pub use error::ConfigError;
pub use parse::{ConfigMap, parse_content};

#[cfg(test)]
mod tests;
