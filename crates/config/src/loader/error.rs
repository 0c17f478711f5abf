//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every fatal configuration loading failure.
//!
//! Does NOT handle:
//! - Missing config files or object-store misses. Those are expected
//!   operational variance and are logged, not returned.
//! - Log-file provisioning failures (see settings.rs).
//!
//! Invariants:
//! - All error variants carry the config name or path they relate to.
//! - Errors never include decrypted file contents or the passphrase.

use std::path::PathBuf;
use thiserror::Error;

use crate::encryption::EncryptionError;
use crate::literal::LiteralError;

/// Errors that abort a configuration load.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to read config file at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decrypt config {confname}")]
    Decryption {
        confname: String,
        #[source]
        source: EncryptionError,
    },

    #[error("Config {confname} is not valid UTF-8")]
    InvalidUtf8 { confname: String },

    /// The right-hand side of a `KEY = value` line is not a valid literal.
    ///
    /// SAFETY: Only the key and line number are reported, never the value text.
    #[error("Invalid value for {key} in {confname} at line {line}")]
    Expression {
        confname: String,
        line: usize,
        key: String,
        #[source]
        source: LiteralError,
    },
}
