//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that deployment scripts can branch on.
//! - Map library errors to the appropriate exit code.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Decryption problems always exit with 2, expression errors with 3.

use deploy_config::{ConfigError, EncryptionError};

/// Structured exit codes for deployconf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// A config could not be decrypted with the supplied passphrase.
    ///
    /// Scripts should check the passphrase rather than retry.
    DecryptionFailed = 2,

    /// A config line holds an invalid value expression.
    ParseError = 3,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::Decryption { .. } | ConfigError::InvalidUtf8 { .. } => {
                ExitCode::DecryptionFailed
            }
            ConfigError::Expression { .. } => ExitCode::ParseError,
            ConfigError::Io { .. } | ConfigError::InvalidValue { .. } => ExitCode::GeneralError,
        }
    }
}

impl From<&EncryptionError> for ExitCode {
    fn from(err: &EncryptionError) -> Self {
        match err {
            EncryptionError::DecryptionFailed(_) | EncryptionError::InvalidEnvelope(_) => {
                ExitCode::DecryptionFailed
            }
            EncryptionError::EncryptionFailed(_) | EncryptionError::KeyDerivationFailed(_) => {
                ExitCode::GeneralError
            }
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
            if let Some(encryption_err) = cause.downcast_ref::<EncryptionError>() {
                return ExitCode::from(encryption_err);
            }
        }

        ExitCode::GeneralError
    }
}
