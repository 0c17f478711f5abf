//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read loader settings from `<APP>_CONFIG_*` environment variables.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - `<APP>_CONFIG_DIR`, which is a search location read by the locator.
//! - .env file loading (the CLI does that before parsing arguments).
//!
//! Invariants:
//! - Values already set through builder methods are never overridden.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed), except
//!   the passphrase, which is key material and is used byte for byte.

use secrecy::SecretString;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    CONFIG_LOCATION_ENV_SUFFIX, CONFIG_PASSPHRASE_ENV_SUFFIX, CONFIG_VERBOSE_ENV_SUFFIX,
};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Read a secret from the environment untouched. Only an empty value counts as unset.
fn secret_var_or_none(key: &str) -> Option<SecretString> {
    std::env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .map(SecretString::from)
}

fn app_var(app_name: &str, suffix: &str) -> String {
    format!("{app_name}{suffix}").to_uppercase()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let app_name = loader.app_name().to_string();

    if loader.location().is_none()
        && let Some(location) = env_var_or_none(&app_var(&app_name, CONFIG_LOCATION_ENV_SUFFIX))
    {
        loader.set_location(Some(location));
    }

    if !loader.has_passphrase()
        && let Some(passphrase) =
            secret_var_or_none(&app_var(&app_name, CONFIG_PASSPHRASE_ENV_SUFFIX))
    {
        loader.set_passphrase(Some(passphrase));
    }

    let verbose_var = app_var(&app_name, CONFIG_VERBOSE_ENV_SUFFIX);
    if let Some(verbose) = env_var_or_none(&verbose_var) {
        let verbose = match verbose.as_str() {
            "1" | "true" => true,
            "0" | "false" => false,
            _ => {
                return Err(ConfigError::InvalidValue {
                    var: verbose_var,
                    message: "must be true or false".to_string(),
                });
            }
        };
        if verbose {
            loader.set_verbose(true);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key1 = "_DEPLOYCONF_TEST_UNSET_VAR";
        assert!(env_var_or_none(key1).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key1, Some(""))], || {
            assert!(env_var_or_none(key1).is_none(), "Empty string env var should return None");
        });

        temp_env::with_vars([(key1, Some("   "))], || {
            assert!(
                env_var_or_none(key1).is_none(),
                "Whitespace-only env var should return None"
            );
        });

        let key2 = "_DEPLOYCONF_TEST_SET_VAR";
        temp_env::with_vars([(key2, Some(" test-value "))], || {
            assert_eq!(
                env_var_or_none(key2),
                Some("test-value".to_string()),
                "Non-empty env var should return Some(trimmed value)"
            );
        });
    }

    #[test]
    #[serial]
    fn test_secret_var_is_not_trimmed() {
        use secrecy::ExposeSecret;

        let key = "_DEPLOYCONF_TEST_SECRET_VAR";
        temp_env::with_var(key, Some(" padded pw "), || {
            let secret = secret_var_or_none(key).unwrap();
            assert_eq!(secret.expose_secret(), " padded pw ");
        });
        temp_env::with_var(key, Some(""), || {
            assert!(secret_var_or_none(key).is_none());
        });
    }

    #[test]
    fn test_app_var_is_uppercased() {
        assert_eq!(
            app_var("myapp", CONFIG_PASSPHRASE_ENV_SUFFIX),
            "MYAPP_CONFIG_PASSPHRASE"
        );
    }
}
