//! Environment variable tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test `<APP>_CONFIG_LOCATION`, `<APP>_CONFIG_PASSPHRASE` and `<APP>_CONFIG_VERBOSE`.
//! - Test that builder values take precedence over environment variables.

use secrecy::SecretString;
use serial_test::serial;

use super::{Fixture, env_lock};
use crate::encryption;
use crate::literal::Value;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

#[test]
#[serial]
fn test_env_sets_location_and_passphrase() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("MYAPP_CONFIG_LOCATION", Some("s3://bucket/etc")),
            ("MYAPP_CONFIG_PASSPHRASE", Some("hunter2")),
            ("MYAPP_CONFIG_VERBOSE", Some("true")),
        ],
        || {
            let loader = ConfigLoader::new("myapp").from_env().unwrap();
            assert_eq!(loader.location().map(String::as_str), Some("s3://bucket/etc"));
            assert!(loader.has_passphrase());
            assert!(loader.verbose());
        },
    );
}

#[test]
#[serial]
fn test_builder_values_win_over_env() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("MYAPP_CONFIG_LOCATION", Some("s3://env-bucket/etc")),
            ("MYAPP_CONFIG_VERBOSE", Some("false")),
        ],
        || {
            let loader = ConfigLoader::new("myapp")
                .with_location("s3://cli-bucket/etc")
                .with_verbose(true)
                .from_env()
                .unwrap();
            assert_eq!(
                loader.location().map(String::as_str),
                Some("s3://cli-bucket/etc")
            );
            assert!(loader.verbose(), "env false must not clear an explicit true");
        },
    );
}

#[test]
#[serial]
fn test_blank_env_vars_are_ignored() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("MYAPP_CONFIG_LOCATION", Some("   ")),
            ("MYAPP_CONFIG_PASSPHRASE", Some("")),
            ("MYAPP_CONFIG_VERBOSE", Some(" ")),
        ],
        || {
            let loader = ConfigLoader::new("myapp").from_env().unwrap();
            assert!(loader.location().is_none());
            assert!(!loader.has_passphrase());
            assert!(!loader.verbose());
        },
    );
}

#[test]
#[serial]
fn test_invalid_verbose_value() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("MYAPP_CONFIG_VERBOSE", Some("sometimes"), || {
        let result = ConfigLoader::new("myapp").from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "MYAPP_CONFIG_VERBOSE");
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected an invalid value error"),
        }
    });
}

#[test]
#[serial]
fn test_env_passphrase_decrypts_config() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    let passphrase = SecretString::from("from-env".to_string());
    fixture.write(
        "credentials",
        encryption::encrypt(b"TOKEN = 'abc'\n", &passphrase).unwrap(),
    );

    temp_env::with_vars(
        [
            ("MYAPP_CONFIG_DIR", None),
            ("MYAPP_CONFIG_PASSPHRASE", Some("from-env")),
        ],
        || {
            let config = ConfigLoader::new("myapp")
                .with_locator(fixture.locator())
                .with_confname("credentials")
                .from_env()
                .unwrap()
                .load()
                .unwrap();
            assert_eq!(config.get("TOKEN"), Some(&Value::from("abc")));
        },
    );
}

#[test]
#[serial]
fn test_env_passphrase_keeps_surrounding_whitespace() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    let passphrase = SecretString::from(" padded pw ".to_string());
    fixture.write(
        "credentials",
        encryption::encrypt(b"TOKEN = 'padded'\n", &passphrase).unwrap(),
    );

    temp_env::with_vars(
        [
            ("MYAPP_CONFIG_DIR", None),
            ("MYAPP_CONFIG_PASSPHRASE", Some(" padded pw ")),
        ],
        || {
            let config = ConfigLoader::new("myapp")
                .with_locator(fixture.locator())
                .with_confname("credentials")
                .from_env()
                .unwrap()
                .load()
                .unwrap();
            assert_eq!(config.get("TOKEN"), Some(&Value::from("padded")));
        },
    );
}
