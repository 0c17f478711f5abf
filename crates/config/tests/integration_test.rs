//! Integration tests for loading and applying configuration end to end.
//!
//! These tests drive the public API the way an application would at startup:
//! locate and load its config files, apply them onto its own settings
//! namespace, then resolve deployment settings.

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::SecretString;
use serial_test::serial;
use tempfile::TempDir;

use deploy_config::{
    ConfigError, ConfigLoader, DeploySettings, LogFileStatus, Locator, Namespace, Value, apply,
    encryption, env_var_or_none, load_config, locate_config,
};

const APP: &str = "e2eapp";
const DIR_VAR: &str = "E2EAPP_CONFIG_DIR";

/// An application-owned namespace, standing in for a settings module.
#[derive(Default)]
struct AppSettings {
    attrs: HashMap<String, Value>,
}

impl Namespace for AppSettings {
    fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.attrs.insert(key.to_string(), value);
    }
}

fn conf_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("conf");
    std::fs::create_dir_all(&dir).unwrap();
    (temp, dir)
}

#[test]
#[serial]
fn test_startup_sequence_with_encrypted_credentials() {
    let (temp, dir) = conf_dir();
    let passphrase = SecretString::from("startup-secret".to_string());
    std::fs::write(
        dir.join("site.conf"),
        "ALLOWED_HOSTS = ('example.com',)\nLOG_FILE = '%(LOCALSTATEDIR)s/log/e2eapp.log'\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("credentials"),
        encryption::encrypt(b"SECRET_KEY = 'k3y'\nDEPLOYUTILS_DRY_RUN = True\n", &passphrase)
            .unwrap(),
    )
    .unwrap();

    temp_env::with_var(DIR_VAR, Some(&dir), || {
        let config = load_config(
            APP,
            &["site.conf", "credentials"],
            None,
            Some(passphrase.clone()),
            "etc",
            false,
        );
        // Plain site.conf cannot be decrypted, so a passphrase applies to every file.
        assert!(matches!(config, Err(ConfigError::Decryption { ref confname, .. }) if confname == "site.conf"));

        let mut settings = AppSettings::default();
        let base_dir = temp.path().join("app");
        settings.set("BASE_DIR", Value::Str(base_dir.display().to_string()));

        let site = load_config(APP, &["site.conf"], None, None, "etc", false).unwrap();
        let credentials = ConfigLoader::new(APP)
            .with_confname("credentials")
            .with_passphrase(passphrase.clone())
            .load()
            .unwrap();

        let report = apply(&mut settings, site);
        apply(&mut settings, credentials);

        let log_file = base_dir.join("var").join("log").join("e2eapp.log");
        assert_eq!(report.log_file, LogFileStatus::Ready(log_file.clone()));
        assert!(log_file.is_file());
        assert_eq!(settings.get("SECRET_KEY"), Some(&Value::from("k3y")));

        let deploy = DeploySettings::from_namespace(&settings).unwrap();
        assert!(deploy.dry_run);
        assert_eq!(deploy.deployed_webapp_root, "/var/www/example.com");
    });
}

#[test]
#[serial]
fn test_locate_config_uses_env_dir() {
    let (_temp, dir) = conf_dir();
    std::fs::write(dir.join("site.conf"), "A = 1\n").unwrap();

    temp_env::with_var(DIR_VAR, Some(&dir), || {
        assert_eq!(
            locate_config("site.conf", APP, "etc", false),
            Some(dir.join("site.conf"))
        );
        assert_eq!(locate_config("other.conf", "unrelated-app", "etc", false), None);
    });
}

#[test]
#[serial]
fn test_locator_override_for_install_layout() {
    let temp = TempDir::new().unwrap();
    let install = temp.path().join("opt").join(APP);
    let path = install.join("etc").join(APP).join("site.conf");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "INSTALLED = True\n").unwrap();

    temp_env::with_var_unset(DIR_VAR, || {
        let config = ConfigLoader::new(APP)
            .with_locator(
                Locator::new()
                    .with_exe_dir(install.join("bin"))
                    .with_root(temp.path().join("root"))
                    .with_cwd(temp.path().join("cwd")),
            )
            .with_confname("site.conf")
            .load()
            .unwrap();
        assert_eq!(config.get("INSTALLED"), Some(&Value::Bool(true)));
    });
}

/// Test that env_var_or_none is exported and works correctly
#[test]
#[serial]
fn test_env_var_or_none_exported() {
    temp_env::with_var("_DEPLOYCONF_E2E_VAR", Some("  value  "), || {
        assert_eq!(env_var_or_none("_DEPLOYCONF_E2E_VAR"), Some("value".to_string()));
    });
    temp_env::with_var("_DEPLOYCONF_E2E_VAR", Some("   "), || {
        assert_eq!(env_var_or_none("_DEPLOYCONF_E2E_VAR"), None);
    });
}
