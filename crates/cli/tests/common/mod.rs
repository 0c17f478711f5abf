//! Shared test utilities for deployconf integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Provide a scratch workspace with a config directory for the `myapp` app.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - Config files are found through `MYAPP_CONFIG_DIR`, never the host's `/etc`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const APP: &str = "myapp";
pub const PASSPHRASE: &str = "correct horse battery staple";

/// Returns a hermetic `deployconf` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Variables that would select an app, passphrase or location are cleared.
pub fn deployconf_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("deployconf");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Clear potential host leakage
    cmd.env_remove("DEPLOYCONF_APP")
        .env_remove("DEPLOYCONF_PASSPHRASE")
        .env_remove("RUST_LOG")
        .env_remove("MYAPP_CONFIG_DIR")
        .env_remove("MYAPP_CONFIG_LOCATION")
        .env_remove("MYAPP_CONFIG_PASSPHRASE")
        .env_remove("MYAPP_CONFIG_VERBOSE");

    cmd
}

/// A temporary working directory holding `conf/` for `myapp`.
pub struct Workspace {
    temp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("conf")).unwrap();
        Self { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn conf_dir(&self) -> PathBuf {
        self.temp.path().join("conf")
    }

    /// Writes a config file into the config directory.
    pub fn write_conf(&self, confname: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.conf_dir().join(confname);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Hermetic command running in this workspace with `--app myapp`.
    pub fn cmd(&self) -> Command {
        let mut cmd = deployconf_cmd();
        cmd.current_dir(self.path())
            .env("MYAPP_CONFIG_DIR", self.conf_dir())
            .args(["--app", APP]);
        cmd
    }

    /// Seals `plaintext` with [`PASSPHRASE`] using the CLI and stores it as `confname`.
    pub fn write_sealed(&self, confname: &str, plaintext: &str) -> PathBuf {
        let input = self.path().join(format!("{confname}.plain"));
        std::fs::write(&input, plaintext).unwrap();
        let output = self.conf_dir().join(confname);

        deployconf_cmd()
            .args(["--passphrase", PASSPHRASE, "encrypt"])
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .assert()
            .success();
        output
    }
}

/// Parses stdout of a successful command as JSON.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
