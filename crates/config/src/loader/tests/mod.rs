//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test merging of several config names and failure atomicity.
//! - Test encrypted configs and passphrase handling.
//! - Test environment variable handling and precedence.
//! - Test object-store precedence and fallback against a mock server.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Every loader gets a locator rooted in a temporary directory.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;

use crate::locator::Locator;

pub mod env_tests;
pub mod object_store_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Scratch filesystem with isolated search locations.
pub struct Fixture {
    _temp: TempDir,
    pub cwd: PathBuf,
    pub root: PathBuf,
    pub exe_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let base = temp.path().to_path_buf();
        let fixture = Self {
            cwd: base.join("cwd"),
            root: base.join("root"),
            exe_dir: base.join("install").join("bin"),
            _temp: temp,
        };
        std::fs::create_dir_all(&fixture.cwd).unwrap();
        fixture
    }

    pub fn locator(&self) -> Locator {
        Locator::new()
            .with_cwd(&self.cwd)
            .with_root(&self.root)
            .with_exe_dir(&self.exe_dir)
    }

    /// Writes `content` to `<cwd>/<confname>`.
    pub fn write(&self, confname: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.cwd.join(confname);
        write_file(&path, content);
        path
    }

    /// Writes `content` to `<root>/etc/<app>/<confname>`.
    pub fn write_system(&self, app: &str, confname: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root.join("etc").join(app).join(confname);
        write_file(&path, content);
        path
    }
}

fn write_file(path: &Path, content: impl AsRef<[u8]>) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}
