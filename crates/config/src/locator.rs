//! Config file discovery across the fixed search path.
//!
//! Responsibilities:
//! - Build the ordered candidate list for a config name.
//! - Return the first candidate that exists as a regular file.
//!
//! Does NOT handle:
//! - Object-store lookups (see `provider.rs`).
//! - Reading file contents.
//!
//! Invariants:
//! - Candidate order is fixed: env config dir, install prefix, system prefix, working dir.
//! - A missing directory never stops the search; only file existence is tested.
//! - Not finding a file is a warning, never an error.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::constants::CONFIG_DIR_ENV_SUFFIX;
use crate::loader::env_var_or_none;

/// Where a candidate path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLocation {
    /// `${APP_NAME}_CONFIG_DIR/<confname>`.
    EnvConfigDir,
    /// `<parent of executable dir>/<prefix>/<app_name>/<confname>`.
    InstallPrefix,
    /// `/<prefix>/<app_name>/<confname>`.
    SystemPrefix,
    /// `<cwd>/<confname>`.
    WorkingDir,
}

impl fmt::Display for SearchLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchLocation::EnvConfigDir => "env-config-dir",
            SearchLocation::InstallPrefix => "install-prefix",
            SearchLocation::SystemPrefix => "system-prefix",
            SearchLocation::WorkingDir => "working-dir",
        };
        f.write_str(name)
    }
}

/// A candidate path tagged with its search location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub location: SearchLocation,
    pub path: PathBuf,
}

/// Name of the environment variable overriding the config directory.
pub fn config_dir_var(app_name: &str) -> String {
    format!("{app_name}{CONFIG_DIR_ENV_SUFFIX}").to_uppercase()
}

/// Lexically normalizes a path: drops `.` and resolves `..` without touching
/// the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolves config names to paths on the local filesystem.
#[derive(Debug, Clone)]
pub struct Locator {
    exe_dir: Option<PathBuf>,
    cwd: Option<PathBuf>,
    root: PathBuf,
}

impl Default for Locator {
    fn default() -> Self {
        Self::new()
    }
}

impl Locator {
    /// Locator bound to the running process: its executable, working
    /// directory and the filesystem root.
    pub fn new() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self {
            exe_dir,
            cwd: std::env::current_dir().ok(),
            root: PathBuf::from("/"),
        }
    }

    /// Override the directory treated as holding the running executable.
    pub fn with_exe_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exe_dir = Some(dir.into());
        self
    }

    /// Override the working directory candidate.
    pub fn with_cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Override the root used for the system prefix candidate (primarily for testing).
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Ordered list of candidate paths for `confname`.
    pub fn candidates(&self, confname: &str, app_name: &str, prefix: &str) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(4);

        if let Some(dir) = env_var_or_none(&config_dir_var(app_name)) {
            candidates.push(Candidate {
                location: SearchLocation::EnvConfigDir,
                path: normalize_path(&Path::new(&dir).join(confname)),
            });
        }

        if let Some(install_root) = self.exe_dir.as_deref().and_then(Path::parent) {
            candidates.push(Candidate {
                location: SearchLocation::InstallPrefix,
                path: normalize_path(&install_root.join(prefix).join(app_name).join(confname)),
            });
        }

        candidates.push(Candidate {
            location: SearchLocation::SystemPrefix,
            path: normalize_path(&self.root.join(prefix).join(app_name).join(confname)),
        });

        if let Some(cwd) = &self.cwd {
            candidates.push(Candidate {
                location: SearchLocation::WorkingDir,
                path: normalize_path(&cwd.join(confname)),
            });
        }

        candidates
    }

    /// Returns the first candidate for `confname` that is an existing file.
    pub fn locate(
        &self,
        confname: &str,
        app_name: &str,
        prefix: &str,
        verbose: bool,
    ) -> Option<PathBuf> {
        let found = self
            .candidates(confname, app_name, prefix)
            .into_iter()
            .find(|candidate| candidate.path.is_file());

        match found {
            Some(candidate) => {
                if verbose {
                    tracing::info!(
                        location = %candidate.location,
                        "config loaded from {}",
                        candidate.path.display()
                    );
                }
                Some(candidate.path)
            }
            None => {
                tracing::warn!(app_name, "config {confname} was not found.");
                None
            }
        }
    }
}

/// Locates `confname` using the running process's search path.
pub fn locate_config(
    confname: &str,
    app_name: &str,
    prefix: &str,
    verbose: bool,
) -> Option<PathBuf> {
    Locator::new().locate(confname, app_name, prefix, verbose)
}
