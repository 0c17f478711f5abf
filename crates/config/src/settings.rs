//! Applying a loaded config map onto an application settings namespace.
//!
//! Responsibilities:
//! - Define the `Namespace` capability (keyed get/set of [`Value`]s).
//! - Render `%(LOCALSTATEDIR)s` placeholders against the namespace's `BASE_DIR`.
//! - Provision the configured log file (parent directories and an empty file).
//!
//! Does NOT handle:
//! - Loading or decrypting config files (see loader).
//!
//! Invariants:
//! - `apply` never fails; provisioning problems are logged as warnings.
//! - An existing log file is never truncated.
//! - `BASE_DIR` is read before any of the map's assignments take effect.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::{BASE_DIR_KEY, LOCALSTATEDIR_MARKER, LOG_FILE_KEY};
use crate::literal::Value;
use crate::loader::ConfigMap;

/// A keyed store of settings that a config map can be applied onto.
pub trait Namespace {
    fn get(&self, key: &str) -> Option<&Value>;

    fn set(&mut self, key: &str, value: Value);

    /// Application base directory, used to render `LOCALSTATEDIR`.
    fn base_dir(&self) -> Option<&str> {
        self.get(BASE_DIR_KEY).and_then(Value::as_str)
    }

    /// Log file to provision after applying.
    fn log_file(&self) -> Option<PathBuf> {
        self.get(LOG_FILE_KEY)
            .and_then(Value::as_str)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}

/// In-memory settings namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace seeded with `BASE_DIR`.
    pub fn with_base_dir(base_dir: impl Into<String>) -> Self {
        let mut settings = Self::new();
        settings.set(BASE_DIR_KEY, Value::Str(base_dir.into()));
        settings
    }
}

impl Namespace for Settings {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

/// Outcome of provisioning the log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFileStatus {
    /// The namespace has no `LOG_FILE`.
    NotConfigured,
    /// Parent directories and the file exist.
    Ready(PathBuf),
    Failed { path: PathBuf, kind: io::ErrorKind },
}

/// What [`apply`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Keys whose values had `LOCALSTATEDIR` rendered.
    pub templated: Vec<String>,
    pub log_file: LogFileStatus,
}

/// Renders `%(LOCALSTATEDIR)s` and `%%` in `value`.
///
/// Any other `%` sequence is copied through unchanged.
fn render_localstatedir(value: &str, localstatedir: &str) -> String {
    let placeholder = format!("%({LOCALSTATEDIR_MARKER})s");
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("%%") {
            out.push('%');
            rest = after;
        } else if let Some(after) = tail.strip_prefix(placeholder.as_str()) {
            out.push_str(localstatedir);
            rest = after;
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Creates missing parent directories and an empty file at `path`.
fn touch(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)?;
    Ok(())
}

fn provision_log_file(path: PathBuf) -> LogFileStatus {
    match touch(&path) {
        Ok(()) => {
            tracing::info!("logging app messages in {}", path.display());
            LogFileStatus::Ready(path)
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            tracing::warn!("permission denied on {}", path.display());
            LogFileStatus::Failed {
                path,
                kind: e.kind(),
            }
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "could not create log file {}",
                path.display()
            );
            LogFileStatus::Failed {
                path,
                kind: e.kind(),
            }
        }
    }
}

/// Writes every entry of `config` onto `namespace`, then provisions the log file.
pub fn apply<N: Namespace + ?Sized>(namespace: &mut N, config: ConfigMap) -> ApplyReport {
    let localstatedir = namespace
        .base_dir()
        .map(|base_dir| format!("{base_dir}/var"));
    let mut templated = Vec::new();

    for (key, value) in config {
        let value = match value {
            Value::Str(text) if text.contains(LOCALSTATEDIR_MARKER) => match &localstatedir {
                Some(localstatedir) => {
                    templated.push(key.clone());
                    Value::Str(render_localstatedir(&text, localstatedir))
                }
                None => {
                    tracing::warn!(key = %key, "BASE_DIR is not set; leaving LOCALSTATEDIR unrendered");
                    Value::Str(text)
                }
            },
            other => other,
        };
        namespace.set(&key.to_uppercase(), value);
    }

    let log_file = match namespace.log_file() {
        Some(path) => provision_log_file(path),
        None => LogFileStatus::NotConfigured,
    };

    ApplyReport {
        templated,
        log_file,
    }
}
