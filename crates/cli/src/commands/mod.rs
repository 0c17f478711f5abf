//! CLI command implementations.

pub mod deploy_settings;
pub mod seal;
pub mod show;

use anyhow::Result;
use deploy_config::Settings;
use std::path::PathBuf;

/// Namespace seeded with `BASE_DIR`, defaulting to the working directory.
pub fn settings_for(base_dir: Option<PathBuf>) -> Result<Settings> {
    let base_dir = match base_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    Ok(Settings::with_base_dir(base_dir.to_string_lossy()))
}
