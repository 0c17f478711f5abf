//! Show command implementation.

use anyhow::{Context, Result};
use deploy_config::apply;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config_context::LoadContext;
use crate::output::emit;

pub fn run(
    ctx: &LoadContext,
    confnames: Vec<String>,
    base_dir: Option<PathBuf>,
    apply_settings: bool,
) -> Result<()> {
    let config = ctx
        .loader(confnames)?
        .load()
        .context("Failed to load configuration")?;
    info!("Loaded {} values", config.len());

    let json = if apply_settings {
        let mut settings = super::settings_for(base_dir)?;
        let report = apply(&mut settings, config);
        debug!(templated = ?report.templated, log_file = ?report.log_file, "Applied configuration");
        serde_json::to_string_pretty(&settings)?
    } else {
        serde_json::to_string_pretty(&config)?
    };

    emit(format!("{json}\n").as_bytes(), None)
}
