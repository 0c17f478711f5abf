//! Deploy-settings command implementation.

use anyhow::{Context, Result};
use deploy_config::{DeploySettings, apply};
use std::path::PathBuf;

use crate::config_context::LoadContext;
use crate::output::emit;

pub fn run(ctx: &LoadContext, confnames: Vec<String>, base_dir: Option<PathBuf>) -> Result<()> {
    let config = ctx
        .loader(confnames)?
        .load()
        .context("Failed to load configuration")?;

    let mut settings = super::settings_for(base_dir)?;
    apply(&mut settings, config);

    let deploy = DeploySettings::from_namespace(&settings)
        .context("Failed to resolve deployment settings")?;
    let json = serde_json::to_string_pretty(&deploy)?;
    emit(format!("{json}\n").as_bytes(), None)
}
