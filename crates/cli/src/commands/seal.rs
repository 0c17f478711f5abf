//! Encrypt and decrypt command implementations.

use anyhow::{Context, Result};
use deploy_config::encryption;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config_context::LoadContext;
use crate::output::emit;

fn read_input(input: &Path) -> Result<Vec<u8>> {
    std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))
}

pub fn encrypt(ctx: &LoadContext, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let passphrase = ctx.require_passphrase()?;
    let plaintext = read_input(&input)?;
    if encryption::is_sealed(&plaintext) {
        warn!("{} already looks encrypted; sealing it again", input.display());
    }

    let sealed = encryption::encrypt(&plaintext, passphrase)
        .with_context(|| format!("Failed to encrypt {}", input.display()))?;
    emit(&sealed, output.as_deref())
}

pub fn decrypt(ctx: &LoadContext, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let passphrase = ctx.require_passphrase()?;
    let sealed = read_input(&input)?;

    let plaintext = encryption::decrypt(&sealed, passphrase)
        .with_context(|| format!("Failed to decrypt {}", input.display()))?;
    emit(&plaintext, output.as_deref())
}
