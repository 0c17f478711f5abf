//! Command dispatch logic.
//!
//! Responsibilities:
//! - Split parsed CLI arguments into the shared load context and the subcommand.
//! - Route the subcommand to its handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Logging setup or exit codes (see `main()`).

use anyhow::Result;
use secrecy::SecretString;

use crate::args::{Cli, Commands, confnames_or_default};
use crate::commands;
use crate::config_context::LoadContext;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let ctx = LoadContext {
        app: cli.app,
        prefix: cli.prefix,
        location: cli.location.filter(|l| !l.trim().is_empty()),
        passphrase: cli
            .passphrase
            .filter(|p| !p.is_empty())
            .map(SecretString::from),
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Show {
            confnames,
            base_dir,
            apply,
        } => commands::show::run(&ctx, confnames_or_default(confnames), base_dir, apply),
        Commands::Encrypt { input, output } => commands::seal::encrypt(&ctx, input, output),
        Commands::Decrypt { input, output } => commands::seal::decrypt(&ctx, input, output),
        Commands::DeploySettings {
            confnames,
            base_dir,
        } => commands::deploy_settings::run(&ctx, confnames_or_default(confnames), base_dir),
    }
}
