//! CLI module for pushgate
//!
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command handlers for `serve` and `projects`

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::settings::Settings;
use crate::logger::{LogLevelHandle, init_logger};

/// Load configuration files and apply CLI overrides
///
/// # Errors
/// Returns error if configuration loading, merging, or validation fails
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::load(cli).context("Configuration error")?;

    merger
        .merge_cli_args(cli)
        .context("Configuration merge error")
}

/// Install the global logger, then apply `--verbose`, `--quiet` or
/// `serve --log-level` on top of the configured level.
///
/// The returned handle must stay alive for the filter to remain reloadable.
pub fn init_logger_from_settings(settings: &Settings, cli: &Cli) -> anyhow::Result<LogLevelHandle> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Logger configuration error")?;

    let handle = init_logger(logger_config).context("Logger initialization error")?;

    if let Some(level) = cli.log_level_override() {
        handle
            .set_level(level.as_str())
            .context("Failed to apply log level override")?;
        tracing::debug!(level = level.as_str(), "Log level overridden from command line");
    }

    Ok(handle)
}
