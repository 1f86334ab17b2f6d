//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments override values loaded from files and the environment.
//! Log level flags are not merged here; they are applied to the running
//! subscriber once it is installed.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};
use std::path::Path;

/// Applies CLI argument overrides on top of file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration from `--config` or the layered directory,
    /// honouring `--env` when given.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match cli.config.as_deref() {
            Some(path) => {
                Self::validate_config_file_access(path)?;
                ConfigLoader::from_file(path)
            }
            None => ConfigLoader::new()?,
        };

        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        Ok(Self::new(loader.load()?))
    }

    /// The file may have disappeared between argument parsing and loading
    fn validate_config_file_access(path: &Path) -> Result<(), ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        std::fs::File::open(path).map(|_| ()).map_err(|e| {
            ConfigError::validation(
                "config_file",
                format!("Cannot read configuration file '{}': {}", path.display(), e),
            )
        })
    }

    /// Merge CLI arguments with the base configuration and validate the result
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if let Some(Commands::Serve { host, port, .. }) = &cli.command {
            if let Some(host_addr) = host {
                config.server.host = host_addr.clone();
            }
            if let Some(port_num) = port {
                config.server.port = *port_num;
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
