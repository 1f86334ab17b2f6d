//! Runtime logger configuration

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LoggerError;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    pub level: String,
}

impl LoggerConfig {
    pub fn new(
        console: ConsoleConfig,
        file: FileConfig,
        level: impl Into<String>,
    ) -> Result<Self, LoggerError> {
        let config = Self {
            console,
            file,
            level: level.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        if !VALID_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(LoggerError::config(format!(
                "Invalid log level '{}'. Valid levels are: {}",
                self.level,
                VALID_LEVELS.join(", ")
            )));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }

        if self.file.enabled {
            self.file.rotation.validate()?;
        }

        Ok(())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// ANSI colours, only honoured when stdout is a terminal
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new(true, true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
    pub rotation: RotationConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/pushgate.log"),
            append: true,
            format: LogFormat::Json,
            rotation: RotationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::format(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

/// Size based rotation: `<file>` rolls to `<file>.1` once it would exceed
/// `max_size`, older generations shift up and anything past `max_files` is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    pub max_size: u64,
    pub max_files: usize,
    pub compress: bool,
}

impl RotationConfig {
    pub fn new(max_size: u64, max_files: usize, compress: bool) -> Result<Self, LoggerError> {
        let config = Self {
            max_size,
            max_files,
            compress,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.max_size == 0 {
            return Err(LoggerError::rotation("Maximum file size must be greater than 0"));
        }
        if self.max_files == 0 {
            return Err(LoggerError::rotation(
                "Maximum number of files must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            max_size: 10 * 1024 * 1024,
            max_files: 5,
            compress: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LoggerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LoggerError::Config { .. })));
    }

    #[test]
    fn test_both_outputs_disabled() {
        let result = LoggerConfig::new(
            ConsoleConfig::new(false, false),
            FileConfig::default(),
            "info",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rotation_checked_only_for_enabled_file() {
        let mut file = FileConfig::default();
        file.rotation.max_files = 0;
        assert!(LoggerConfig::new(ConsoleConfig::default(), file.clone(), "info").is_ok());

        file.enabled = true;
        assert!(LoggerConfig::new(ConsoleConfig::default(), file, "info").is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("FULL".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_rotation_config_validation() {
        assert!(RotationConfig::new(1024, 5, false).is_ok());
        assert!(RotationConfig::new(0, 5, false).is_err());
        assert!(RotationConfig::new(1024, 0, true).is_err());
    }
}
