//! Configuration validation logic
//!
//! Each section validates itself; [`Settings::validate`] runs them in order
//! and reports the first failure with the dotted key of the offending field.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::error::ConfigError;
use crate::config::settings::{FirebaseConfig, LoggerSettings, ServerConfig, Settings};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Project names end up in log fields and env var keys
static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid project name pattern"));

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host is required. Use 127.0.0.1 for local access or 0.0.0.0 for all interfaces.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one log output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        self.file.parse_format()?;

        if self.file.rotation.max_size == 0 {
            return Err(ConfigError::validation(
                "logger.file.rotation.max_size",
                "Maximum file size must be greater than 0 bytes.",
            ));
        }

        if self.file.rotation.max_files == 0 {
            return Err(ConfigError::validation(
                "logger.file.rotation.max_files",
                "At least one rotated file must be kept.",
            ));
        }

        Ok(())
    }
}

impl FirebaseConfig {
    /// A default project without a credentials entry is accepted here; requests
    /// for it fail at dispatch time instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_project.trim().is_empty() {
            return Err(ConfigError::validation(
                "firebase.default_project",
                "Default project name must not be empty.",
            ));
        }

        for (name, project) in &self.projects {
            if !PROJECT_NAME.is_match(name) {
                return Err(ConfigError::ValidationError {
                    field: format!("firebase.projects.{name}"),
                    message: "Project names may only contain letters, digits, '-' and '_'."
                        .to_string(),
                });
            }

            if project.credentials.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: format!("firebase.projects.{name}.credentials"),
                    message: "Credentials path must not be empty.".to_string(),
                });
            }
        }

        if reqwest::Url::parse(&self.fcm.api_base_url).is_err() {
            return Err(ConfigError::ValidationError {
                field: "firebase.fcm.api_base_url".to_string(),
                message: format!("Invalid URL '{}'", self.fcm.api_base_url),
            });
        }

        if self.fcm.request_timeout == 0 {
            return Err(ConfigError::validation(
                "firebase.fcm.request_timeout",
                "FCM request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.logger.validate()?;
        self.firebase.validate()?;
        Ok(())
    }
}
