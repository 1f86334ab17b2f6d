//! Configuration settings structures for pushgate
//!
//! Everything here can be loaded from TOML files and `PUSHGATE_*`
//! environment variables (see [`crate::config::ConfigLoader`]).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig, RotationConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "pushgate".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/pushgate.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_max_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_max_files() -> usize {
    5
}

fn default_project() -> String {
    "app".to_string()
}

fn default_credentials_base_dir() -> String {
    ".".to_string()
}

fn default_fcm_api_base_url() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_fcm_scope() -> String {
    "https://www.googleapis.com/auth/cloud-platform".to_string()
}

fn default_fcm_timeout() -> u64 {
    10
}

// ============================================================================
// Application Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound for a whole request, delivery call included (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// Size based rotation for the log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSettings {
    /// Maximum file size in bytes before rotation
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Number of rotated generations to keep
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Gzip rotated generations
    #[serde(default)]
    pub compress: bool,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            max_files: default_max_files(),
            compress: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// "full", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    #[serde(default)]
    pub rotation: RotationSettings,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
            rotation: RotationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Filter directive, usually one of "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime [`LoggerConfig`].
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = self.console.into_console_config();
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

impl ConsoleSettings {
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;
        let rotation = self.rotation.into_rotation_config()?;

        Ok(FileConfig {
            enabled: self.enabled,
            path: PathBuf::from(self.path),
            append: self.append,
            format,
            rotation,
        })
    }

    pub(crate) fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))
    }
}

impl RotationSettings {
    pub fn into_rotation_config(self) -> Result<RotationConfig, ConfigError> {
        RotationConfig::new(self.max_size, self.max_files, self.compress)
            .map_err(|e| ConfigError::validation("logger.file.rotation", e.to_string()))
    }
}

// ============================================================================
// Firebase Configuration
// ============================================================================

/// Credentials entry for one named project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Path to the service-account JSON, relative to `credentials_base_dir`
    /// unless absolute
    pub credentials: String,
}

/// FCM HTTP v1 endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcmSettings {
    #[serde(default = "default_fcm_api_base_url")]
    pub api_base_url: String,

    /// OAuth scope requested in the service-account assertion
    #[serde(default = "default_fcm_scope")]
    pub scope: String,

    /// Per-call timeout for token exchange and send requests (seconds)
    #[serde(default = "default_fcm_timeout")]
    pub request_timeout: u64,
}

impl Default for FcmSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_fcm_api_base_url(),
            scope: default_fcm_scope(),
            request_timeout: default_fcm_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    /// Project used when a request names none
    #[serde(default = "default_project")]
    pub default_project: String,

    #[serde(default = "default_credentials_base_dir")]
    pub credentials_base_dir: String,

    #[serde(default)]
    pub fcm: FcmSettings,

    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            default_project: default_project(),
            credentials_base_dir: default_credentials_base_dir(),
            fcm: FcmSettings::default(),
            projects: BTreeMap::new(),
        }
    }
}

impl FirebaseConfig {
    /// Name that a request targets, substituting the default project when absent.
    pub fn project_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_project)
    }

    /// Credentials path configured for `project`, resolved against the base dir.
    ///
    /// Returns `None` when the project has no entry.
    pub fn credentials_path(&self, project: &str) -> Option<PathBuf> {
        let entry = self.projects.get(project)?;
        let path = Path::new(&entry.credentials);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(Path::new(&self.credentials_base_dir).join(path))
        }
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub firebase: FirebaseConfig,
}
