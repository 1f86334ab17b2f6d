//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Push notification gateway for Firebase Cloud Messaging
#[derive(Parser, Debug)]
#[command(name = "pushgate")]
#[command(about = "Push notification gateway for Firebase Cloud Messaging")]
#[command(long_about = "
Pushgate accepts notification requests over HTTP and relays them to Firebase
Cloud Messaging, picking the service account credentials of the named project.

EXAMPLES:
    # Start the server with default configuration
    pushgate serve

    # Start server on custom host and port
    pushgate serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    pushgate --config /path/to/config.toml serve

    # Check configuration without starting server
    pushgate serve --dry-run

    # List configured projects and verify their credential files
    pushgate projects --check
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load a single TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/pushgate/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the `{env}.toml` overlay instead of reading PUSHGATE_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   pushgate serve                           # Start with defaults
    ///   pushgate serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   pushgate serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override, takes precedence over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration, print a summary and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// List configured Firebase projects
    ///
    /// Examples:
    ///   pushgate projects            # Print project names and credential paths
    ///   pushgate projects --check    # Also parse every credentials file
    Projects {
        /// Verify each credentials file parses as a service account key.
        /// Exits non-zero when any project fails.
        #[arg(long)]
        check: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Whether the process should go on to run the HTTP server
    pub fn starts_server(&self) -> bool {
        matches!(
            self.command,
            None | Some(Commands::Serve { dry_run: false, .. })
        )
    }

    /// Level requested on the command line, `serve --log-level` first
    pub fn log_level_override(&self) -> Option<LogLevel> {
        if let Some(Commands::Serve {
            log_level: Some(level),
            ..
        }) = &self.command
        {
            return Some(*level);
        }

        if self.verbose {
            Some(LogLevel::Debug)
        } else if self.quiet {
            Some(LogLevel::Error)
        } else {
            None
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}
