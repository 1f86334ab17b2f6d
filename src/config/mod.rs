//! Configuration management for pushgate
//!
//! Layered loading from TOML files and environment variables, with the
//! following priority (lowest to highest):
//! 1. `default.toml`
//! 2. `{environment}.toml`
//! 3. `local.toml` (not committed to version control)
//! 4. `PUSHGATE_*` environment variables
//! 5. command line flags, applied by [`crate::cli::ConfigurationMerger`]

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{FcmSettings, FirebaseConfig, ProjectConfig, Settings};
