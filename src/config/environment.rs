//! Deployment environment selection

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Deployment environment, used to pick the `{env}.toml` overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Environment variable read by [`Environment::from_env`]
    pub const ENV_VAR: &'static str = "PUSHGATE_APP_ENV";

    pub const ALL: [Environment; 4] = [
        Environment::Development,
        Environment::Test,
        Environment::Staging,
        Environment::Production,
    ];

    /// Reads `PUSHGATE_APP_ENV`, falling back to `Development` when unset or unknown.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Name of the overlay file loaded on top of `default.toml`
    pub fn config_file_name(&self) -> String {
        format!("{}.toml", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => {
                let valid: Vec<&str> = Self::ALL.iter().map(Environment::as_str).collect();
                Err(ConfigError::EnvVarError(format!(
                    "Invalid environment '{}'. Valid values are: {}",
                    s,
                    valid.join(", ")
                )))
            }
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("stage".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(" Test ".parse::<Environment>().unwrap(), Environment::Test);
    }

    #[test]
    fn test_parse_invalid_lists_valid_values() {
        let err = "qa".parse::<Environment>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("qa"));
        assert!(msg.contains("development, test, staging, production"));
    }

    #[test]
    fn test_round_trip_through_as_str() {
        for env in Environment::ALL {
            assert_eq!(env.as_str().parse::<Environment>().unwrap(), env);
        }
    }

    #[test]
    fn test_config_file_name() {
        assert_eq!(Environment::Production.config_file_name(), "production.toml");
    }
}
