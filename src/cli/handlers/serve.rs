//! Serve command handler
//!
//! Handles the serve command's dry-run mode; the server itself is started
//! from `main`.

use crate::config::settings::Settings;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate configuration and print what the server would run with
    ///
    /// # Errors
    /// Configuration validation errors
    pub fn dry_run(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        for line in self.summary() {
            println!("✓ {}", line);
        }
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// One line per checked aspect of the configuration
    pub fn summary(&self) -> Vec<String> {
        let firebase = &self.config.firebase;
        let mut lines = vec![
            "Configuration is valid".to_string(),
            format!("Server would bind to: {}", self.config.server.address()),
            format!("Request timeout: {}s", self.config.server.request_timeout),
            format!("FCM endpoint: {}", firebase.fcm.api_base_url),
            format!("Configured projects: {}", firebase.projects.len()),
        ];

        if firebase.projects.contains_key(&firebase.default_project) {
            lines.push(format!("Default project: {}", firebase.default_project));
        } else {
            lines.push(format!(
                "Default project: {} (no credentials configured)",
                firebase.default_project
            ));
        }

        lines
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;

    #[test]
    fn test_serve_handler_new() {
        let config = Settings::default();
        let handler = ServeCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[test]
    fn test_dry_run_valid_config() {
        let handler = ServeCommandHandler::new(Settings::default());
        assert!(handler.dry_run().is_ok());
    }

    #[test]
    fn test_dry_run_invalid_config() {
        let mut config = Settings::default();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config);

        assert!(handler.dry_run().is_err());
    }

    #[test]
    fn test_summary_flags_missing_default_project() {
        let mut config = Settings::default();
        let handler = ServeCommandHandler::new(config.clone());
        assert!(handler.summary().iter().any(|l| l.contains("no credentials configured")));

        config.firebase.projects.insert(
            config.firebase.default_project.clone(),
            ProjectConfig {
                credentials: "app.json".to_string(),
            },
        );
        let handler = ServeCommandHandler::new(config);
        let summary = handler.summary();
        assert!(summary.contains(&"Configured projects: 1".to_string()));
        assert!(summary.contains(&"Default project: app".to_string()));
    }
}
