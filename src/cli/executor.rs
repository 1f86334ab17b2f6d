//! Command executor for dispatching CLI commands
//!
//! Runs every command except the server itself, which `main` starts once
//! this returns and [`Cli::starts_server`] agrees.

use super::handlers::{ProjectsCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;

/// Execute a CLI command with the given settings
///
/// # Errors
/// Returns errors from command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommandHandler::new(settings).dry_run()
        }
        Some(Commands::Serve { host, port, .. }) => {
            warn_privileged_bind(host.as_deref(), *port);
            Ok(())
        }
        None => Ok(()),
        Some(Commands::Projects { check }) => {
            ProjectsCommandHandler::new(settings.firebase)
                .execute(*check)
                .await
        }
    }
}

fn warn_privileged_bind(host: Option<&str>, port: Option<u16>) {
    if let (Some("0.0.0.0"), Some(port_num)) = (host, port)
        && port_num < 1024
    {
        tracing::warn!(
            port = port_num,
            "Binding to 0.0.0.0 on a privileged port typically requires root privileges"
        );
    }
}
