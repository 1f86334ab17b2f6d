use clap::Parser;

use pushgate::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};
use pushgate::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    // Keep the handle alive for the whole process so the filter stays reloadable
    let _log_handle = init_logger_from_settings(&settings, &cli)?;

    execute_command(&cli, settings.clone()).await?;

    if cli.starts_server() {
        Server::new(settings).run().await?;
    }

    Ok(())
}
