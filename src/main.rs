use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gamedeal::application::{Cli, CommandExecutor};
use gamedeal::shared::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(&cli.config);

    // RUST_LOG > --log-level > config file
    let level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = config?;
    CommandExecutor::new(config).execute(cli.command).await
}
