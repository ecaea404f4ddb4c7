//! TCP server binary for the board-game service.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tictac_server::config::Config;
use tictac_server::server;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    server::run(config).await
}
