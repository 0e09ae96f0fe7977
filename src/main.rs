use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tripvaults::api::AppState;
use tripvaults::config::TripVaultsConfig;
use tripvaults::web;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = TripVaultsConfig::from_env()?;
    let state = AppState::new(&config)?;

    web::run(config.server.port, state).await
}
