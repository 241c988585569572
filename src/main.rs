//! PPh21 withholding calculator server.
//!
//! Serves the calculator page on `/` and the JSON endpoint on `/calculate`.
//! The regulation directory is read from `PPH21_CONFIG_DIR` and the listen
//! address from `PPH21_BIND_ADDR`.

use std::error::Error;

use pph21_engine::api::{AppState, create_router};
use pph21_engine::config::ConfigLoader;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/pp58_2023";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("PPH21_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        std::env::var("PPH21_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir).inspect_err(|err| {
        tracing::error!(config_dir = %config_dir, error = %err, "Failed to load regulation config");
    })?;
    tracing::info!(
        regulation = %config.regulation().code,
        effective_date = %config.regulation().effective_date,
        "Loaded regulation config"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("pph21-engine listening on {bind_addr}");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
