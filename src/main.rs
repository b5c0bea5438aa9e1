use std::env;
use std::sync::Arc;
use log::info;
use seaweather::api::{create_router, AppState};
use seaweather::config::load_config;
use seaweather::logging::setup_logger;
use seaweather::manager_openweather::OpenWeather;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = env::args().nth(1)
        .or_else(|| env::var("CONFIG_PATH").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = load_config(&config_path)?;
    let _log_handle = setup_logger(&config.general)?;

    // Print version
    info!("seaweather version: {}", env!("CARGO_PKG_VERSION"));

    let state = AppState { source: Arc::new(OpenWeather::new(&config.open_weather)) };

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!("listening on {}", config.server.bind_address);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
