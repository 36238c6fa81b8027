//! Payroll engine HTTP server.

use std::sync::Arc;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::store::InMemoryStore;

const CONFIG_DIR: &str = "./config/payroll";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payroll_engine=info".into()),
        )
        .init();

    let config = match ConfigLoader::load(CONFIG_DIR) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Using built-in configuration: {e}");
            ConfigLoader::default()
        }
    };
    let bind_address = config.application().bind_address.clone();
    tracing::info!(
        "Starting {} {}",
        config.application().name,
        config.application().version
    );

    let state = AppState::new(Arc::new(InMemoryStore::new()), config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Listening on {bind_address}");
    axum::serve(listener, app).await?;
    Ok(())
}
