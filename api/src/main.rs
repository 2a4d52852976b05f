mod config;
mod error;
mod middleware;
mod models;
mod pdf_pages;
mod routes;
mod state;

use anyhow::{Context, Result};
use config::ApiConfig;
use state::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = ApiConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let app = routes::router(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
