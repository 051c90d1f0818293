use anyhow::Context;
use quill_core::{HttpTransport, ProfileConfig};
use tracing_subscriber::EnvFilter;

mod app;
mod config;

use app::AppState;
use config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env()?;
    let profile = ProfileConfig::builder().base_url(config.base_url.as_str()).build();
    let transport = HttpTransport::new(profile.fetch.clone()).context("Failed to build HTTP client")?;

    let app = app::router(AppState::new(transport, profile), &config.public_dir);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    tracing::info!(port = config.port, public_dir = %config.public_dir.display(), "App started");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
