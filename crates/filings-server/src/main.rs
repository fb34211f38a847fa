// Main entry point for the filings API server

use std::sync::Arc;

use anyhow::{Context, Result};
use filings::FilingsService;
use filings_server::{Config, build_app};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,filings=debug,filings_edgar=debug,filings_server=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        rate_limit_ms = config.rate_limit.as_millis() as u64,
        timeout_secs = config.http_timeout.as_secs(),
        "Configuration loaded"
    );

    let client = config.edgar_client()?;
    let app = build_app(FilingsService::new(Arc::new(client)));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
