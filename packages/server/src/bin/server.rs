// Main entry point for the Hero Intel API server

use anyhow::{Context, Result};
use server_core::{build_app, build_pipeline, start_scheduler, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,scraping=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hero Intel backend");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(data_dir = %config.data_dir.display(), "Configuration loaded");

    // Build the scrape pipeline
    let (runner, sink) = build_pipeline(&config.data_dir, config.user_agent.as_deref());

    // Start the daily scrape schedule; the handle must stay alive.
    let _scheduler = start_scheduler(runner.clone(), &config.scrape_schedule)
        .await
        .context("Failed to start scheduler")?;

    // Build application
    let app = build_app(AppState {
        runner,
        sink,
        admin_token: config.admin_token.clone(),
    });

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
