// One-shot data build: run every extractor once, merge, persist, exit.
// Intended for CI or local refreshes without a running server.

use anyhow::{Context, Result};
use server_core::build_pipeline;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,scraping=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let _ = dotenvy::dotenv();
    let data_dir: PathBuf = std::env::var("DATA_DIR")
        .unwrap_or_else(|_| "./data".to_string())
        .into();
    let user_agent = std::env::var("USER_AGENT").ok();

    tracing::info!(data_dir = %data_dir.display(), "Starting data build process");

    let (runner, _sink) = build_pipeline(&data_dir, user_agent.as_deref());
    let summary = runner.run().await.context("Data build process failed")?;

    tracing::info!(
        total = summary.total_heroes,
        "Data build process completed successfully"
    );
    for (source, count) in &summary.per_source_counts {
        tracing::info!(source, count, "source contribution");
    }

    Ok(())
}
