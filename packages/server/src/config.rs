use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub admin_token: String,
    pub scrape_schedule: String,
    pub user_agent: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".to_string())
                .into(),
            admin_token: env::var("ADMIN_TOKEN").context("ADMIN_TOKEN must be set")?,
            // Six-field cron, defaults to midnight UTC daily.
            scrape_schedule: env::var("SCRAPE_SCHEDULE")
                .unwrap_or_else(|_| "0 0 0 * * *".to_string()),
            user_agent: env::var("USER_AGENT").ok(),
        })
    }
}
