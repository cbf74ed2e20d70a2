//! Hero Intel backend server.
//!
//! HTTP surface and scheduling around the [`scraping`] pipeline:
//! read endpoints for merged hero records, an authenticated manual
//! scrape trigger, and a daily scheduled run.

pub mod app;
pub mod config;
pub mod pipeline;
pub mod routes;
pub mod scheduler;

pub use app::{build_app, AppState};
pub use config::Config;
pub use pipeline::build_pipeline;
pub use scheduler::start_scheduler;
