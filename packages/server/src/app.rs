//! Application setup and router configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use scraping::{HeroSink, ScrapeRunner};

use crate::routes::{
    get_hero_handler, get_metadata_handler, health_handler, list_heroes_handler, scrape_handler,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<ScrapeRunner>,
    pub sink: Arc<dyn HeroSink>,
    pub admin_token: String,
}

/// Build the Axum application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/heroes", get(list_heroes_handler))
        .route("/api/heroes/:slug", get(get_hero_handler))
        .route("/api/metadata", get(get_metadata_handler))
        .route("/api/scrape", post(scrape_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
