//! Manual scrape trigger.

use axum::{
    extract::Extension,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use scraping::ScrapeError;

use crate::app::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_heroes: Option<usize>,
}

impl ScrapeResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            total_heroes: None,
        }
    }
}

/// `POST /api/scrape` - trigger a full scrape run now.
///
/// Requires a bearer token matching the configured admin token. A run
/// already in progress is reported as a conflict, not queued.
pub async fn scrape_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<ScrapeResponse>) {
    if !is_authorized(&headers, &state.admin_token) {
        warn!("rejected unauthorized scrape trigger");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ScrapeResponse::failure("invalid or missing bearer token")),
        );
    }

    info!("manual scrape triggered");
    match state.runner.run().await {
        Ok(summary) => (
            StatusCode::OK,
            Json(ScrapeResponse {
                success: true,
                message: "Scraping completed successfully".to_string(),
                total_heroes: Some(summary.total_heroes),
            }),
        ),
        Err(ScrapeError::RunInProgress) => (
            StatusCode::CONFLICT,
            Json(ScrapeResponse::failure("a scrape run is already in progress")),
        ),
        Err(e) => {
            error!(error = %e, "manual scrape failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ScrapeResponse::failure(format!("Error during scraping: {e}"))),
            )
        }
    }
}

fn is_authorized(headers: &HeaderMap, admin_token: &str) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == admin_token)
}
