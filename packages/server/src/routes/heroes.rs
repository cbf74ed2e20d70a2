//! Read surface for merged hero records.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::app::AppState;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("{what} not found"),
        }),
    )
        .into_response()
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    tracing::error!(error = %error, "read request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal error".to_string(),
        }),
    )
        .into_response()
}

/// `GET /api/heroes` - all canonical hero records.
pub async fn list_heroes_handler(Extension(state): Extension<AppState>) -> Response {
    match state.sink.list_heroes().await {
        Ok(heroes) => (StatusCode::OK, Json(heroes)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /api/heroes/{slug}` - one canonical hero record.
pub async fn get_hero_handler(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.sink.get_hero(&slug).await {
        Ok(Some(hero)) => (StatusCode::OK, Json(hero)).into_response(),
        Ok(None) => not_found("hero"),
        Err(e) => internal_error(e),
    }
}

/// `GET /api/metadata` - last-run metadata, 404 before the first run.
pub async fn get_metadata_handler(Extension(state): Extension<AppState>) -> Response {
    match state.sink.metadata().await {
        Ok(Some(metadata)) => (StatusCode::OK, Json(metadata)).into_response(),
        Ok(None) => not_found("metadata"),
        Err(e) => internal_error(e),
    }
}
