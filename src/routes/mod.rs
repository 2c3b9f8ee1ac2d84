//! API Routes
//!
//! - `/api/health` - Health check
//! - `/api/upload` - File upload (multipart)
//! - `/api/process` - Document processing
//! - `/` and `/static` - Web front-end
//!
//! Anything else gets a JSON 404.

pub mod files;
pub mod health;
pub mod process;
pub mod static_files;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors_origins = state.config.server.cors_allowed_origins.clone();
    let static_dir = state.config.server.static_dir.clone();

    let router = Router::new()
        .merge(health::router())
        .merge(files::router(state.clone()))
        .merge(process::router(state))
        .merge(static_files::router(&static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &cors_origins)
}

async fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "Endpoint not found")
}

pub(crate) fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// 413 shared by the upload and process routes.
pub(crate) fn payload_too_large(max_bytes: usize) -> Response {
    json_error(
        StatusCode::PAYLOAD_TOO_LARGE,
        &format!("File too large. Maximum size is {}MB", max_bytes / (1024 * 1024)),
    )
}
