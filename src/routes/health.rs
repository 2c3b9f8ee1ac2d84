use axum::{Router, routing::get, Json, response::Json as ResponseJson};
use crate::models::HealthResponse;

pub const SERVICE_NAME: &str = "Document Intelligence Agent";

pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_check))
}

async fn health_check() -> ResponseJson<HealthResponse> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Json(response)
}
