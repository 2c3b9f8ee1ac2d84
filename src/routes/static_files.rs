//! Static File Serving
//!
//! Serves the web front-end from the configured static directory. `/` returns
//! `index.html`; if the front-end is not deployed a small built-in page
//! listing the API is returned instead.

use std::path::{Path, PathBuf};

use axum::{
    Router,
    routing::get,
    response::{IntoResponse, Response},
    http::{StatusCode, header},
};
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Create router for serving static files
pub fn router(static_dir: &Path) -> Router {
    if static_dir.is_dir() {
        info!(path = %static_dir.display(), "Serving static files");
    } else {
        warn!(path = %static_dir.display(), "Static files directory not found, serving built-in index");
    }

    let index_path = static_dir.join("index.html");

    Router::new()
        .route("/", get(move || serve_index(index_path.clone())))
        .nest_service("/static", ServeDir::new(static_dir))
}

async fn serve_index(index_path: PathBuf) -> Response {
    let content = match tokio::fs::read_to_string(&index_path).await {
        Ok(content) => content,
        Err(_) => FALLBACK_INDEX.to_string(),
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        content,
    )
        .into_response()
}

const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Document Intelligence Agent</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 760px; margin: 0 auto; padding: 40px 20px; }
        code { background: #f0f0f0; padding: 2px 6px; border-radius: 4px; }
        pre { background: #f6f6f6; padding: 14px; border-radius: 6px; overflow-x: auto; }
    </style>
</head>
<body>
    <h1>Document Intelligence Agent</h1>
    <p>The API server is running. The web front-end has not been deployed to the static directory.</p>
    <h3>API Endpoints</h3>
    <ul>
        <li><code>GET /api/health</code> - Health check</li>
        <li><code>POST /api/upload</code> - Upload a PDF, DOCX or TXT file (multipart field <code>file</code>)</li>
        <li><code>POST /api/process</code> - Summarize, extract, compare or answer questions</li>
    </ul>
    <h4>Example</h4>
    <pre>curl -X POST http://localhost:5000/api/process \
  -H "Content-Type: application/json" \
  -d '{"task": "summarize", "language": "en", "document_1": "uploads/circular.pdf"}'</pre>
</body>
</html>"#;
