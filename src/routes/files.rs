use axum::{
    Router,
    routing::post,
    Json,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    response::{IntoResponse, Response},
    http::StatusCode,
};
use tracing::{info, warn, error};

use crate::documents::DocumentFormat;
use crate::models::{AppState, UploadResponse};
use super::{json_error, payload_too_large};

/// Slack for multipart boundaries and part headers on top of the file limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/api/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let max_bytes = state.config.server.max_upload_bytes;

    let Ok(mut multipart) = multipart else {
        return json_error(StatusCode::BAD_REQUEST, "No file provided");
    };

    // Only the first `file` part counts; later ones are never read
    let mut upload: Option<(String, Vec<u8>)> = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_error(e.status(), &e.body_text(), max_bytes),
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        match field.bytes().await {
            Ok(bytes) => {
                upload = Some((filename, bytes.to_vec()));
                break;
            }
            Err(e) => return multipart_error(e.status(), &e.body_text(), max_bytes),
        }
    }

    let Some((original_name, bytes)) = upload else {
        return json_error(StatusCode::BAD_REQUEST, "No file provided");
    };

    if original_name.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "No file selected");
    }

    let Some(format) = allowed_format(&original_name) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            &format!("Invalid file type. Allowed: {}", DocumentFormat::allowed_list()),
        );
    };

    if bytes.len() > max_bytes {
        return payload_too_large(max_bytes);
    }

    let filename = sanitize_filename(&original_name, format);
    let upload_dir = &state.config.server.upload_dir;
    let filepath = upload_dir.join(&filename);

    let saved = match tokio::fs::create_dir_all(upload_dir).await {
        Ok(()) => tokio::fs::write(&filepath, &bytes).await,
        Err(e) => Err(e),
    };

    if let Err(e) = saved {
        error!(error = %e, path = %filepath.display(), "Failed to save upload");
        return json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Upload failed: {}", e),
        );
    }

    info!(filename = %filename, size = bytes.len(), "File uploaded");

    Json(UploadResponse {
        success: true,
        filename,
        filepath: filepath.to_string_lossy().to_string(),
    })
    .into_response()
}

fn multipart_error(status: StatusCode, detail: &str, max_bytes: usize) -> Response {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return payload_too_large(max_bytes);
    }
    warn!(detail, "Malformed multipart upload");
    json_error(status, &format!("Upload failed: {}", detail))
}

/// The upload's format, if its extension is one we can extract.
fn allowed_format(filename: &str) -> Option<DocumentFormat> {
    filename
        .rsplit_once('.')
        .and_then(|(_, ext)| DocumentFormat::from_extension(ext))
}

/// Reduce a client-supplied filename to a safe basename: directory parts are
/// dropped, whitespace becomes `_`, and only ASCII alphanumerics, `_`, `-`
/// and `.` survive. The extension is normalised to the detected format.
pub fn sanitize_filename(raw: &str, format: DocumentFormat) -> String {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let stem = basename.rsplit_once('.').map_or(basename, |(stem, _)| stem);

    let cleaned: String = stem
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    let cleaned = cleaned.trim_matches(|c: char| c == '.' || c == '_');

    let stem = if cleaned.is_empty() { "document" } else { cleaned };
    format!("{}.{}", stem, format.extension())
}
