use axum::{
    Router,
    routing::post,
    Json,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    http::StatusCode,
};
use tracing::{info, error};

use crate::models::{AppState, ProcessRequest, ProcessResponse};
use crate::types::{AppError, Language, ProcessingRequest, Task};
use super::payload_too_large;

pub fn router(state: AppState) -> Router {
    // Literal documents travel in the JSON body, so it shares the upload limit
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/api/process", post(process_document))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn process_document(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            info!("Rejected oversized process request");
            return payload_too_large(state.config.server.max_upload_bytes);
        }
        Err(rejection) => {
            return AppError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
                .into_response();
        }
    };

    let request = match validate(payload) {
        Ok(request) => request,
        Err(e) => {
            info!(error = %e, "Rejected process request");
            return e.into_response();
        }
    };

    match state.agent.process(request).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ProcessResponse { success: true, result }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Document processing failed");
            e.into_response()
        }
    }
}

/// Boundary validation. The task-specific checks repeat the agent's own
/// preconditions so clients get a 400 rather than an empty result.
pub fn validate(payload: ProcessRequest) -> Result<ProcessingRequest, AppError> {
    let task = required(payload.task, "task")?;
    let language = required(payload.language, "language")?;
    let document_1 = required(payload.document_1, "document_1")?;

    // A present but null task or language is invalid, not missing
    let task = task.as_deref().and_then(|t| t.parse::<Task>().ok()).ok_or_else(|| {
        let valid: Vec<_> = Task::ALL.iter().map(|t| t.as_str()).collect();
        AppError::Validation(format!("Invalid task. Must be one of: {}", valid.join(", ")))
    })?;

    let language = language.as_deref().and_then(Language::from_selector).ok_or_else(|| {
        let valid: Vec<_> = Language::ALL.iter().map(|l| l.as_str()).collect();
        AppError::Validation(format!("Invalid language. Must be one of: {}", valid.join(", ")))
    })?;

    let has_query = payload.query.as_deref().is_some_and(|q| !q.is_empty());
    if matches!(task, Task::Extract | Task::Qa) && !has_query {
        return Err(AppError::Validation(format!("Query required for {} task", task)));
    }

    let has_document_2 = payload.document_2.as_deref().is_some_and(|d| !d.is_empty());
    if task == Task::Compare && !has_document_2 {
        return Err(AppError::Validation(
            "Second document required for comparison".to_string(),
        ));
    }

    Ok(ProcessingRequest {
        task,
        language,
        document_1,
        document_2: payload.document_2,
        query: payload.query,
    })
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("Missing required field: {}", field)))
}
