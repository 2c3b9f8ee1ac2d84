// Type definitions and enums

use std::fmt;
use std::str::FromStr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// The four document-processing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Summarize,
    Extract,
    Compare,
    Qa,
}

impl Task {
    pub const ALL: [Task; 4] = [Task::Summarize, Task::Extract, Task::Compare, Task::Qa];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Summarize => "summarize",
            Task::Extract => "extract",
            Task::Compare => "compare",
            Task::Qa => "qa",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Task::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| AppError::UnknownTask(s.to_string()))
    }
}

/// Response language selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Or,
    Bilingual,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Or, Language::Bilingual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Or => "or",
            Language::Bilingual => "bilingual",
        }
    }

    /// Strict lookup, `None` for anything outside the three selectors.
    pub fn from_selector(selector: &str) -> Option<Self> {
        Language::ALL.into_iter().find(|lang| lang.as_str() == selector)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single document-processing request as handed to the agent.
///
/// `document_1` and `document_2` hold either literal text or a path to an
/// uploaded file.
#[derive(Debug, Clone)]
pub struct ProcessingRequest {
    pub task: Task,
    pub language: Language,
    pub document_1: String,
    pub document_2: Option<String>,
    pub query: Option<String>,
}

/// What the agent returns for every request, including degraded ones.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProcessingResult {
    pub output: String,
    pub missing_info: String,
}

impl ProcessingResult {
    /// Result for a request that failed a task precondition before reaching the LLM.
    pub fn precondition(reason: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            missing_info: reason.into(),
        }
    }
}

/// System and user prompt for one LLM call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMRequest {
    pub model: String,
    pub messages: Vec<LLMMessage>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LLMMessage {
    pub role: String, // "user", "assistant", "system"
    pub content: String,
}

impl LLMMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub finish_reason: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Extraction(String),

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFormat(_) | AppError::UnknownTask(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Extraction(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
