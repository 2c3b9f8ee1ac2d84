use std::sync::Arc;

use crate::agents::DocumentAgent;
use crate::config::Config;
use crate::types::ProcessingResult;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub agent: Arc<DocumentAgent>,
}

impl AppState {
    pub fn new(config: Config, agent: DocumentAgent) -> Self {
        Self {
            config: Arc::new(config),
            agent: Arc::new(agent),
        }
    }
}

// API Request/Response types

/// Body of `POST /api/process` before validation. Every field is optional
/// here so missing ones can be reported by name.
///
/// `task` and `language` keep an explicit `null` apart from an absent key:
/// the outer `Option` is key presence, the inner one the value.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ProcessRequest {
    #[serde(default, deserialize_with = "present")]
    pub task: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub language: Option<Option<String>>,
    pub document_1: Option<String>,
    pub document_2: Option<String>,
    pub query: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    <Option<String> as serde::Deserialize>::deserialize(deserializer).map(Some)
}

#[derive(Debug, serde::Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub result: ProcessingResult,
}

#[derive(Debug, serde::Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub filepath: String,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
