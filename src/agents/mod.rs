//! Document Agent
//!
//! Runs one document-processing request end to end:
//!
//! ```text
//! ProcessingRequest
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Resolve    │  → file path? extract text : use literal text
//! │  documents  │
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │  TaskInput  │  → precondition unmet? return early, no LLM call
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Prompt    │  → language directive + task template
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Gateway   │  → errors become "Error calling LLM: ..."
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │ Missing-info│  → advisory when the model admits gaps
//! └─────────────┘
//!      │
//!      ▼
//!  ProcessingResult
//! ```

pub mod language;
pub mod missing_info;
pub mod prompts;

pub use language::language_directive;
pub use missing_info::{detect_missing_info, MISSING_INFO_ADVISORY};
pub use prompts::{build_prompt, PreconditionNotMet, TaskInput};

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::AgentConfig;
use crate::documents;
use crate::llm::LLM;
use crate::types::{AppError, AppResult, ProcessingRequest, ProcessingResult};

pub struct DocumentAgent {
    config: AgentConfig,
    llm: LLM,
}

impl DocumentAgent {
    pub fn new(config: AgentConfig, llm: LLM) -> Self {
        Self { config, llm }
    }

    pub async fn process(&self, request: ProcessingRequest) -> AppResult<ProcessingResult> {
        info!(
            task = %request.task,
            language = %request.language,
            has_document_2 = request.document_2.is_some(),
            has_query = request.query.is_some(),
            "Processing request"
        );

        let document_1 = resolve_document(request.document_1).await?;
        let document_2 = match request.document_2 {
            Some(doc) if !doc.is_empty() => Some(resolve_document(doc).await?),
            other => other,
        };

        let input = match TaskInput::from_request(request.task, document_2, request.query) {
            Ok(input) => input,
            Err(PreconditionNotMet(reason)) => {
                info!(task = %request.task, reason, "Task precondition not met, skipping LLM");
                return Ok(ProcessingResult::precondition(reason));
            }
        };

        let prompt = build_prompt(&input, request.language, &document_1, &self.config.system_prompt);

        let output = match self.llm.complete_prompt(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, model = %self.llm.model(), "LLM call failed");
                format!("Error calling LLM: {}", e)
            }
        };

        let missing_info = detect_missing_info(&output);
        info!(
            task = %request.task,
            output_len = output.len(),
            flagged = !missing_info.is_empty(),
            "Request processed"
        );

        Ok(ProcessingResult { output, missing_info })
    }
}

/// An existing regular file is extracted; anything else is taken as the
/// document text itself.
async fn resolve_document(value: String) -> AppResult<String> {
    let path = PathBuf::from(&value);
    // Very long literal text makes is_file fail with ENAMETOOLONG, which reads as false
    if !path.is_file() {
        return Ok(value);
    }

    info!(path = %path.display(), "Extracting document from file");
    tokio::task::spawn_blocking(move || documents::extract_text(&path))
        .await
        .map_err(|e| AppError::Internal(format!("Extraction task failed: {}", e)))?
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm::{GatewayError, GatewayResult, LLMAdapter};
    use crate::types::{LLMRequest, LLMResponse, Language, Task};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Replies with a fixed string and records every request.
    pub(crate) struct RecordingAdapter {
        pub reply: String,
        pub calls: Arc<AtomicUsize>,
        pub requests: Arc<Mutex<Vec<LLMRequest>>>,
    }

    impl RecordingAdapter {
        pub(crate) fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: Arc::new(AtomicUsize::new(0)),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl LLMAdapter for RecordingAdapter {
        async fn create_chat_completion(&self, request: &LLMRequest) -> GatewayResult<LLMResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            Ok(LLMResponse {
                content: self.reply.clone(),
                finish_reason: Some("stop".to_string()),
            })
        }
    }

    struct FailingAdapter;

    #[async_trait]
    impl LLMAdapter for FailingAdapter {
        async fn create_chat_completion(&self, _request: &LLMRequest) -> GatewayResult<LLMResponse> {
            Err(GatewayError::Api {
                status: 429,
                message: "Rate limit reached".to_string(),
            })
        }
    }

    pub(crate) fn agent_with(adapter: Box<dyn LLMAdapter>) -> DocumentAgent {
        DocumentAgent::new(
            AgentConfig {
                system_prompt: "You are a government document analyst.".to_string(),
            },
            LLM::with_adapter(adapter, "gpt-4", 0.3),
        )
    }

    fn request(task: Task, document_1: &str) -> ProcessingRequest {
        ProcessingRequest {
            task,
            language: Language::En,
            document_1: document_1.to_string(),
            document_2: None,
            query: None,
        }
    }

    #[tokio::test]
    async fn test_summarize_end_to_end() {
        let adapter = RecordingAdapter::new("Not available in provided document for dates.");
        let calls = adapter.calls.clone();
        let requests = adapter.requests.clone();
        let agent = agent_with(Box::new(adapter));

        let result = agent
            .process(request(
                Task::Summarize,
                "Sample government circular regarding new policy implementation with effective date January 2024.",
            ))
            .await
            .unwrap();

        assert_eq!(
            result,
            ProcessingResult {
                output: "Not available in provided document for dates.".to_string(),
                missing_info: "Some information was not available in the provided document(s)".to_string(),
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let sent = requests.lock().unwrap();
        assert_eq!(sent[0].messages[0].content, "You are a government document analyst.");
        assert!(sent[0].messages[1].content.contains("effective date January 2024"));
    }

    #[tokio::test]
    async fn test_extract_without_query_skips_gateway() {
        let adapter = RecordingAdapter::new("should not be used");
        let calls = adapter.calls.clone();
        let agent = agent_with(Box::new(adapter));

        let result = agent.process(request(Task::Extract, "x")).await.unwrap();

        assert_eq!(result, ProcessingResult::precondition("Query required for extraction"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_compare_without_second_document_skips_gateway() {
        let adapter = RecordingAdapter::new("should not be used");
        let calls = adapter.calls.clone();
        let agent = agent_with(Box::new(adapter));

        let result = agent.process(request(Task::Compare, "x")).await.unwrap();

        assert_eq!(result.output, "");
        assert_eq!(result.missing_info, "Second document required for comparison");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_qa_with_empty_query_skips_gateway() {
        let adapter = RecordingAdapter::new("should not be used");
        let calls = adapter.calls.clone();
        let agent = agent_with(Box::new(adapter));

        let mut req = request(Task::Qa, "x");
        req.query = Some(String::new());
        let result = agent.process(req).await.unwrap();

        assert_eq!(result, ProcessingResult::precondition("Query required for Q&A"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_gateway_error_is_flattened_into_output() {
        let agent = agent_with(Box::new(FailingAdapter));

        let result = agent.process(request(Task::Summarize, "text")).await.unwrap();

        assert_eq!(result.output, "Error calling LLM: API error (429): Rate limit reached");
        assert_eq!(result.missing_info, "");
    }

    #[tokio::test]
    async fn test_documents_resolved_from_files() {
        let temp_dir = TempDir::new().unwrap();
        let original = temp_dir.path().join("original.txt");
        let revised = temp_dir.path().join("revised.docx");
        std::fs::write(&original, "Deadline: 31 March 2024").unwrap();
        crate::documents::docx::tests::write_docx(&revised, &["Deadline: 30 June 2024"]);

        let adapter = RecordingAdapter::new("The deadline moved by three months.");
        let requests = adapter.requests.clone();
        let agent = agent_with(Box::new(adapter));

        let mut req = request(Task::Compare, original.to_str().unwrap());
        req.document_2 = Some(revised.to_string_lossy().to_string());
        let result = agent.process(req).await.unwrap();

        assert_eq!(result.output, "The deadline moved by three months.");
        let sent = requests.lock().unwrap();
        let user = &sent[0].messages[1].content;
        assert!(user.contains("Document 1:\nDeadline: 31 March 2024"));
        assert!(user.contains("Document 2:\nDeadline: 30 June 2024"));
    }

    #[tokio::test]
    async fn test_unsupported_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("figures.csv");
        std::fs::write(&path, "a,b").unwrap();

        let agent = agent_with(Box::new(RecordingAdapter::new("unused")));
        let err = agent
            .process(request(Task::Summarize, path.to_str().unwrap()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnsupportedFormat(ref ext) if ext == ".csv"));
    }

    #[tokio::test]
    async fn test_nonexistent_path_is_literal_text() {
        let adapter = RecordingAdapter::new("ok");
        let requests = adapter.requests.clone();
        let agent = agent_with(Box::new(adapter));

        agent
            .process(request(Task::Summarize, "/no/such/dir/circular.pdf"))
            .await
            .unwrap();

        let sent = requests.lock().unwrap();
        assert!(sent[0].messages[1].content.contains("Document:\n/no/such/dir/circular.pdf"));
    }
}
