// Adapter used when no API credential is configured

use async_trait::async_trait;

use crate::llm::provider::{GatewayResult, LLMAdapter};
use crate::types::{LLMRequest, LLMResponse};

pub const NOT_CONFIGURED_MESSAGE: &str = "LLM not configured. Please set OPENAI_API_KEY in .env file.";

/// Answers every request with [`NOT_CONFIGURED_MESSAGE`] without any network I/O.
pub struct UnconfiguredAdapter;

#[async_trait]
impl LLMAdapter for UnconfiguredAdapter {
    async fn create_chat_completion(&self, _request: &LLMRequest) -> GatewayResult<LLMResponse> {
        Ok(LLMResponse {
            content: NOT_CONFIGURED_MESSAGE.to_string(),
            finish_reason: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LLMMessage;

    #[tokio::test]
    async fn test_fixed_reply_for_any_input() {
        for prompt in ["", "Summarize the circular", "ଓଡ଼ିଆ"] {
            let request = LLMRequest {
                model: "gpt-4".to_string(),
                messages: vec![LLMMessage::user(prompt)],
                temperature: Some(0.3),
            };
            let response = UnconfiguredAdapter.create_chat_completion(&request).await.unwrap();
            assert_eq!(response.content, NOT_CONFIGURED_MESSAGE);
        }
    }
}
