use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::LLMConfig;
use crate::types::{LLMMessage, LLMRequest, LLMResponse, PromptPair};

/// Failures talking to the completion API.
///
/// These never leave the crate as faults: the agent flattens them into the
/// output text.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("API returned no choices")]
    EmptyResponse,
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> GatewayResult<LLMResponse>;
}

/// The gateway: one adapter plus the model settings fixed at startup.
pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    model: String,
    temperature: f32,
}

impl LLM {
    /// Live OpenAI adapter when a credential is configured, otherwise the
    /// fixed-reply adapter so the service stays demoable.
    pub fn from_config(config: &LLMConfig) -> Self {
        let adapter: Box<dyn LLMAdapter> = match &config.api_key {
            Some(api_key) => {
                info!(model = %config.model, api_base = %config.api_base, "LLM gateway configured");
                Box::new(crate::llm::openai::OpenAIAdapter::with_api_base(
                    api_key,
                    &config.api_base,
                ))
            }
            None => {
                info!("OPENAI_API_KEY not set, LLM gateway will return a fixed notice");
                Box::new(crate::llm::unconfigured::UnconfiguredAdapter)
            }
        };

        Self::with_adapter(adapter, config.model.clone(), config.temperature)
    }

    pub fn with_adapter(adapter: Box<dyn LLMAdapter>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            adapter,
            model: model.into(),
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, system: &str, user: &str) -> GatewayResult<String> {
        let request = LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::system(system), LLMMessage::user(user)],
            temperature: Some(self.temperature),
        };

        let response = self.adapter.create_chat_completion(&request).await?;
        debug!(
            model = %self.model,
            response_len = response.content.len(),
            finish_reason = ?response.finish_reason,
            "LLM completion received"
        );

        Ok(response.content)
    }

    pub async fn complete_prompt(&self, prompt: &PromptPair) -> GatewayResult<String> {
        self.complete(&prompt.system, &prompt.user).await
    }
}
