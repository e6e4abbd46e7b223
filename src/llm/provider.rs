use std::sync::Arc;

use async_trait::async_trait;
use crate::config::LLMConfig;
use crate::types::{AppResult, LLMRequest, LLMResponse};

/// Opaque chat-completion capability used by every agent.
#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Build the adapter described by the LLM section of the config.
pub fn create_adapter(config: &LLMConfig) -> Arc<dyn LLMAdapter> {
    Arc::new(crate::llm::groq::GroqAdapter::with_api_base(
        &config.groq_api_key,
        &config.api_base,
    ))
}
