//! Topic Expander
//!
//! Asks the model for related research topics when a search comes back short.

use std::sync::Arc;

use crate::llm::LLMAdapter;
use crate::types::{LLMMessage, LLMRequest};
use async_trait::async_trait;
use tracing::{info, warn};

/// Number of related topics requested from the model.
pub const TOPIC_COUNT: usize = 3;

/// Source of supplementary search topics.
#[async_trait]
pub trait TopicExpander: Send + Sync {
    /// Related topics for `query`, trimmed, blank entries removed. May be empty.
    async fn suggest(&self, query: &str) -> Vec<String>;
}

pub struct LlmTopicExpander {
    llm: Arc<dyn LLMAdapter>,
    model: String,
}

impl LlmTopicExpander {
    pub fn new(llm: Arc<dyn LLMAdapter>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    fn create_prompt(query: &str) -> String {
        format!("Suggest {} related research topics for '{}'", TOPIC_COUNT, query)
    }

    fn build_request(&self, query: &str) -> LLMRequest {
        LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::user(Self::create_prompt(query))],
            max_tokens: Some(512),
            temperature: Some(0.7),
            system_instruction: Some(
                "List related research topics, one per line, with no numbering, commentary or thought process."
                    .to_string(),
            ),
        }
    }
}

/// One topic per non-blank line of the reply.
pub fn split_topics(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[async_trait]
impl TopicExpander for LlmTopicExpander {
    async fn suggest(&self, query: &str) -> Vec<String> {
        let request = self.build_request(query);
        let reply = match self.llm.create_chat_completion(&request).await {
            Ok(response) => super::extract_content(&response),
            Err(e) => {
                warn!(query = %query, error = %e, "Topic suggestion failed");
                None
            }
        };

        let topics = reply.as_deref().map(split_topics).unwrap_or_default();
        info!(query = %query, count = topics.len(), "Related topics suggested");
        topics
    }
}
