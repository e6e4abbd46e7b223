//! Summary Agent
//!
//! Condenses a paper abstract into a short summary.

use std::sync::Arc;

use crate::llm::LLMAdapter;
use crate::types::{LLMMessage, LLMRequest};

pub const SUMMARY_FALLBACK: &str = "Summarization failed!";

const SYSTEM_PROMPT: &str = "Summarize the retrieved research papers and present concise summaries to the user, \
JUST GIVE THE RELEVANT SUMMARIES OF THE RESEARCH PAPER AND NOT YOUR THOUGHT PROCESS.";

pub struct SummaryAgent {
    llm: Arc<dyn LLMAdapter>,
    model: String,
}

impl SummaryAgent {
    pub fn new(llm: Arc<dyn LLMAdapter>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    fn build_request(&self, text: &str) -> LLMRequest {
        LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::user(format!("Summarize this paper: {}", text))],
            max_tokens: Some(2048),
            temperature: Some(0.3),
            system_instruction: Some(SYSTEM_PROMPT.to_string()),
        }
    }

    /// Summarize `text`. Always returns a string; [`SUMMARY_FALLBACK`] when the
    /// model gives nothing usable.
    pub async fn summarize(&self, text: &str) -> String {
        let request = self.build_request(text);
        super::complete_or_fallback(self.llm.as_ref(), &request, SUMMARY_FALLBACK, "summary").await
    }
}
