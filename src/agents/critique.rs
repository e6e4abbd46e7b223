//! Critique Agent
//!
//! Turns a summary into a pointwise list of advantages and disadvantages.

use std::sync::Arc;

use crate::llm::LLMAdapter;
use crate::types::{LLMMessage, LLMRequest};

pub const CRITIQUE_FALLBACK: &str = "Advantages and disadvantages analysis failed!";

const SYSTEM_PROMPT: &str = "Analyze the summaries of the research papers and provide a list of advantages and disadvantages \
for each paper in a pointwise format. JUST GIVE THE ADVANTAGES AND DISADVANTAGES, NOT YOUR THOUGHT PROCESS";

pub struct CritiqueAgent {
    llm: Arc<dyn LLMAdapter>,
    model: String,
}

impl CritiqueAgent {
    pub fn new(llm: Arc<dyn LLMAdapter>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    fn build_request(&self, summary: &str) -> LLMRequest {
        LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::user(format!(
                "Provide advantages and disadvantages for this paper: {}",
                summary
            ))],
            max_tokens: Some(2048),
            temperature: Some(0.3),
            system_instruction: Some(SYSTEM_PROMPT.to_string()),
        }
    }

    pub async fn critique(&self, summary: &str) -> String {
        let request = self.build_request(summary);
        super::complete_or_fallback(self.llm.as_ref(), &request, CRITIQUE_FALLBACK, "critique").await
    }
}
