use std::sync::Arc;

use crate::agents::ResearchAssistant;
use crate::config::Config;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub assistant: Arc<ResearchAssistant>,
}

/// A paper as returned by a search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub title: String,
    pub summary_text: String,
    pub link: String,
}

impl PaperRecord {
    pub fn new(
        title: impl Into<String>,
        summary_text: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary_text: summary_text.into(),
            link: link.into(),
        }
    }
}

/// A paper after the summary and critique agents have run over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedPaper {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub critique: String,
}

// API Request/Response types

#[derive(Debug, Deserialize, Validate)]
pub struct ResearchRequest {
    #[validate(length(min = 1, max = 500, message = "query must be between 1 and 500 characters"))]
    pub query: String,
}

impl ResearchRequest {
    /// Trim surrounding whitespace so a blank query fails validation.
    pub fn normalized(self) -> Self {
        Self {
            query: self.query.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub request_id: uuid::Uuid,
    pub query: String,
    pub papers: Vec<ProcessedPaper>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub model: String,
}
