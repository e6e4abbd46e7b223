//! Agent System
//!
//! The research assistant is a short, strictly sequential pipeline:
//!
//! - **Topic Expander**: suggests related topics when a search under-returns
//! - **Summary Agent**: condenses each paper abstract
//! - **Critique Agent**: lists advantages and disadvantages of each summary
//!
//! ## Pipeline Overview
//!
//! ```text
//!   Query
//!     │
//!     ▼
//! ┌─────────────┐
//! │   Fetch     │  → up to 5 papers (topic expansion if short)
//! └─────────────┘
//!     │  one paper at a time
//!     ▼
//! ┌─────────────┐
//! │  Summary    │  → condensed summary
//! │   Agent     │
//! └─────────────┘
//!     │
//!     ▼
//! ┌─────────────┐
//! │  Critique   │  → pros / cons
//! │   Agent     │
//! └─────────────┘
//!     │
//!     ▼
//! ProcessedPaper list
//! ```

pub mod critique;
pub mod summary;
pub mod topics;

pub use critique::{CritiqueAgent, CRITIQUE_FALLBACK};
pub use summary::{SummaryAgent, SUMMARY_FALLBACK};
pub use topics::{LlmTopicExpander, TopicExpander};

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{create_adapter, LLMAdapter};
use crate::models::{PaperRecord, ProcessedPaper};
use crate::search::{ArxivClient, PaperFetchOrchestrator, PaperSource, ScholarClient, SourceChain};
use crate::types::{LLMRequest, LLMResponse};
use tracing::{info, warn};

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Remove `<think>…</think>` blocks emitted by reasoning models.
/// An unterminated block runs to the end of the text.
pub fn strip_reasoning(text: &str) -> String {
    let mut rest = text;
    // Some providers drop the opening tag and send only the closing one.
    if let Some(end) = rest.find(THINK_CLOSE) {
        if !rest[..end].contains(THINK_OPEN) {
            rest = &rest[end + THINK_CLOSE.len()..];
        }
    }

    let mut out = String::with_capacity(rest.len());
    while let Some(start) = rest.find(THINK_OPEN) {
        out.push_str(&rest[..start]);
        rest = match rest[start..].find(THINK_CLOSE) {
            Some(end) => &rest[start + end + THINK_CLOSE.len()..],
            None => "",
        };
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Usable reply text: present, reasoning removed, not blank.
pub fn extract_content(response: &LLMResponse) -> Option<String> {
    response
        .content
        .as_deref()
        .map(strip_reasoning)
        .filter(|text| !text.is_empty())
}

/// Run a single completion, substituting `fallback` for anything unusable.
async fn complete_or_fallback(
    llm: &dyn LLMAdapter,
    request: &LLMRequest,
    fallback: &str,
    agent: &str,
) -> String {
    match llm.create_chat_completion(request).await {
        Ok(response) => match extract_content(&response) {
            Some(text) => {
                info!(agent = agent, response_len = text.len(), "Agent reply received");
                text
            }
            None => {
                warn!(agent = agent, "Agent reply had no content, using fallback");
                fallback.to_string()
            }
        },
        Err(e) => {
            warn!(agent = agent, error = %e, "Agent call failed, using fallback");
            fallback.to_string()
        }
    }
}

/// Fetches papers for a query and runs each through summary then critique.
pub struct ResearchAssistant {
    fetcher: PaperFetchOrchestrator,
    summarizer: SummaryAgent,
    critic: CritiqueAgent,
}

impl ResearchAssistant {
    pub fn new(fetcher: PaperFetchOrchestrator, summarizer: SummaryAgent, critic: CritiqueAgent) -> Self {
        Self {
            fetcher,
            summarizer,
            critic,
        }
    }

    /// Wire providers and agents from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let llm = create_adapter(&config.llm);
        let model = config.llm.model.clone();

        let arxiv: Arc<dyn PaperSource> = Arc::new(ArxivClient::with_base(&config.search.arxiv_api_base));
        let source: Arc<dyn PaperSource> = match ScholarClient::from_config(&config.search) {
            Some(scholar) => {
                info!("Google Scholar enabled alongside arXiv");
                Arc::new(SourceChain::new(vec![arxiv, Arc::new(scholar)]))
            }
            None => arxiv,
        };

        let expander: Option<Arc<dyn TopicExpander>> = if config.search.topic_expansion {
            Some(Arc::new(LlmTopicExpander::new(llm.clone(), model.clone())))
        } else {
            None
        };

        Self::new(
            PaperFetchOrchestrator::new(source, expander),
            SummaryAgent::new(llm.clone(), model.clone()),
            CritiqueAgent::new(llm, model),
        )
    }

    /// Summarize then critique a single paper.
    pub async fn process(&self, paper: &PaperRecord) -> ProcessedPaper {
        let summary = self.summarizer.summarize(&paper.summary_text).await;
        let critique = self.critic.critique(&summary).await;
        ProcessedPaper {
            title: paper.title.clone(),
            link: paper.link.clone(),
            summary,
            critique,
        }
    }

    /// Execute the full research pipeline for a query. An empty result means
    /// no papers could be fetched.
    pub async fn run(&self, query: &str) -> Vec<ProcessedPaper> {
        info!(query = %query, "Starting research pipeline");

        let papers = self.fetcher.fetch_up_to(query).await;
        if papers.is_empty() {
            warn!(query = %query, "No papers fetched");
            return Vec::new();
        }

        let mut processed = Vec::with_capacity(papers.len());
        for (i, paper) in papers.iter().enumerate() {
            info!(index = i + 1, total = papers.len(), title = %paper.title, "Processing paper");
            processed.push(self.process(paper).await);
        }

        info!(query = %query, count = processed.len(), "Research pipeline complete");
        processed
    }
}
