//! Search Module
//!
//! Paper providers and the quota-bounded fetch that sits on top of them:
//! - arXiv (primary) - Atom feed from the public export API
//! - Google Scholar (optional) - organic results through SerpAPI
//!
//! Providers never surface transport failures; a failed request is an empty
//! result. Only a response that cannot be parsed is reported as an error.

pub mod arxiv;
pub mod fetch;
pub mod scholar;

pub use arxiv::ArxivClient;
pub use fetch::{absorb, accumulate, PaperFetchOrchestrator};
pub use scholar::ScholarClient;

use std::sync::Arc;

use crate::models::PaperRecord;
use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Maximum number of papers returned per query.
pub const QUOTA: usize = 5;

/// Results requested from a provider in a single call.
pub const MAX_RESULTS: usize = 5;

/// Errors that can occur while reading a provider response
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Failed to parse search results: {0}")]
    Parse(String),
}

/// A provider of candidate papers for a free-text query.
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    async fn search(&self, query: &str) -> Result<Vec<PaperRecord>, SearchError>;
}

/// Queries several providers in order and concatenates what they return.
pub struct SourceChain {
    sources: Vec<Arc<dyn PaperSource>>,
}

impl SourceChain {
    pub fn new(sources: Vec<Arc<dyn PaperSource>>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl PaperSource for SourceChain {
    fn name(&self) -> &str {
        "chain"
    }

    async fn search(&self, query: &str) -> Result<Vec<PaperRecord>, SearchError> {
        let mut papers = Vec::new();
        for source in &self.sources {
            match source.search(query).await {
                Ok(found) => papers.extend(found),
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Provider response unreadable, counting as no results");
                }
            }
        }
        Ok(papers)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeSource;
    use super::*;

    #[tokio::test]
    async fn test_chain_concatenates_in_order() {
        let first: Arc<dyn PaperSource> = Arc::new(FakeSource::new().with("rust", 2));
        let second: Arc<dyn PaperSource> = Arc::new(FakeSource::new().with("rust", 1));
        let chain = SourceChain::new(vec![first, second]);

        let papers = chain.search("rust").await.unwrap();
        assert_eq!(papers.len(), 3);
        assert_eq!(papers[0].title, "rust #0");
        assert_eq!(papers[2].title, "rust #0");
    }

    #[tokio::test]
    async fn test_chain_isolates_unreadable_provider() {
        let broken: Arc<dyn PaperSource> = Arc::new(FakeSource::new().broken("rust"));
        let healthy: Arc<dyn PaperSource> = Arc::new(FakeSource::new().with("rust", 2));
        let chain = SourceChain::new(vec![broken, healthy]);

        let papers = chain.search("rust").await.unwrap();
        assert_eq!(papers.len(), 2);
    }
}
