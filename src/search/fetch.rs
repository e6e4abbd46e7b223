//! Quota-bounded paper fetch
//!
//! Runs the user's query against the configured provider and, when that comes
//! back short, tops the list up with papers for model-suggested related topics.
//!
//! ```text
//! query ──► search ──► seed (≤ quota)
//!                        │ short and expander present?
//!                        ▼
//!            topics ──► for each non-blank topic while len < quota:
//!                          search(topic) → append → truncate to quota
//! ```

use std::future::Future;
use std::sync::Arc;

use super::{PaperSource, QUOTA};
use crate::agents::TopicExpander;
use crate::models::PaperRecord;
use tracing::{debug, info, warn};

/// Append `batch` to `acc` and cut the result back to `quota` entries.
/// Earlier records always win over later ones.
pub fn absorb(mut acc: Vec<PaperRecord>, batch: Vec<PaperRecord>, quota: usize) -> Vec<PaperRecord> {
    acc.extend(batch);
    acc.truncate(quota);
    acc
}

/// Fold topic searches into `seed` until the quota is met.
///
/// Topics are trimmed and blank ones skipped. Once the accumulated list holds
/// `quota` records no further searches are issued. No deduplication happens
/// across topics.
pub async fn accumulate<I, F, Fut>(
    seed: Vec<PaperRecord>,
    topics: I,
    mut search: F,
    quota: usize,
) -> Vec<PaperRecord>
where
    I: IntoIterator<Item = String>,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Vec<PaperRecord>>,
{
    let mut papers = seed;
    for topic in topics {
        let topic = topic.trim();
        if topic.is_empty() {
            continue;
        }
        if papers.len() >= quota {
            break;
        }
        let found = search(topic.to_string()).await;
        debug!(topic = %topic, found = found.len(), "Expansion topic searched");
        papers = absorb(papers, found, quota);
    }
    papers
}

pub struct PaperFetchOrchestrator {
    source: Arc<dyn PaperSource>,
    expander: Option<Arc<dyn TopicExpander>>,
    quota: usize,
}

impl PaperFetchOrchestrator {
    pub fn new(source: Arc<dyn PaperSource>, expander: Option<Arc<dyn TopicExpander>>) -> Self {
        Self {
            source,
            expander,
            quota: QUOTA,
        }
    }

    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota;
        self
    }

    /// An unreadable provider response counts as zero results.
    async fn search_or_empty(&self, query: &str) -> Vec<PaperRecord> {
        match self.source.search(query).await {
            Ok(papers) => papers,
            Err(e) => {
                warn!(query = %query, source = self.source.name(), error = %e, "Search response unreadable, treating as no results");
                Vec::new()
            }
        }
    }

    /// Fetch up to `quota` papers for `query`, in discovery order.
    pub async fn fetch_up_to(&self, query: &str) -> Vec<PaperRecord> {
        let mut seed = self.search_or_empty(query).await;
        seed.truncate(self.quota);

        if seed.len() >= self.quota {
            info!(query = %query, count = seed.len(), "Primary search filled the quota");
            return seed;
        }

        let Some(expander) = self.expander.as_ref() else {
            info!(query = %query, count = seed.len(), "Primary search under quota, no topic expansion configured");
            return seed;
        };

        let topics = expander.suggest(query).await;
        info!(
            query = %query,
            seeded = seed.len(),
            topics = topics.len(),
            "Expanding search with related topics"
        );

        let papers = accumulate(
            seed,
            topics,
            |topic| async move { self.search_or_empty(&topic).await },
            self.quota,
        )
        .await;

        info!(query = %query, count = papers.len(), "Fetch complete");
        papers
    }
}
