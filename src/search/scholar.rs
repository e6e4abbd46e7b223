//! Google Scholar through SerpAPI
//!
//! Secondary provider. Results carry the Scholar snippet in place of an
//! abstract, so summaries built from them are coarser than arXiv ones.

use super::{PaperSource, SearchError, MAX_RESULTS};
use crate::models::PaperRecord;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

const NO_SUMMARY: &str = "No summary available";
const NO_LINK: &str = "No link available";

/// SerpAPI client restricted to the `google_scholar` engine
pub struct ScholarClient {
    http: Client,
    api_key: String,
    base: String,
    max_results: usize,
}

impl ScholarClient {
    pub fn new(api_key: &str, base: &str) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.to_string(),
            base: base.trim_end_matches('/').to_string(),
            max_results: MAX_RESULTS,
        }
    }

    /// Configure client from config; `None` when Scholar is disabled or has no key
    pub fn from_config(config: &crate::config::SearchConfig) -> Option<Self> {
        config
            .scholar_key()
            .map(|key| Self::new(key, &config.serpapi_base))
    }

    async fn fetch_results(&self, query: &str) -> Option<Value> {
        let num = self.max_results.to_string();
        let resp = match self
            .http
            .get(format!("{}/search.json", self.base))
            .query(&[
                ("engine", "google_scholar"),
                ("q", query),
                ("hl", "en"),
                ("num", num.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(query = %query, error = %e, "Scholar request failed");
                return None;
            }
        };

        let status = resp.status();
        if !status.is_success() {
            warn!(query = %query, status = %status, "SerpAPI returned an error status");
            return None;
        }

        match resp.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(query = %query, error = %e, "SerpAPI response was not JSON");
                None
            }
        }
    }
}

#[async_trait]
impl PaperSource for ScholarClient {
    fn name(&self) -> &str {
        "scholar"
    }

    async fn search(&self, query: &str) -> Result<Vec<PaperRecord>, SearchError> {
        info!(query = %query, "Searching Google Scholar via SerpAPI");

        let Some(body) = self.fetch_results(query).await else {
            return Ok(Vec::new());
        };

        let papers = parse_organic_results(&body, self.max_results)?;
        info!(query = %query, count = papers.len(), "Google Scholar search completed");
        Ok(papers)
    }
}

/// Convert SerpAPI `organic_results` into paper records.
///
/// A body without `organic_results` means no hits. A result without a title
/// fails the whole response.
pub fn parse_organic_results(body: &Value, limit: usize) -> Result<Vec<PaperRecord>, SearchError> {
    let Some(organic) = body.get("organic_results") else {
        debug!("SerpAPI response has no organic_results");
        return Ok(Vec::new());
    };

    let results = organic
        .as_array()
        .ok_or_else(|| SearchError::Parse("Expected array of results".to_string()))?;

    results
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, result)| {
            let title = result
                .get("title")
                .and_then(Value::as_str)
                .ok_or_else(|| SearchError::Parse(format!("result {} has no title", i)))?;

            let summary = result
                .get("snippet")
                .and_then(Value::as_str)
                .unwrap_or(NO_SUMMARY);

            let link = result
                .get("link")
                .and_then(Value::as_str)
                .unwrap_or(NO_LINK);

            Ok(PaperRecord::new(title, summary, link))
        })
        .collect()
}
