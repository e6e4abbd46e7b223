// Research Digest - find papers and digest them with LLM agents

pub mod agents;
pub mod config;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod presentation;
pub mod routes;
pub mod search;  // Paper providers (arXiv, Google Scholar) and the quota-bounded fetch
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use agents::ResearchAssistant;
pub use config::Config;
pub use models::{AppState, PaperRecord, ProcessedPaper};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
