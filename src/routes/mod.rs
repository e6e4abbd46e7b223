//! HTTP Routes
//!
//! - `/` - Search form
//! - `/search` - Server-rendered results page
//! - `/api/research` - JSON research endpoint
//! - `/api/health` - Health check

pub mod health;
pub mod research;
pub mod ui;

use axum::Router;
use crate::middleware::cors::apply_cors;
use crate::models::AppState;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(ui::router(state.clone()))
        .merge(research::router(state.clone()))
        .merge(health::router(state))
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &origins)
}
