use axum::{extract::State, routing::post, Json, Router};
use crate::models::{AppState, ResearchRequest, ResearchResponse};
use crate::types::{AppError, AppResult};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/research", post(post_research))
        .with_state(state)
}

pub async fn post_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> AppResult<Json<ResearchResponse>> {
    let request = request.normalized();
    request
        .validate()
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    let request_id = Uuid::new_v4();
    info!(request_id = %request_id, query = %request.query, "Received research request");

    let papers = state.assistant.run(&request.query).await;

    info!(request_id = %request_id, count = papers.len(), "Research response sent");
    Ok(Json(ResearchResponse {
        request_id,
        query: request.query,
        papers,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn post(body: &str) -> Request<Body> {
        Request::post("/api/research")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_research_returns_processed_papers() {
        let response = router(testing::state())
            .oneshot(post(r#"{"query":"  rust  "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ResearchResponse = serde_json::from_str(&testing::body_string(response).await).unwrap();
        assert_eq!(body.query, "rust");
        assert_eq!(body.papers.len(), 2);
        assert_eq!(body.papers[0].title, "rust #0");
        assert_eq!(body.papers[0].summary, "model <b>output</b>");
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let response = router(testing::state())
            .oneshot(post(r#"{"query":"   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = testing::body_string(response).await;
        assert!(body.contains("Invalid request"));
    }

    #[tokio::test]
    async fn test_no_results_is_empty_list() {
        let response = router(testing::state())
            .oneshot(post(r#"{"query":"unknown"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ResearchResponse = serde_json::from_str(&testing::body_string(response).await).unwrap();
        assert!(body.papers.is_empty());
    }
}
