// CORS configuration driven by ALLOWED_ORIGINS

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

pub fn apply_cors(router: Router, allowed_origins: &[String]) -> Router {
    router.layer(cors_layer(allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::routing::get;
    use tower::ServiceExt;

    fn app(origins: &[&str]) -> Router {
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();
        apply_cors(Router::new().route("/", get(|| async { "ok" })), &origins)
    }

    async fn allow_origin_for(router: Router, origin: &str) -> Option<String> {
        let response = router
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_listed_origin_allowed() {
        let allowed = allow_origin_for(app(&["http://localhost:8501"]), "http://localhost:8501").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:8501"));
    }

    #[tokio::test]
    async fn test_unlisted_origin_not_echoed() {
        let allowed = allow_origin_for(app(&["http://localhost:8501"]), "http://evil.example").await;
        assert!(allowed.is_none());
    }

    #[tokio::test]
    async fn test_wildcard() {
        let allowed = allow_origin_for(app(&["*"]), "http://anywhere.example").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }
}
