use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use crate::models::AppState;
use crate::presentation::{escape_html, render_html, APP_TITLE};
use serde::Deserialize;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

const STYLE: &str = r#"<style>
    body { font-family: Arial, sans-serif; margin: 2rem auto; max-width: 60rem; color: #1d1d1f; }
    form { display: flex; gap: 0.5rem; margin-bottom: 1.5rem; }
    input { flex: 1; padding: 0.5rem; }
    button { padding: 0.5rem 1rem; }
    .paper h3 { margin-bottom: 0.25rem; }
    .summary, .critique { white-space: pre-wrap; margin: 0.75rem 0; }
    .error { background: #fdecea; border: 1px solid #f5c2c0; padding: 0.75rem; border-radius: 6px; }
    .hint { color: #666; font-size: 0.9rem; }
  </style>"#;

fn page(query: &str, results: &str) -> String {
    let mut html = String::from("<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\" />\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    html.push_str(&format!("  <title>{}</title>\n  {}\n</head>\n<body>\n", APP_TITLE, STYLE));
    html.push_str(&format!("  <h1>📚 {}</h1>\n", APP_TITLE));
    html.push_str(&format!(
        r#"  <form action="/search" method="get">
    <input name="query" placeholder="Enter a research topic:" value="{}" required />
    <button type="submit">Search</button>
  </form>
  <p class="hint">Fetching and analysing papers can take a minute.</p>
"#,
        escape_html(query)
    ));
    html.push_str(results);
    html.push_str("\n</body>\n</html>\n");
    html
}

async fn index() -> Html<String> {
    Html(page("", ""))
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Html<String> {
    let query = params.query.trim();
    if query.is_empty() {
        return Html(page("", r#"<div class="error">Please enter a research topic.</div>"#));
    }

    info!(query = %query, "Search requested from web UI");
    let papers = state.assistant.run(query).await;
    Html(page(query, &render_html(&papers)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::NO_PAPERS_MESSAGE;
    use crate::routes::testing;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_page(uri: &str) -> (StatusCode, String) {
        let response = router(testing::state())
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, testing::body_string(response).await)
    }

    #[tokio::test]
    async fn test_index_has_form() {
        let (status, html) = get_page("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Virtual Research Assistant"));
        assert!(html.contains(r#"action="/search""#));
    }

    #[tokio::test]
    async fn test_search_renders_papers() {
        let (status, html) = get_page("/search?query=rust").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<h3>1. rust #0</h3>"));
        assert!(html.contains("<h3>2. rust #1</h3>"));
        assert!(html.contains("model &lt;b&gt;output&lt;/b&gt;"));
        assert_eq!(html.matches("<hr />").count(), 2);
        assert!(html.contains(r#"value="rust""#));
    }

    #[tokio::test]
    async fn test_search_without_results() {
        let (_, html) = get_page("/search?query=nothing+here").await;
        assert!(html.contains(NO_PAPERS_MESSAGE));
    }

    #[tokio::test]
    async fn test_blank_search_does_not_fetch() {
        let (status, html) = get_page("/search?query=%20%20").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Please enter a research topic."));
        assert!(!html.contains(NO_PAPERS_MESSAGE));
    }
}
