#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use courier_api::config::ServerConfig;
use courier_api::fixtures::fixture_catalog;
use courier_api::router::build_app_router;
use courier_api::state::AppState;
use courier_core::types::YearMonth;

/// Month card expiry is judged against in tests.
pub const TEST_MONTH: YearMonth = YearMonth {
    year: 2025,
    month: 6,
};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and small pages so paging is easy to hit.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_page_size: 5,
        max_page_size: 8,
    }
}

/// Build the full application router over the fixture listings, with card
/// expiry pinned to [`TEST_MONTH`].
pub fn build_test_app() -> Router {
    let catalog = fixture_catalog().expect("fixtures should load");
    let mut state = AppState::new(test_config(), catalog);
    state.expiry_month = Some(TEST_MONTH);
    build_app_router(state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
