mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use url_redirector::infrastructure::persistence::InMemoryMappingStore;
use url_redirector::routes::app_router;

#[tokio::test]
async fn test_redirect_success() {
    let (state, _rx) = common::create_test_state();
    common::create_test_mapping(&state, "abc", "https://example.com/target").await;
    let server = common::test_server(state);

    let response = server.get("/r/abc").add_header("Host", "s.example.com").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert_eq!(response.header("referrer-policy"), "no-referrer");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/r/notfound").await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["error"], "No redirection registered for the specified ID!");

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_missing_id() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/r").await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"], "Redirection ID not specified!");
}

#[tokio::test]
async fn test_redirect_blank_id() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/r/%20").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_redirect_emits_pageview() {
    let (state, mut rx) = common::create_test_state();
    common::create_test_mapping(&state, "track", "https://example.com").await;
    let server = common::test_server(state);

    let response = server
        .get("/r/track")
        .add_header("Host", "s.example.com")
        .add_header("X-Forwarded-Proto", "https")
        .add_header("User-Agent", "Mozilla/5.0")
        .add_header("Referer", "https://google.com")
        .await;

    assert_eq!(response.status_code(), 302);

    let event = common::next_pageview(&mut rx).await;
    assert_eq!(event.name, "pageview");
    assert_eq!(event.url, "https://s.example.com/r/track");
    assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
    assert_eq!(event.referrer.as_deref(), Some("https://google.com"));

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_survives_analytics_failure() {
    let (state, mut rx) =
        common::create_test_state_with(Arc::new(InMemoryMappingStore::new()), true);
    common::create_test_mapping(&state, "abc", "https://example.com/target").await;
    let server = common::test_server(state);

    let response = server.get("/r/abc").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");

    common::next_pageview(&mut rx).await;
}

#[tokio::test]
async fn test_redirect_store_unavailable() {
    let (state, _rx) = common::create_test_state_with(Arc::new(common::UnavailableStore), false);
    let server = common::test_server(state);

    let response = server.get("/r/abc").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<Value>();
    assert_eq!(json["error"], "Internal server error");
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let (state, _rx) = common::create_test_state();
    common::create_test_mapping(&state, "abc", "https://example.com/target").await;

    let response = app_router(state.clone(), true)
        .oneshot(Request::get("/r/abc/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = app_router(state, true)
        .oneshot(Request::get("/r/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
