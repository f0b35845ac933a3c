mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use url_redirector::state::AppState;

fn make_server() -> (TestServer, AppState) {
    let (state, _rx) = common::create_test_state();
    (common::test_server(state.clone()), state)
}

// POST /redirections

#[tokio::test]
async fn test_create_with_derived_short_id() {
    let (server, _) = make_server();

    let response = server
        .post("/redirections")
        .json(&json!({ "longUrl": "http://example.com/" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["shortId"], "KhtAJCD");
    assert_eq!(json["longUrl"], "http://example.com/");
}

#[tokio::test]
async fn test_create_then_get() {
    let (server, _) = make_server();

    server
        .post("/redirections")
        .json(&json!({ "shortId": "docs", "longUrl": "https://example.com/docs" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/redirections/docs").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "shortId": "docs", "longUrl": "https://example.com/docs" }));
}

#[tokio::test]
async fn test_create_same_url_twice_conflicts() {
    let (server, _) = make_server();

    server
        .post("/redirections")
        .json(&json!({ "longUrl": "http://example.com/" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/redirections")
        .json(&json!({ "longUrl": "http://example.com/" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_short_id_taken() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;

    let response = server
        .post("/redirections")
        .json(&json!({ "shortId": "abc", "longUrl": "http://y.com" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let json = response.json::<Value>();
    assert_eq!(
        json["error"],
        "A redirection has already been registered for the specified ID!"
    );
}

#[tokio::test]
async fn test_create_long_url_taken() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;

    let response = server
        .post("/redirections")
        .json(&json!({ "shortId": "def", "longUrl": "http://x.com" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let json = response.json::<Value>();
    assert_eq!(
        json["error"],
        "Unable to register redirection due to prior registration!"
    );

    server.get("/redirections/def").await.assert_status_not_found();
}

#[tokio::test]
async fn test_create_missing_long_url() {
    let (server, _) = make_server();

    let response = server
        .post("/redirections")
        .json(&json!({ "shortId": "abc" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"], "Redirection target URL not specified!");
}

#[tokio::test]
async fn test_create_invalid_long_url() {
    let (server, _) = make_server();

    let response = server
        .post("/redirections")
        .json(&json!({ "longUrl": "not a url" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_invalid_short_id() {
    let (server, _) = make_server();

    let response = server
        .post("/redirections")
        .json(&json!({ "shortId": "a/b", "longUrl": "https://example.com" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_empty_short_id_is_derived() {
    let (server, _) = make_server();

    let response = server
        .post("/redirections")
        .json(&json!({ "shortId": "", "longUrl": "http://example.com/" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["shortId"], "KhtAJCD");
}

#[tokio::test]
async fn test_create_long_url_with_newline() {
    let (server, _) = make_server();

    let response = server
        .post("/redirections")
        .json(&json!({ "shortId": "nl", "longUrl": "http://x.com/a\nb" }))
        .await;

    response.assert_status_bad_request();
    server.get("/r/nl").await.assert_status_not_found();
}

#[tokio::test]
async fn test_create_wrong_field_type() {
    let (server, _) = make_server();

    let response = server
        .post("/redirections")
        .json(&json!({ "longUrl": 5 }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_create_non_json_body() {
    let (server, _) = make_server();

    let response = server.post("/redirections").text("longUrl=http://x.com").await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"].is_string());
}

// GET /redirections

#[tokio::test]
async fn test_list_all() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "a", "http://a.com").await;
    common::create_test_mapping(&state, "b", "http://b.com").await;

    let response = server.get("/redirections").await;

    response.assert_status_ok();
    let json = response.json::<Vec<Value>>();
    assert_eq!(json.len(), 2);
}

#[tokio::test]
async fn test_list_empty() {
    let (server, _) = make_server();

    let response = server.get("/redirections").await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_list_filtered_by_long_url() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "a", "http://a.com").await;
    common::create_test_mapping(&state, "b", "http://b.com").await;

    let response = server
        .get("/redirections")
        .add_query_param("longUrl", "http://b.com")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!([{ "shortId": "b", "longUrl": "http://b.com" }]));
}

// GET /redirections/{short_id}

#[tokio::test]
async fn test_get_not_found() {
    let (server, _) = make_server();

    let response = server.get("/redirections/nonexistent").await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["error"], "No redirection registered for the specified ID!");
}

// PUT /redirections/{short_id}

#[tokio::test]
async fn test_update_success() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;

    let response = server
        .put("/redirections/abc")
        .json(&json!({ "longUrl": "http://z.com" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "shortId": "abc", "longUrl": "http://z.com" }));

    let location = server.get("/r/abc").await.header("location");
    assert_eq!(location, "http://z.com");
}

#[tokio::test]
async fn test_update_empty_short_id_is_accepted() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;

    let response = server
        .put("/redirections/abc")
        .json(&json!({ "shortId": "", "longUrl": "http://z.com" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "shortId": "abc", "longUrl": "http://z.com" }));
}

#[tokio::test]
async fn test_update_wrong_field_type() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;

    let response = server
        .put("/redirections/abc")
        .json(&json!({ "longUrl": ["http://z.com"] }))
        .await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_update_not_found() {
    let (server, _) = make_server();

    let response = server
        .put("/redirections/abc")
        .json(&json!({ "longUrl": "http://z.com" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_identity_mismatch() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;

    let response = server
        .put("/redirections/abc")
        .json(&json!({ "shortId": "xyz", "longUrl": "http://z.com" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"], "Mismatch between entity ID and request ID!");

    server.get("/redirections/xyz").await.assert_status_not_found();
}

#[tokio::test]
async fn test_update_missing_long_url() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;

    let response = server.put("/redirections/abc").json(&json!({})).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_to_taken_long_url() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;
    common::create_test_mapping(&state, "def", "http://y.com").await;

    let response = server
        .put("/redirections/abc")
        .json(&json!({ "longUrl": "http://y.com" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "Unable to register redirection due to prior registration!"
    );

    let unchanged = server.get("/redirections/abc").await.json::<Value>();
    assert_eq!(unchanged["longUrl"], "http://x.com");
}

// DELETE /redirections/{short_id}

#[tokio::test]
async fn test_delete_success() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;

    let response = server.delete("/redirections/abc").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "shortId": "abc", "longUrl": "http://x.com" }));

    server.get("/r/abc").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_twice() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;

    server.delete("/redirections/abc").await.assert_status_ok();
    server
        .delete("/redirections/abc")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_frees_long_url() {
    let (server, state) = make_server();
    common::create_test_mapping(&state, "abc", "http://x.com").await;

    server.delete("/redirections/abc").await.assert_status_ok();

    server
        .post("/redirections")
        .json(&json!({ "shortId": "def", "longUrl": "http://x.com" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_store_unavailable_hides_details() {
    let (state, _rx) =
        common::create_test_state_with(std::sync::Arc::new(common::UnavailableStore), false);
    let server = common::test_server(state);

    let response = server
        .post("/redirections")
        .json(&json!({ "longUrl": "http://x.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<Value>();
    assert_eq!(json["error"], "Internal server error");
}
