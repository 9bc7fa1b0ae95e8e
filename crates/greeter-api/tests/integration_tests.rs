//! # Integration Tests for greeter-api
//!
//! Drives the full router with an in-memory greeting store: greeting reads,
//! empty-table failures, health probe transitions, and unmatched paths.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use greeter_api::state::AppState;
use greeter_store::{MemoryGreetingStore, SEED_MESSAGE};

/// Helper: build the app over the given store.
fn test_app(store: &MemoryGreetingStore) -> axum::Router {
    greeter_api::app(AppState::new(store.clone()))
}

/// Helper: issue a GET and return status and body.
async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// -- GET / --------------------------------------------------------------------

#[tokio::test]
async fn test_root_returns_seeded_greeting() {
    let store = MemoryGreetingStore::seeded();
    let (status, body) = get(test_app(&store), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello World from K3s!\n");
}

#[tokio::test]
async fn test_root_sets_plain_text_content_type() {
    let store = MemoryGreetingStore::seeded();
    let response = test_app(&store)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let content_type = response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("text/plain"), "got: {content_type}");
}

#[tokio::test]
async fn test_root_returns_most_recent_greeting() {
    let store = MemoryGreetingStore::seeded();
    store.insert("Hello from the second boot");
    let (status, body) = get(test_app(&store), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello from the second boot\n");
}

#[tokio::test]
async fn test_restart_reseed_keeps_seed_message_current() {
    let store = MemoryGreetingStore::seeded();
    store.insert("an older custom greeting");
    // A restart under the default policy appends the seed again.
    store.insert(SEED_MESSAGE);
    assert_eq!(store.len(), 3);

    let (status, body) = get(test_app(&store), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("{SEED_MESSAGE}\n"));
}

#[tokio::test]
async fn test_root_on_empty_table_returns_500() {
    let store = MemoryGreetingStore::new();
    let (status, body) = get(test_app(&store), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error\n");
}

#[tokio::test]
async fn test_root_during_outage_returns_500() {
    let store = MemoryGreetingStore::seeded();
    store.set_available(false);
    let (status, body) = get(test_app(&store), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error\n");
}

// -- GET /health --------------------------------------------------------------

#[tokio::test]
async fn test_health_ok_while_store_reachable() {
    let store = MemoryGreetingStore::seeded();
    let (status, body) = get(test_app(&store), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK\n");
}

#[tokio::test]
async fn test_health_does_not_require_rows() {
    let store = MemoryGreetingStore::new();
    let (status, _) = get(test_app(&store), "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_tracks_store_availability() {
    let store = MemoryGreetingStore::seeded();
    let app = test_app(&store);

    let (status, _) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);

    store.set_available(false);
    let (status, body) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "Database connection failed\n");

    store.set_available(true);
    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK\n");
}

// -- Fallthrough --------------------------------------------------------------

#[tokio::test]
async fn test_unknown_path_returns_404() {
    let store = MemoryGreetingStore::seeded();
    let (status, _) = get(test_app(&store), "/greetings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_root_is_not_allowed() {
    let store = MemoryGreetingStore::seeded();
    let response = test_app(&store)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(store.len(), 1);
}
