//! End-to-end tests for the track endpoints, driven through the full router
//! against the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use trackctl_server::db::{MemoryTrackStore, StoreError, TrackStore};
use trackctl_server::http::{build_router, AppState, ServerConfig};
use trackctl_server::models::{Page, Track, TrackId};

fn app_with(store: Arc<dyn TrackStore>) -> Router {
    build_router(AppState::new(store), &ServerConfig::default())
}

fn app() -> (Router, Arc<MemoryTrackStore>) {
    let store = Arc::new(MemoryTrackStore::new());
    (app_with(store.clone()), store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty);

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seed(store: &MemoryTrackStore, n: usize) {
    for i in 0..n {
        store.create(Track::new(0, format!("song {i}"))).await.unwrap();
    }
}

/// Store whose every operation fails with a backend error
struct BrokenStore;

fn backend_down() -> StoreError {
    StoreError::Sqlx(sqlx::Error::Protocol("connection reset by peer".into()))
}

#[async_trait]
impl TrackStore for BrokenStore {
    async fn fetch_one(&self, _id: TrackId) -> Result<Track, StoreError> {
        Err(backend_down())
    }

    async fn fetch_page(&self, _page: Page) -> Result<Vec<Track>, StoreError> {
        Err(backend_down())
    }

    async fn create(&self, _track: Track) -> Result<Track, StoreError> {
        Err(backend_down())
    }

    async fn update(&self, _track: &Track) -> Result<(), StoreError> {
        Err(backend_down())
    }

    async fn delete(&self, _track: &Track) -> Result<(), StoreError> {
        Err(backend_down())
    }
}

// === Create ===

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let (app, _) = app();

    let response = send(&app, "POST", "/track", Some(r#"{"song":"Test"}"#)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["content-type"], "application/json");

    let body = json_body(response).await;
    assert_eq!(body["song"], "Test");
    let id = body["id"].as_i64().unwrap();
    assert!(id > 0);

    let response = send(&app, "GET", &format!("/track/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"id": id, "song": "Test"}));
}

#[tokio::test]
async fn create_ignores_client_id() {
    let (app, _) = app();

    let response = send(&app, "POST", "/track", Some(r#"{"id":500,"song":"x"}"#)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["id"], 1);
}

#[tokio::test]
async fn create_ids_are_unique() {
    let (app, _) = app();

    let a = json_body(send(&app, "POST", "/track", Some(r#"{"song":"a"}"#)).await).await;
    let b = json_body(send(&app, "POST", "/track", Some(r#"{"song":"b"}"#)).await).await;
    assert_ne!(a["id"], b["id"]);
}

#[tokio::test]
async fn create_accepts_body_without_content_type() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/track")
                .body(Body::from(r#"{"song":"plain"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn create_with_malformed_body_is_400() {
    let (app, store) = app();

    for body in ["", "{", r#"{"song": 5}"#, "[1,2]"] {
        let response = send(&app, "POST", "/track", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");

        let json = json_body(response).await;
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("Invalid request payload. Error: "));
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_backend_failure_is_500() {
    let app = app_with(Arc::new(BrokenStore));

    let response = send(&app, "POST", "/track", Some(r#"{"song":"a"}"#)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()["content-type"], "application/json");

    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("connection reset by peer"));
}

// === Get ===

#[tokio::test]
async fn get_non_numeric_id_is_400() {
    let (app, _) = app();

    let response = send(&app, "GET", "/track/abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn get_never_reaches_store_for_bad_id() {
    let app = app_with(Arc::new(BrokenStore));

    // A broken store would answer 500; validation must answer first
    let response = send(&app, "GET", "/track/-1", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/track/99999999999", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_missing_id_is_404() {
    let (app, _) = app();

    let response = send(&app, "GET", "/track/999999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("track not found"));
}

#[tokio::test]
async fn get_backend_failure_is_500() {
    let app = app_with(Arc::new(BrokenStore));

    let response = send(&app, "GET", "/track/1", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("connection reset by peer"));
}

// === Update ===

#[tokio::test]
async fn update_overwrites_song() {
    let (app, store) = app();
    seed(&store, 1).await;

    let response = send(&app, "PUT", "/track/1", Some(r#"{"song":"Renamed"}"#)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"id": 1, "song": "Renamed"}));

    let response = send(&app, "GET", "/track/1", None).await;
    assert_eq!(json_body(response).await["song"], "Renamed");
}

#[tokio::test]
async fn update_path_id_wins_over_body_id() {
    let (app, store) = app();
    seed(&store, 2).await;

    let response = send(&app, "PUT", "/track/2", Some(r#"{"id":1,"song":"Two"}"#)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["id"], 2);

    let first = json_body(send(&app, "GET", "/track/1", None).await).await;
    assert_eq!(first["song"], "song 0");
    let second = json_body(send(&app, "GET", "/track/2", None).await).await;
    assert_eq!(second["song"], "Two");
}

#[tokio::test]
async fn update_missing_id_still_200() {
    let (app, store) = app();

    let response = send(&app, "PUT", "/track/424242", Some(r#"{"song":"Ghost"}"#)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"id": 424242, "song": "Ghost"}));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn update_bad_id_or_body_is_400() {
    let (app, _) = app();

    let response = send(&app, "PUT", "/track/x1", Some(r#"{"song":"a"}"#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "PUT", "/track/1", Some("not json")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_backend_failure_is_500() {
    let app = app_with(Arc::new(BrokenStore));

    let response = send(&app, "PUT", "/track/1", Some(r#"{"song":"a"}"#)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// === Delete ===

#[tokio::test]
async fn delete_then_get_is_404() {
    let (app, store) = app();
    seed(&store, 1).await;

    let response = send(&app, "DELETE", "/track/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    let response = send(&app, "GET", "/track/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_id_looks_like_success() {
    let (app, _) = app();

    let response = send(&app, "DELETE", "/track/31337", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn delete_bad_id_is_400() {
    let (app, _) = app();

    let response = send(&app, "DELETE", "/track/abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_backend_failure_is_500() {
    let app = app_with(Arc::new(BrokenStore));

    let response = send(&app, "DELETE", "/track/1", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json_body(response).await["error"].is_string());
}

// === List ===

#[tokio::test]
async fn list_empty_table_is_empty_array() {
    let (app, _) = app();

    let response = send(&app, "GET", "/tracks", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn list_defaults_to_ten() {
    let (app, store) = app();
    seed(&store, 15).await;

    let body = json_body(send(&app, "GET", "/tracks", None).await).await;
    assert_eq!(body.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn list_respects_start_and_count() {
    let (app, store) = app();
    seed(&store, 15).await;

    let body = json_body(send(&app, "GET", "/tracks?start=12&count=2", None).await).await;
    assert_eq!(
        body,
        json!([{"id": 13, "song": "song 12"}, {"id": 14, "song": "song 13"}])
    );
}

#[tokio::test]
async fn list_out_of_range_count_falls_back_to_ten() {
    let (app, store) = app();
    seed(&store, 15).await;

    for uri in ["/tracks?count=0", "/tracks?count=999", "/tracks?count=abc"] {
        let body = json_body(send(&app, "GET", uri, None).await).await;
        assert_eq!(body.as_array().unwrap().len(), 10, "{uri}");
    }
}

#[tokio::test]
async fn list_negative_start_falls_back_to_zero() {
    let (app, store) = app();
    seed(&store, 3).await;

    let body = json_body(send(&app, "GET", "/tracks?start=-5", None).await).await;
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn list_past_end_is_empty() {
    let (app, store) = app();
    seed(&store, 3).await;

    let body = json_body(send(&app, "GET", "/tracks?start=3", None).await).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_backend_failure_is_500() {
    let app = app_with(Arc::new(BrokenStore));

    let response = send(&app, "GET", "/tracks", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// === Routing ===

#[tokio::test]
async fn unknown_method_is_rejected() {
    let (app, _) = app();

    let response = send(&app, "PATCH", "/track/1", Some(r#"{"song":"a"}"#)).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_reports_store_state() {
    let (app, _) = app();
    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");

    let app = app_with(Arc::new(BrokenStore));
    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
