use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::{DateTime, TimeZone, Utc};
use ecobin_core::app::AppBuilder;
use ecobin_core::domain::{Bin, BinId, BinStatus, StatusUpdate};
use ecobin_core::impls::InMemoryStore;
use ecobin_core::ports::{BinStore, FixedClock, StatusHistory, StoreError};
use ecobin_server::{router, state::AppState};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 15, 30).unwrap()
}

fn app_with_store() -> (Router, Arc<InMemoryStore>) {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    let bin = Bin::new(BinId::parse("abc123").unwrap(), "Main St", "loc-1", "qr-1", created);
    let store = Arc::new(InMemoryStore::with_bins([bin]));

    let app = AppBuilder::new()
        .bin_store(store.clone())
        .status_history(store.clone())
        .clock(Arc::new(FixedClock::new(now())))
        .build()
        .unwrap();

    (router(AppState::new(app)), store)
}

fn put_status(id: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::PUT)
        .uri(format!("/bins/{id}/status"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, header::HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

#[tokio::test]
async fn test_update_existing_bin() {
    let (app, store) = app_with_store();

    let (status, headers, body) = send(app.clone(), put_status("abc123", r#"{"status":"FULL"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["id"], "abc123");
    assert_eq!(body["status"], "FULL");
    assert_eq!(body["name"], "Main St");
    assert_eq!(body["lastUpdated"], "2024-05-01T09:15:30.000Z");
    assert_eq!(body["createdAt"], "2024-01-01T08:00:00.000Z");

    let history = store.list_for_bin(&BinId::parse("abc123").unwrap()).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, BinStatus::Full);
    assert_eq!(history[0].timestamp, now());
}

#[tokio::test]
async fn test_update_missing_bin() {
    let (app, store) = app_with_store();

    let (status, headers, body) = send(app, put_status("missing", r#"{"status":"OK"}"#)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body, json!({ "message": "Bin not found" }));
    assert_eq!(store.get_bin(&BinId::parse("missing").unwrap()).await.unwrap(), None);
}

#[rstest]
#[case::unknown(r#"{"status":"DIRTY"}"#)]
#[case::lowercase(r#"{"status":"ok"}"#)]
#[case::missing("{}")]
#[case::null(r#"{"status":null}"#)]
#[case::number(r#"{"status":5}"#)]
#[tokio::test]
async fn test_invalid_status_is_rejected(#[case] payload: &str) {
    let (app, store) = app_with_store();

    let (status, headers, body) = send(app, put_status("abc123", payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body, json!({ "message": "Status must be either OK or FULL" }));
    assert_eq!(store.history_len().await, 0);
}

#[rstest]
#[case::not_json("status=FULL")]
#[case::unknown_field(r#"{"status":"OK","colour":"green"}"#)]
#[case::array(r#"["FULL"]"#)]
#[case::scalar(r#""FULL""#)]
#[tokio::test]
async fn test_malformed_body_is_rejected(#[case] payload: &str) {
    let (app, store) = app_with_store();

    let (status, _, body) = send(app, put_status("abc123", payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid request body" }));
    assert_eq!(store.history_len().await, 0);
}

#[tokio::test]
async fn test_empty_bin_id_is_rejected() {
    let (app, store) = app_with_store();

    let (status, headers, body) = send(app, put_status("", r#"{"status":"OK"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body, json!({ "message": "Bin ID is required" }));
    assert_eq!(store.history_len().await, 0);
}

#[tokio::test]
async fn test_body_may_echo_bin_id() {
    let (app, store) = app_with_store();

    let (status, _, body) = send(
        app,
        put_status("abc123", r#"{"id":"abc123","status":"FULL"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "FULL");
    assert_eq!(store.history_len().await, 1);
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let (app, store) = app_with_store();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/bins/abc123/status")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"status":"FULL"}"#))
        .unwrap();

    let (status, headers, body) = send(app, request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body, json!({ "message": "Method not allowed" }));
    assert_eq!(store.history_len().await, 0);
}

#[tokio::test]
async fn test_repeated_update_is_last_write_wins() {
    let (app, store) = app_with_store();

    send(app.clone(), put_status("abc123", r#"{"status":"FULL"}"#)).await;
    let (status, _, body) = send(app, put_status("abc123", r#"{"status":"OK"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    let history = store.list_for_bin(&BinId::parse("abc123").unwrap()).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_ne!(history[0].id, history[1].id);
}

#[tokio::test]
async fn test_get_bin() {
    let (app, _) = app_with_store();

    let (status, _, body) = send(app.clone(), get("/bins/abc123")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    let (status, _, body) = send(app, get("/bins/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Bin not found" }));
}

#[tokio::test]
async fn test_status_updates_listing() {
    let (app, _) = app_with_store();
    send(app.clone(), put_status("abc123", r#"{"status":"FULL"}"#)).await;

    let (status, _, body) = send(app.clone(), get("/status-updates?binId=abc123")).await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["binId"], "abc123");
    assert_eq!(records[0]["status"], "FULL");
    assert_eq!(records[0]["timestamp"], "2024-05-01T09:15:30.000Z");
    assert!(records[0]["id"].as_str().unwrap().starts_with("upd-"));

    let (status, _, body) = send(app, get("/status-updates")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Bin ID is required" }));
}

#[tokio::test]
async fn test_health_and_fallback() {
    let (app, _) = app_with_store();

    let (status, _, body) = send(app.clone(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, headers, _) = send(app, get("/nowhere")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = app_with_store();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/bins/abc123/status")
        .header(header::ORIGIN, "https://ecobin.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("PUT"));
}

struct UnavailableStore;

#[async_trait]
impl BinStore for UnavailableStore {
    async fn update_status(
        &self,
        _id: &BinId,
        _status: BinStatus,
        _at: DateTime<Utc>,
    ) -> Result<Option<Bin>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get_bin(&self, _id: &BinId) -> Result<Option<Bin>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn put_bin(&self, _bin: Bin) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[async_trait]
impl StatusHistory for UnavailableStore {
    async fn append(&self, _record: StatusUpdate) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn list_for_bin(&self, _bin_id: &BinId) -> Result<Vec<StatusUpdate>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[rstest]
#[case::update(put_status("abc123", r#"{"status":"FULL"}"#), "Error updating bin status")]
#[case::get_bin(get("/bins/abc123"), "Error fetching bin")]
#[case::history(get("/status-updates?binId=abc123"), "Error fetching status updates")]
#[tokio::test]
async fn test_store_failure_is_500(#[case] request: Request<Body>, #[case] message: &str) {
    let store = Arc::new(UnavailableStore);
    let app = AppBuilder::new()
        .bin_store(store.clone())
        .status_history(store)
        .build()
        .unwrap();

    let (status, headers, body) = send(router(AppState::new(app)), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        body,
        json!({ "message": message, "error": "store unavailable: connection refused" })
    );
}
