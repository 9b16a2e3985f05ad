//! Response shape tests — drive the router directly (no listener) with the
//! offline LLM backend so results are deterministic.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use clausewatch_core::{ClauseWatchConfig, DataPaths, PipelineSettings};
use clausewatch_llm::{LLMConfig, OfflineLlm};
use clausewatch_server::{build_router, AppState};
use tower::ServiceExt;

const BOUNDARY: &str = "clausewatch-test-boundary";

fn app(dir: &tempfile::TempDir) -> Router {
    let config = ClauseWatchConfig {
        port: 0,
        data_paths: DataPaths::new(dir.path()).unwrap(),
        cache_capacity: 16,
        pipeline: PipelineSettings::default(),
    };
    let state = AppState::with_backend(
        config,
        LLMConfig::default().to_status(),
        Arc::new(OfflineLlm),
    );
    build_router(Arc::new(state))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart(filename: &str, contents: &str, keywords: Option<&str>) -> Request<Body> {
    let mut body = String::new();
    body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{contents}\r\n"
    ));
    if let Some(keywords) = keywords {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"forbidden_keywords\"\r\n\r\n{keywords}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::post("/api/v1/compliance/check-file")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn uploads_is_empty(dir: &tempfile::TempDir) -> bool {
    std::fs::read_dir(dir.path().join("uploads"))
        .unwrap()
        .next()
        .is_none()
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, json) = send(app(&dir), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_status_shape() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::get("/api/v1/status").body(Body::empty()).unwrap();
    let (status, json) = send(app(&dir), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["llmBackend"], "offline");
    assert_eq!(json["llm"]["llmAvailable"], false);
    assert_eq!(json["cacheEntries"], 0);
    assert_eq!(json["maxTokensPerChunk"], 500);
    assert!(json["cacheTtlSecs"].is_null());
    assert!(json["startedAt"].is_string());
}

#[tokio::test]
async fn test_check_text_report_shape() {
    let dir = tempfile::tempdir().unwrap();
    let request = post_json(
        "/api/v1/compliance/check",
        serde_json::json!({
            "document_text": "This contract contains a secret clause.",
            "rules": { "forbidden_keywords": ["secret"] },
        }),
    );
    let (status, json) = send(app(&dir), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["summary"].is_string());
    assert!(json["sentiment"]["polarity"].is_number());
    assert!(json["sentiment"]["sentiment"].is_string());
    assert_eq!(json["findings"], serde_json::json!([{ "match": "secret" }]));
    assert!(json["score"].as_u64().unwrap() < 100);
    assert_eq!(json["recommendations"].as_str().unwrap().lines().count(), 3);
    assert!(json["tokens"]["input"].is_number());
    assert!(json["tokens"]["output"].is_number());
    assert!(json["tokens"]["total"].is_number());
    assert!(["LOW", "MEDIUM", "HIGH"].contains(&json["risk_level"].as_str().unwrap()));
}

#[tokio::test]
async fn test_check_text_without_rules() {
    let dir = tempfile::tempdir().unwrap();
    let request = post_json(
        "/api/v1/compliance/check",
        serde_json::json!({ "document_text": "The parties met on Tuesday." }),
    );
    let (status, json) = send(app(&dir), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["findings"], serde_json::json!([]));
    assert_eq!(json["score"], 100);
    assert_eq!(json["risk_level"], "LOW");
}

#[tokio::test]
async fn test_missing_text_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let request = post_json("/api/v1/compliance/check", serde_json::json!({ "rules": {} }));
    let (status, json) = send(app(&dir), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
    assert!(json["error"].as_str().unwrap().contains("document_text"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::post("/api/v1/compliance/check")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, json) = send(app(&dir), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_check_file_upload() {
    let dir = tempfile::tempdir().unwrap();
    let request = multipart(
        "contract.txt",
        "This contract contains a secret clause.\n\nPayment is due in thirty days.",
        Some("secret, merger"),
    );
    let (status, json) = send(app(&dir), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["findings"], serde_json::json!([{ "match": "secret" }]));
    assert!(uploads_is_empty(&dir));
}

#[tokio::test]
async fn test_check_file_unsupported_type() {
    let dir = tempfile::tempdir().unwrap();
    let (status, json) = send(app(&dir), multipart("photo.png", "binary", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Unsupported"));
    assert!(uploads_is_empty(&dir));
}

#[tokio::test]
async fn test_check_file_without_text_is_unprocessable() {
    let dir = tempfile::tempdir().unwrap();
    let (status, json) = send(app(&dir), multipart("blank.txt", "   ", None)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_check_file_requires_file_field() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"forbidden_keywords\"\r\n\r\nsecret\r\n--{BOUNDARY}--\r\n"
    );
    let request = Request::post("/api/v1/compliance/check-file")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, json) = send(app(&dir), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("file"));
}
