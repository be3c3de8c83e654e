//! Integration tests for the upstream API proxy (ANY /proxy/{*path}).

mod common;

use axum::{
    Json, Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, Uri, header},
    response::IntoResponse,
    routing::any,
};
use core_fleet::Severity;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use common::{recording_logger, send, spawn_upstream, test_router, test_state, unreachable_upstream};
use web_fleet::routes::proxy::MAX_BODY_BYTES;

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> impl IntoResponse {
    let status = if method == Method::POST {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (
        status,
        [("x-upstream", "echo")],
        Json(json!({
            "method": method.as_str(),
            "path": uri.path(),
            "query": uri.query(),
            "authorization": headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()),
            "host_forwarded": headers.get(header::HOST).and_then(|v| v.to_str().ok()) == Some("www.example.com"),
            "body": body,
        })),
    )
}

fn echo_upstream() -> Router {
    Router::new().route("/api/v1/{*rest}", any(echo))
}

#[tokio::test]
async fn test_proxy_get_with_query() {
    let upstream = spawn_upstream(echo_upstream()).await;
    let app = test_router(test_state(Some(&upstream)));

    let response = common::get(app, "/proxy/api/v1/cars?type=suv&page=2").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers.get("x-upstream").unwrap(), "echo");

    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["method"], "GET");
    assert_eq!(body["path"], "/api/v1/cars");
    assert_eq!(body["query"], "type=suv&page=2");
}

#[tokio::test]
async fn test_proxy_post_forwards_body_and_headers() {
    let upstream = spawn_upstream(echo_upstream()).await;
    let app = test_router(test_state(Some(&upstream)));

    let request = Request::builder()
        .method("POST")
        .uri("/proxy/api/v1/bookings")
        .header(header::HOST, "www.example.com")
        .header(header::AUTHORIZATION, "Bearer token-123")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"car":"toyota-corolla","days":3}"#))
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["method"], "POST");
    assert_eq!(body["path"], "/api/v1/bookings");
    assert_eq!(body["authorization"], "Bearer token-123");
    assert_eq!(body["host_forwarded"], false);
    assert_eq!(body["body"], r#"{"car":"toyota-corolla","days":3}"#);
}

#[tokio::test]
async fn test_proxy_relays_upstream_errors() {
    let upstream = spawn_upstream(echo_upstream()).await;
    let app = test_router(test_state(Some(&upstream)));

    let response = common::get(app, "/proxy/not-the-api").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_proxy_upstream_unavailable() {
    let upstream = unreachable_upstream().await;
    let app = test_router(test_state(Some(&upstream)));

    let response = common::get(app, "/proxy/api/v1/cars").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["error"], "upstream_unavailable");
}

#[tokio::test]
async fn test_proxy_rejects_oversized_body() {
    let upstream = unreachable_upstream().await;
    let app = test_router(test_state(Some(&upstream)));

    let request = Request::builder()
        .method("POST")
        .uri("/proxy/api/v1/uploads")
        .body(Body::from(vec![0u8; MAX_BODY_BYTES + 1]))
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["error"], "request_body_too_large");
}

async fn echoed(uri: &str) -> (StatusCode, Value) {
    let upstream = spawn_upstream(echo_upstream()).await;
    let app = test_router(test_state(Some(&upstream)));
    let response = common::get(app, uri).await;
    let body = serde_json::from_str(&response.body).unwrap_or(Value::Null);
    (response.status, body)
}

#[tokio::test]
async fn test_proxy_keeps_encoded_hash_in_path() {
    let (status, body) = echoed("/proxy/api/v1/blogs/c%23-tips").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "/api/v1/blogs/c%23-tips");
    assert_eq!(body["query"], Value::Null);
}

#[tokio::test]
async fn test_proxy_keeps_encoded_question_mark_out_of_query() {
    let (status, body) = echoed("/proxy/api/v1/search/what%3Fx%3D1?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "/api/v1/search/what%3Fx%3D1");
    assert_eq!(body["query"], "page=2");
}

#[tokio::test]
async fn test_proxy_forwards_non_utf8_escapes() {
    let (status, body) = echoed("/proxy/api/v1/files/%FF").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "/api/v1/files/%FF");
}

/// Upstream that announces a longer body than it sends, then hangs up.
async fn truncating_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"partial\":")
            .await;
        let _ = socket.shutdown().await;
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_proxy_logs_truncated_upstream_body() {
    let upstream = truncating_upstream().await;
    let (logger, sink) = recording_logger();
    let app = test_router(test_state(Some(&upstream)).with_logger(logger));

    let response = common::get(app, "/proxy/api/v1/cars").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["error"], "upstream_unavailable");

    let lines = sink.lines.lock().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, Severity::Error);
    assert!(lines[0].1.starts_with("proxy:"));
}
