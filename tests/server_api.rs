mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use common::*;
use std::sync::Arc;
use synoid_sign::server;
use synoid_sign::sign::Frame;
use synoid_sign::state::SignState;
use tower::ServiceExt;

fn app(populated: bool) -> axum::Router {
    let embedder = Arc::new(FakeEmbedder::new(&["hello", "world"]));
    let repository = if populated {
        ScriptedRepository::default().with_hit(0, sign("hello", 3, 0.0), 0.9)
    } else {
        ScriptedRepository::default()
    };
    let table = alphabet(&[('W', 1), ('O', 1), ('R', 1), ('L', 1), ('D', 1)]);
    let state = SignState::from_parts(embedder, Arc::new(repository), table, None, 0.75, 5);
    server::create_router(Arc::new(state))
}

fn pose_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/pose")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_pose_returns_assembled_frames() {
    let response = app(true)
        .oneshot(pose_request(r#"{"words": "Hello World"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let frames: Vec<Frame> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(frames.len(), 3 + 5 + 5);
    assert_eq!(frames[12].frame_index, 12);
    assert_eq!(frames[12].word, "fs-WORLD");

    let raw: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(raw[0]["frame"], 0);
    assert!(raw[0]["left_hand_landmarks"].is_null());
}

#[tokio::test]
async fn test_pose_rejects_blank_or_missing_words() {
    for body in [r#"{"words": "   "}"#, r#"{"words": ""}"#, r#"{}"#] {
        let response = app(true).oneshot(pose_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
    }
}

#[tokio::test]
async fn test_pose_reports_empty_store_as_server_error() {
    let response = app(false)
        .oneshot(pose_request(r#"{"words": "hello"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_pose_gzips_when_accepted() {
    let mut request = pose_request(r#"{"words": "hello"}"#);
    request
        .headers_mut()
        .insert(header::ACCEPT_ENCODING, "gzip".parse().unwrap());
    let response = app(true).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");
}

#[tokio::test]
async fn test_preflight_allows_private_network_access() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/pose")
        .header(header::ORIGIN, "https://www.youtube.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .header("access-control-request-private-network", "true")
        .body(Body::empty())
        .unwrap();
    let response = app(true).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers["access-control-allow-private-network"], "true");
}

#[tokio::test]
async fn test_status_reports_loaded_collaborators() {
    let response = app(true)
        .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let status: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status["signs"], 1);
    assert_eq!(status["letters"], 5);
    assert_eq!(status["transition_frames"], 5);
    assert_eq!(status["rephrasing"], false);
}
