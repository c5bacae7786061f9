//! HTTP-level tests against the real router.
//!
//! These never touch the network or the real yt-dlp binary: the client is
//! pointed at a nonexistent path, so every download attempt fails fast.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use mediagrab::api::routes::create_router;
use mediagrab::api::server::AppState;
use mediagrab::config::AppConfig;

fn test_router(static_dir: &std::path::Path) -> Router {
    let config = AppConfig {
        ytdlp_path: "/nonexistent/yt-dlp-missing".into(),
        static_dir: static_dir.to_path_buf(),
        ..AppConfig::default()
    };
    create_router(AppState::new(config))
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn get_info_rejects_empty_url_list() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path());

    let response = app
        .oneshot(json_post("/get_info", serde_json::json!({ "urls": [] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({"error": "No URLs provided"}));
}

#[tokio::test]
async fn download_single_rejects_blank_url() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path());

    let response = app
        .oneshot(json_post(
            "/download_single",
            serde_json::json!({ "url": "   ", "format": "mp3" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({"error": "No URL provided"}));
}

#[tokio::test]
async fn download_all_rejects_empty_url_list() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path());

    let response = app
        .oneshot(json_post(
            "/download_all",
            serde_json::json!({ "urls": [], "format": "mp4" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({"error": "No URLs provided"}));
}

#[tokio::test]
async fn download_failure_returns_server_error_body() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path());

    let response = app
        .oneshot(json_post(
            "/download_single",
            serde_json::json!({ "url": "https://example.com/v", "format": "mp4" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({"error": "No videos could be downloaded."})
    );
}

#[tokio::test]
async fn unknown_format_is_a_client_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path());

    let response = app
        .oneshot(json_post(
            "/download_single",
            serde_json::json!({ "url": "https://example.com/v", "format": "flac" }),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn health_reports_version_and_binary_availability() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(dir.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].as_str().is_some_and(|v| !v.is_empty()));
    assert!(body["uptime_seconds"].is_u64());
    // The test client points at a nonexistent binary.
    assert_eq!(body["ytdlp_available"], false);
}

#[tokio::test]
async fn index_page_is_served_from_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        "<!DOCTYPE html><title>mediagrab</title>",
    )
    .unwrap();
    let app = test_router(dir.path());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("mediagrab"));
}
