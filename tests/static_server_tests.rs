/// Static asset server tests against a temporary directory.
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
};
use lead_search::static_files;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.js"), "console.log('leads');").unwrap();
    fs::create_dir(dir.path().join("assets")).unwrap();
    fs::write(dir.path().join("assets").join("logo.svg"), "<svg/>").unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs").join("index.html"), "<h1>Docs</h1>").unwrap();
    dir
}

async fn request(dir: &TempDir, method: &str, uri: &str) -> Response {
    static_files::router(dir.path())
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_cors(response: &Response) {
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*",
        "missing CORS header on {} response",
        response.status()
    );
}

#[tokio::test]
async fn serves_file_contents_with_cors() {
    let dir = site();
    let response = request(&dir, "GET", "/app.js").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(body_text(response).await, "console.log('leads');");
}

#[tokio::test]
async fn missing_file_is_not_found_with_cors() {
    let dir = site();
    let response = request(&dir, "GET", "/nope.html").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(&response);
}

#[tokio::test]
async fn traversal_is_not_found() {
    let dir = site();
    let response = request(&dir, "GET", "/../../etc/passwd").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(&response);
}

#[tokio::test]
async fn root_without_index_lists_entries() {
    let dir = site();
    let response = request(&dir, "GET", "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let html = body_text(response).await;
    assert!(html.contains("href=\"app.js\""));
    assert!(html.contains("href=\"assets/\""));
    assert!(html.contains("href=\"docs/\""));
    assert!(!html.contains("href=\"../\""));
}

#[tokio::test]
async fn subdirectory_listing_links_to_parent() {
    let dir = site();
    let response = request(&dir, "GET", "/assets/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("href=\"../\""));
    assert!(html.contains("logo.svg"));
}

#[tokio::test]
async fn directory_without_slash_redirects() {
    let dir = site();
    let response = request(&dir, "GET", "/assets").await;

    assert!(response.status().is_redirection());
    assert_cors(&response);
    assert_eq!(response.headers()[header::LOCATION], "/assets/");
}

#[tokio::test]
async fn directory_with_index_serves_index() {
    let dir = site();
    let response = request(&dir, "GET", "/docs/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<h1>Docs</h1>");
}

#[tokio::test]
async fn unsupported_method_still_carries_cors() {
    let dir = site();
    let response = request(&dir, "POST", "/app.js").await;

    assert!(!response.status().is_success());
    assert_cors(&response);
}
