//! Integration tests for HttpBackend against a mocked docchat API.

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use docchat_client::HttpBackend;
use docchat_core::backend::{DocumentBackend, FilePayload};
use docchat_core::error::DocChatError;

fn payload(name: &str) -> FilePayload {
    FilePayload::new(name, b"file content".to_vec())
}

#[tokio::test]
async fn upload_returns_file_id_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "file_id": "abc-123",
            "filename": "notes.txt"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let file_id = backend.upload(payload("notes.txt")).await.unwrap();

    assert_eq!(file_id, "abc-123");
}

#[tokio::test]
async fn upload_error_uses_detail_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "detail": "Unsupported file format: .exe"
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend.upload(payload("binary.exe")).await.unwrap_err();

    assert!(err.is_backend());
    assert_eq!(err.to_string(), "Unsupported file format: .exe");
}

#[tokio::test]
async fn upload_error_without_detail_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend.upload(payload("notes.txt")).await.unwrap_err();

    assert!(err.is_backend());
    assert_eq!(err.to_string(), "Upload failed");
}

#[tokio::test]
async fn ask_posts_file_id_and_question_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(body_json(serde_json::json!({
            "file_id": "abc-123",
            "question": "summarize"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "answer": "It is a todo list."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let answer = backend.ask("abc-123", "summarize").await.unwrap();

    assert_eq!(answer, "It is a todo list.");
}

#[tokio::test]
async fn ask_error_uses_detail_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "detail": "No files uploaded"
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend.ask("missing", "anything").await.unwrap_err();

    assert_eq!(err.to_string(), "No files uploaded");
    assert!(matches!(
        err,
        DocChatError::Backend {
            status: Some(404),
            ..
        }
    ));
}

#[tokio::test]
async fn delete_hits_the_path_with_the_file_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete/abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "deleted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    backend.delete("abc-123").await.unwrap();
}

#[tokio::test]
async fn delete_missing_file_is_a_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "detail": "File not found"
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend.delete("ghost").await.unwrap_err();

    assert_eq!(err.to_string(), "File not found");
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    // Port 1 on localhost is never listening
    let backend = HttpBackend::new("http://127.0.0.1:1");
    let err = backend.ask("abc", "anything").await.unwrap_err();

    assert!(err.is_network());
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "file_id": "abc-123"
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(format!("{}/", server.uri()));
    let file_id = backend.upload(payload("notes.txt")).await.unwrap();

    assert_eq!(file_id, "abc-123");
}

#[tokio::test]
async fn controller_end_to_end_over_http() {
    use std::sync::Arc;

    use docchat_core::SessionController;

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "file_id": "f1"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "answer": "It is a todo list."
        })))
        .mount(&server)
        .await;

    let backend = Arc::new(HttpBackend::new(server.uri()));
    let controller = SessionController::new(backend);

    controller
        .upload(FilePayload::new("notes.txt", b"todo: everything".to_vec()))
        .await
        .unwrap();
    let answer = controller.ask("summarize").await.unwrap();

    assert_eq!(answer, "It is a todo list.");
    let texts: Vec<_> = controller
        .messages()
        .await
        .iter()
        .map(|m| m.text.clone())
        .collect();
    assert_eq!(
        texts,
        vec!["notes.txt uploaded", "summarize", "It is a todo list."]
    );
}
