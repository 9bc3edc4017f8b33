//! Integration tests for file sends and blob downloads.

mod helpers;

use axum::http::{StatusCode, header};

use helpers::{MultipartForm, TestApp};

#[tokio::test]
async fn test_send_files_and_download() {
    let app = TestApp::new().await;

    let form = MultipartForm::new()
        .text("text", "two attachments")
        .file("notes.txt", b"first file")
        .file("photo.bin", &[0u8, 159, 146, 150]);
    let response = app.send(&form).await;
    assert_eq!(response.status, StatusCode::OK);
    let code = response.body["code"].as_str().unwrap().to_string();

    let response = app.get(&format!("/api/receive/{code}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["text"], "two attachments");

    let files = response.body["files"].as_array().unwrap().clone();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["filename"], "notes.txt");
    assert_eq!(files[1]["filename"], "photo.bin");

    let url = files[0]["url"].as_str().unwrap();
    assert!(url.starts_with("/api/file/"));

    let download = app.get(url).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.bytes, b"first file");
    assert_eq!(
        download.headers[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    let disposition = download.headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains("filename=\"notes.txt\""));

    let download = app.get(files[1]["url"].as_str().unwrap()).await;
    assert_eq!(download.bytes, vec![0u8, 159, 146, 150]);
}

#[tokio::test]
async fn test_files_keep_upload_order_for_each_receiver() {
    let app = TestApp::new().await;

    let form = MultipartForm::new()
        .text("maxReceivers", "2")
        .file("first.txt", b"1")
        .file("second.txt", b"2");
    let response = app.send(&form).await;
    assert_eq!(response.status, StatusCode::OK);
    let code = response.body["code"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let response = app.get(&format!("/api/receive/{code}")).await;
        assert_eq!(response.status, StatusCode::OK);
        let files = response.body["files"].as_array().unwrap();
        let names: Vec<_> = files.iter().map(|f| f["filename"].as_str().unwrap()).collect();
        assert_eq!(names, ["first.txt", "second.txt"]);

        let download = app.get(files[1]["url"].as_str().unwrap()).await;
        assert_eq!(download.bytes, b"2");
    }

    let response = app.get(&format!("/api/receive/{code}")).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["kind"], "LIMIT_REACHED");
}

#[tokio::test]
async fn test_files_only_send() {
    let app = TestApp::new().await;

    let response = app
        .send(&MultipartForm::new().file("only.txt", b"no text"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let code = response.body["code"].as_str().unwrap().to_string();

    let response = app.get(&format!("/api/receive/{code}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["text"].is_null());
    assert_eq!(response.body["files"][0]["filename"], "only.txt");
}

#[tokio::test]
async fn test_blob_download_survives_share_exhaustion() {
    let app = TestApp::new().await;

    let response = app
        .send(&MultipartForm::new().file("keep.txt", b"still here"))
        .await;
    let code = response.body["code"].as_str().unwrap().to_string();

    let received = app.get(&format!("/api/receive/{code}")).await;
    let url = received.body["files"][0]["url"].as_str().unwrap().to_string();

    let again = app.get(&format!("/api/receive/{code}")).await;
    assert_eq!(again.status, StatusCode::FORBIDDEN);

    let download = app.get(&url).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.bytes, b"still here");
}

#[tokio::test]
async fn test_unknown_blob_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .get("/api/file/0190a7e2-1f1b-7c3d-8a4e-2b6f9d0c1e3a")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.get("/api/file/not-a-blob-id").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["kind"], "NOT_FOUND");
}
