//! Integration tests for send and receive.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use clipvault_database::ShareStore;
use clipvault_entity::share::NewShareRecord;
use helpers::{MultipartForm, TestApp};

#[tokio::test]
async fn test_send_then_receive_text() {
    let app = TestApp::new().await;

    let response = app
        .send(&MultipartForm::new().text("text", "hello from the clipboard"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Sent successfully!");

    let code = response.body["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 4);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    let response = app.get(&format!("/api/receive/{code}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["text"], "hello from the clipboard");
    assert_eq!(response.body["files"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_second_receive_is_limited() {
    let app = TestApp::new().await;
    let code = app.send_text("once only", None).await;

    let first = app.get(&format!("/api/receive/{code}")).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.get(&format!("/api/receive/{code}")).await;
    assert_eq!(second.status, StatusCode::FORBIDDEN);
    assert_eq!(second.body["error"], "Code expired");
    assert_eq!(second.body["kind"], "LIMIT_REACHED");

    let record = app.store.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(record.receiver_count, 1);
}

#[tokio::test]
async fn test_max_receivers_from_form() {
    let app = TestApp::new().await;
    let code = app.send_text("for three", Some("3")).await;

    for _ in 0..3 {
        let response = app.get(&format!("/api/receive/{code}")).await;
        assert_eq!(response.status, StatusCode::OK);
    }
    let response = app.get(&format!("/api/receive/{code}")).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_every_receiver_gets_the_same_payload() {
    let app = TestApp::new().await;

    let form = MultipartForm::new()
        .text("text", "shared with three")
        .text("maxReceivers", "3")
        .file("agenda.txt", b"item one");
    let response = app.send(&form).await;
    assert_eq!(response.status, StatusCode::OK);
    let code = response.body["code"].as_str().unwrap().to_string();

    let first = app.get(&format!("/api/receive/{code}")).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["text"], "shared with three");
    assert_eq!(first.body["files"][0]["filename"], "agenda.txt");

    for _ in 1..3 {
        let response = app.get(&format!("/api/receive/{code}")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["text"], first.body["text"]);
        assert_eq!(response.body["files"], first.body["files"]);
    }

    let response = app.get(&format!("/api/receive/{code}")).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "Code expired");
}

#[tokio::test]
async fn test_unparsable_max_receivers_defaults_to_one() {
    let app = TestApp::new().await;
    let code = app.send_text("default", Some("lots")).await;

    let record = app.store.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(record.max_receivers, 1);
}

#[tokio::test]
async fn test_unknown_code_is_invalid() {
    let app = TestApp::new().await;

    for path in ["/api/receive/1234", "/api/receive/abcd", "/api/receive/0999"] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.body["error"], "Invalid Code");
        assert_eq!(response.body["kind"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_expired_code_is_invalid() {
    let app = TestApp::new().await;
    let now = Utc::now();

    app.store
        .insert(&NewShareRecord {
            code: "4321".to_string(),
            payload_text: Some("too late".to_string()),
            file_refs: Vec::new(),
            created_at: now - Duration::minutes(20),
            expires_at: now - Duration::minutes(10),
            max_receivers: 5,
        })
        .await
        .unwrap();

    let response = app.get("/api/receive/4321").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Invalid Code");

    let record = app.store.find_by_code("4321").await.unwrap().unwrap();
    assert_eq!(record.receiver_count, 0);
}

#[tokio::test]
async fn test_expiry_is_clamped() {
    let app = TestApp::new().await;

    let response = app
        .send(
            &MultipartForm::new()
                .text("text", "long lived")
                .text("expiryMinutes", "999"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let code = response.body["code"].as_str().unwrap();

    let record = app.store.find_by_code(code).await.unwrap().unwrap();
    assert_eq!(
        record.expires_at - record.created_at,
        Duration::minutes(app.config.share.max_expiry_minutes)
    );
}

#[tokio::test]
async fn test_default_expiry() {
    let app = TestApp::new().await;
    let code = app.send_text("default expiry", None).await;

    let record = app.store.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(record.expires_at - record.created_at, Duration::minutes(10));
}

#[tokio::test]
async fn test_empty_send_is_rejected() {
    let app = TestApp::new().await;

    let response = app.send(&MultipartForm::new().text("text", "   ")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["kind"], "VALIDATION");

    let response = app.send(&MultipartForm::new().file("", b"")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.get("/api/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"]["backend"], "memory");
    assert_eq!(response.body["store"]["healthy"], true);
    assert_eq!(response.body["blobs"]["healthy"], true);
}
