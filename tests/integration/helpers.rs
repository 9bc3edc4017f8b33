//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use clipvault_core::config::{AppConfig, StoreProvider};
use clipvault_database::MemoryShareStore;
use clipvault_storage::open_blob_store;

const BOUNDARY: &str = "clipvault-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Direct handle on the record store
    pub store: MemoryShareStore,
    /// Application config
    pub config: AppConfig,
    /// Blob root; removed on drop
    _blob_dir: TempDir,
}

impl TestApp {
    /// Create a new test application on the in-memory store and a temp blob root
    pub async fn new() -> Self {
        let blob_dir = tempfile::tempdir().expect("Failed to create blob dir");

        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.storage.local.root_path = blob_dir.path().to_string_lossy().into_owned();

        let store = MemoryShareStore::new();
        let blobs = open_blob_store(&config.storage)
            .await
            .expect("Failed to open blob store");

        let state = clipvault_api::AppState::new(
            Arc::new(config.clone()),
            Arc::new(store.clone()),
            blobs,
        );
        let router = clipvault_api::build_app(state);

        Self {
            router,
            store,
            config,
            _blob_dir: blob_dir,
        }
    }

    /// Send a request and parse the JSON body
    pub async fn request(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            bytes,
        }
    }

    /// GET a path
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.request(req).await
    }

    /// POST a multipart form to /api/send
    pub async fn send(&self, form: &MultipartForm) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri("/api/send")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(form.to_body()))
            .expect("Failed to build request");
        self.request(req).await
    }

    /// Send text only and return the issued code
    pub async fn send_text(&self, text: &str, max_receivers: Option<&str>) -> String {
        let mut form = MultipartForm::new().text("text", text);
        if let Some(max) = max_receivers {
            form = form.text("maxReceivers", max);
        }
        let response = self.send(&form).await;
        assert_eq!(response.status, StatusCode::OK, "send failed: {}", response.body);
        response.body["code"]
            .as_str()
            .expect("code missing from send response")
            .to_string()
    }
}

/// Test response with parsed JSON body
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
    /// Raw body
    pub bytes: Vec<u8>,
}

/// Hand-built `multipart/form-data` body
#[derive(Debug, Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    /// Empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain field
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    /// Add a `file` part
    pub fn file(mut self, filename: &str, content: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(content);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Finish the body with the closing boundary
    pub fn to_body(&self) -> Vec<u8> {
        let mut body = self.body.clone();
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }
}
