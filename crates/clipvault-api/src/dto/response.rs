//! Response DTOs.

use serde::{Deserialize, Serialize};

use clipvault_service::{ReceivedFile, ReceivedShare};

/// Body of a successful send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    /// Always `true`.
    pub success: bool,
    /// Confirmation text.
    pub message: String,
    /// The share code.
    pub code: String,
}

impl SendResponse {
    /// Confirmation for a new share code.
    pub fn sent(code: String) -> Self {
        Self {
            success: true,
            message: "Sent successfully!".to_string(),
            code,
        }
    }
}

/// A downloadable file in a receive response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLink {
    /// Display name.
    pub filename: String,
    /// Download path.
    pub url: String,
}

impl From<ReceivedFile> for FileLink {
    fn from(file: ReceivedFile) -> Self {
        Self {
            filename: file.filename,
            url: file.url,
        }
    }
}

/// Body of a successful receive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveResponse {
    /// Shared text, `null` when none was sent.
    pub text: Option<String>,
    /// Shared files in upload order.
    pub files: Vec<FileLink>,
}

impl From<ReceivedShare> for ReceiveResponse {
    fn from(share: ReceivedShare) -> Self {
        Self {
            text: share.text,
            files: share.files.into_iter().map(FileLink::from).collect(),
        }
    }
}

/// Health of one dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Backend name.
    pub backend: String,
    /// Whether the last check succeeded.
    pub healthy: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// Share record store.
    pub store: ComponentHealth,
    /// Blob store.
    pub blobs: ComponentHealth,
}
