//! Blob metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clipvault_core::types::BlobId;

/// Metadata recorded for every stored blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMeta {
    /// Blob identifier.
    pub id: BlobId,
    /// Original filename supplied by the sender.
    pub filename: String,
    /// MIME type reported by the sender, if any.
    pub content_type: Option<String>,
    /// Size in bytes.
    pub size_bytes: u64,
    /// When the upload finished.
    pub uploaded_at: DateTime<Utc>,
}

impl BlobMeta {
    /// Name to show for a blob whose metadata could not be found.
    pub fn placeholder_name(id: &BlobId) -> String {
        format!("file-{id}")
    }
}
