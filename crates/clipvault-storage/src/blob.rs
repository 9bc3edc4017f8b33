//! Blob store: id-addressed uploads with metadata.
//!
//! Each blob is kept as two objects under the bucket prefix: the raw bytes at
//! `{bucket}/{id}` and a JSON [`BlobMeta`] sidecar at `{bucket}/{id}.json`.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, warn};

use clipvault_core::config::StorageConfig;
use clipvault_core::error::AppError;
use clipvault_core::result::AppResult;
use clipvault_core::traits::storage::{ByteStream, StorageProvider};
use clipvault_core::types::BlobId;
use clipvault_entity::blob::BlobMeta;

use crate::providers::LocalStorageProvider;

/// Streamed binary storage keyed by [`BlobId`].
#[async_trait]
pub trait BlobStore: Send + Sync + fmt::Debug + 'static {
    /// Name of the backend holding the bytes.
    fn backend(&self) -> &str {
        "blob"
    }

    /// Store a new blob and return its metadata.
    async fn put(
        &self,
        filename: &str,
        content_type: Option<&str>,
        stream: ByteStream,
    ) -> AppResult<BlobMeta>;

    /// Open a blob for streamed reading. Unknown ids fail with `NotFound`.
    async fn open(&self, id: &BlobId) -> AppResult<ByteStream>;

    /// Look up a blob's metadata.
    async fn metadata(&self, id: &BlobId) -> AppResult<Option<BlobMeta>>;

    /// Remove a blob and its metadata. Unknown ids are not an error.
    async fn delete(&self, id: &BlobId) -> AppResult<()>;

    /// Check that the underlying provider is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// [`BlobStore`] over any [`StorageProvider`].
#[derive(Debug, Clone)]
pub struct BlobBucket {
    provider: Arc<dyn StorageProvider>,
    bucket: String,
}

impl BlobBucket {
    /// Create a bucket that stores objects under `bucket/`.
    pub fn new(provider: Arc<dyn StorageProvider>, bucket: impl Into<String>) -> Self {
        Self {
            provider,
            bucket: bucket.into().trim_matches('/').to_string(),
        }
    }

    /// Remove a data object whose upload did not complete.
    async fn discard_partial(&self, id: &BlobId, data_key: &str) {
        if let Err(e) = self.provider.delete(data_key).await {
            warn!(blob_id = %id, error = %e, "Failed to remove orphaned blob data");
        }
    }

    fn data_key(&self, id: &BlobId) -> String {
        format!("{}/{id}", self.bucket)
    }

    fn meta_key(&self, id: &BlobId) -> String {
        format!("{}/{id}.json", self.bucket)
    }
}

/// Build the configured blob store on the local filesystem provider.
pub async fn open_blob_store(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    let provider = LocalStorageProvider::new(&config.local.root_path).await?;
    tracing::info!(
        root = %config.local.root_path,
        bucket = %config.bucket,
        "Blob store ready"
    );
    Ok(Arc::new(BlobBucket::new(Arc::new(provider), config.bucket.clone())))
}

/// Keep only the final path component of a client-supplied filename.
fn clean_filename(filename: &str, id: &BlobId) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() {
        BlobMeta::placeholder_name(id)
    } else {
        name.to_string()
    }
}

#[async_trait]
impl BlobStore for BlobBucket {
    fn backend(&self) -> &str {
        self.provider.provider_type()
    }

    async fn put(
        &self,
        filename: &str,
        content_type: Option<&str>,
        stream: ByteStream,
    ) -> AppResult<BlobMeta> {
        let id = BlobId::new();
        let data_key = self.data_key(&id);
        let size_bytes = match self.provider.write_stream(&data_key, stream).await {
            Ok(size) => size,
            Err(e) => {
                self.discard_partial(&id, &data_key).await;
                return Err(e);
            }
        };

        let meta = BlobMeta {
            id,
            filename: clean_filename(filename, &id),
            content_type: content_type.map(str::to_string),
            size_bytes,
            uploaded_at: Utc::now(),
        };

        let sidecar = Bytes::from(serde_json::to_vec(&meta)?);
        if let Err(e) = self.provider.write(&self.meta_key(&id), sidecar).await {
            self.discard_partial(&id, &data_key).await;
            return Err(e);
        }

        debug!(blob_id = %id, filename = %meta.filename, size_bytes, "Stored blob");
        Ok(meta)
    }

    async fn open(&self, id: &BlobId) -> AppResult<ByteStream> {
        self.provider
            .read(&self.data_key(id))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AppError::not_found(format!("Blob {id} not found"))
                } else {
                    e
                }
            })
    }

    async fn metadata(&self, id: &BlobId) -> AppResult<Option<BlobMeta>> {
        match self.provider.read_bytes(&self.meta_key(id)).await {
            Ok(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, id: &BlobId) -> AppResult<()> {
        self.provider.delete(&self.data_key(id)).await?;
        self.provider.delete(&self.meta_key(id)).await?;
        debug!(blob_id = %id, "Deleted blob");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.provider.health_check().await
    }
}
