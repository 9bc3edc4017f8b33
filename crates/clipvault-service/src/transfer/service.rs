//! Transfer service: the three operations exposed over HTTP.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use clipvault_core::error::AppError;
use clipvault_core::result::AppResult;
use clipvault_core::traits::storage::ByteStream;
use clipvault_core::types::BlobId;
use clipvault_entity::blob::BlobMeta;
use clipvault_entity::share::ShareRecord;
use clipvault_storage::BlobStore;

use crate::share::{ShareLifecycle, ShareOptions};

/// A file handed to [`TransferService::send_share`].
pub struct IncomingFile {
    /// Name supplied by the sender.
    pub filename: String,
    /// MIME type supplied by the sender.
    pub content_type: Option<String>,
    /// File contents.
    pub body: ByteStream,
}

impl std::fmt::Debug for IncomingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncomingFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// A file entry in a redeemed share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedFile {
    /// Blob id.
    pub blob_id: BlobId,
    /// Display name for the download.
    pub filename: String,
    /// Where to fetch the bytes.
    pub url: String,
}

/// The content of a redeemed share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedShare {
    /// Shared text, if any.
    pub text: Option<String>,
    /// Shared files in upload order.
    pub files: Vec<ReceivedFile>,
    /// Redemptions still available after this one.
    pub remaining_receivers: i32,
}

/// A blob ready to be streamed to a client.
pub struct BlobDownload {
    /// Blob metadata (for the download filename).
    pub meta: BlobMeta,
    /// Blob contents.
    pub stream: ByteStream,
}

impl std::fmt::Debug for BlobDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobDownload")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Orchestrates the share lifecycle and the blob store.
#[derive(Debug, Clone)]
pub struct TransferService {
    shares: Arc<ShareLifecycle>,
    blobs: Arc<dyn BlobStore>,
}

impl TransferService {
    /// Creates a new transfer service.
    pub fn new(shares: Arc<ShareLifecycle>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { shares, blobs }
    }

    /// Upload the files in order and create a share referencing them.
    ///
    /// Fails with `Validation` when there is neither text nor a file. If an
    /// upload or the record insert fails, every blob already written for
    /// this send is deleted before the error is returned.
    pub async fn send_share(
        &self,
        text: Option<String>,
        files: Vec<IncomingFile>,
        options: ShareOptions,
    ) -> AppResult<ShareRecord> {
        let text = text.filter(|t| !t.trim().is_empty());
        if text.is_none() && files.is_empty() {
            return Err(AppError::validation("Provide some text or at least one file"));
        }

        let mut file_refs = Vec::with_capacity(files.len());
        for file in files {
            match self
                .blobs
                .put(&file.filename, file.content_type.as_deref(), file.body)
                .await
            {
                Ok(meta) => file_refs.push(meta.id),
                Err(e) => {
                    self.discard(&file_refs).await;
                    return Err(e);
                }
            }
        }

        match self.shares.create(text, file_refs.clone(), options).await {
            Ok(record) => Ok(record),
            Err(e) => {
                self.discard(&file_refs).await;
                Err(e)
            }
        }
    }

    /// Redeem a code and describe its content. Blob bytes are not read.
    pub async fn receive_share(&self, code: &str) -> AppResult<ReceivedShare> {
        let record = self.shares.redeem(code).await?;

        let mut files = Vec::with_capacity(record.file_refs.len());
        for id in &record.file_refs {
            let filename = match self.blobs.metadata(id).await {
                Ok(Some(meta)) => meta.filename,
                Ok(None) => BlobMeta::placeholder_name(id),
                Err(e) => {
                    warn!(blob_id = %id, error = %e, "Blob metadata lookup failed");
                    BlobMeta::placeholder_name(id)
                }
            };
            files.push(ReceivedFile {
                blob_id: *id,
                filename,
                url: file_url(id),
            });
        }

        Ok(ReceivedShare {
            text: record.payload_text.clone(),
            files,
            remaining_receivers: record.remaining_receivers(),
        })
    }

    /// Open a blob for download. Malformed or unknown ids fail with `NotFound`.
    pub async fn fetch_blob(&self, id: &str) -> AppResult<BlobDownload> {
        let id: BlobId = id
            .parse()
            .map_err(|_| AppError::not_found("File not found"))?;

        let meta = self
            .blobs
            .metadata(&id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        let stream = self.blobs.open(&id).await?;

        info!(blob_id = %id, filename = %meta.filename, "Serving blob");
        Ok(BlobDownload { meta, stream })
    }

    async fn discard(&self, ids: &[BlobId]) {
        for id in ids {
            if let Err(e) = self.blobs.delete(id).await {
                warn!(blob_id = %id, error = %e, "Failed to delete blob of aborted send");
            }
        }
    }
}

/// Retrieval path for a blob.
pub fn file_url(id: &BlobId) -> String {
    format!("/api/file/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use clipvault_core::config::ShareConfig;
    use clipvault_core::error::ErrorKind;
    use clipvault_core::traits::storage::bytes_stream;
    use clipvault_database::{MemoryShareStore, ShareStore};
    use clipvault_storage::{BlobBucket, LocalStorageProvider};
    use futures::StreamExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::share::CodeRegistry;

    fn shares(store: Arc<dyn ShareStore>) -> Arc<ShareLifecycle> {
        Arc::new(ShareLifecycle::new(store.clone(), CodeRegistry::new(store, 0), 5))
    }

    async fn local_bucket(dir: &tempfile::TempDir) -> Arc<BlobBucket> {
        let provider = LocalStorageProvider::new(dir.path()).await.unwrap();
        Arc::new(BlobBucket::new(Arc::new(provider), "uploads"))
    }

    fn file(name: &str, body: &'static [u8]) -> IncomingFile {
        IncomingFile {
            filename: name.to_string(),
            content_type: Some("text/plain".to_string()),
            body: bytes_stream(Bytes::from_static(body)),
        }
    }

    fn defaults() -> ShareOptions {
        ShareOptions::defaults(&ShareConfig::default())
    }

    #[tokio::test]
    async fn test_send_then_receive_with_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let service = TransferService::new(
            shares(Arc::new(MemoryShareStore::new())),
            local_bucket(&dir).await,
        );

        let record = service
            .send_share(
                Some("notes".into()),
                vec![file("a.txt", b"alpha"), file("b.txt", b"beta")],
                defaults(),
            )
            .await
            .unwrap();

        let received = service.receive_share(&record.code).await.unwrap();
        assert_eq!(received.text.as_deref(), Some("notes"));
        assert_eq!(received.remaining_receivers, 0);
        let names: Vec<_> = received.files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
        assert_eq!(received.files[0].blob_id, record.file_refs[0]);
        assert_eq!(
            received.files[1].url,
            format!("/api/file/{}", record.file_refs[1])
        );
    }

    #[tokio::test]
    async fn test_send_requires_content() {
        let dir = tempfile::tempdir().unwrap();
        let service = TransferService::new(
            shares(Arc::new(MemoryShareStore::new())),
            local_bucket(&dir).await,
        );

        for text in [None, Some(String::new()), Some("  \n".to_string())] {
            let err = service
                .send_share(text, Vec::new(), defaults())
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
    }

    #[tokio::test]
    async fn test_files_only_share() {
        let dir = tempfile::tempdir().unwrap();
        let service = TransferService::new(
            shares(Arc::new(MemoryShareStore::new())),
            local_bucket(&dir).await,
        );

        let record = service
            .send_share(Some("   ".into()), vec![file("only.bin", b"\x00\x01")], defaults())
            .await
            .unwrap();
        assert!(record.payload_text.is_none());
        assert_eq!(record.file_refs.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_blob() {
        let dir = tempfile::tempdir().unwrap();
        let service = TransferService::new(
            shares(Arc::new(MemoryShareStore::new())),
            local_bucket(&dir).await,
        );
        let record = service
            .send_share(None, vec![file("hello.txt", b"hello")], defaults())
            .await
            .unwrap();

        let download = service
            .fetch_blob(&record.file_refs[0].to_string())
            .await
            .unwrap();
        assert_eq!(download.meta.filename, "hello.txt");
        let mut stream = download.stream;
        let mut body = Vec::new();
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(body, b"hello");

        for id in ["not-a-uuid".to_string(), BlobId::new().to_string()] {
            let err = service.fetch_blob(&id).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::NotFound);
        }
    }

    #[tokio::test]
    async fn test_missing_metadata_falls_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn ShareStore> = Arc::new(MemoryShareStore::new());
        let service = TransferService::new(shares(store.clone()), local_bucket(&dir).await);

        let ghost = BlobId::new();
        let record = shares(store)
            .create(None, vec![ghost], defaults())
            .await
            .unwrap();

        let received = service.receive_share(&record.code).await.unwrap();
        assert_eq!(received.files[0].filename, format!("file-{ghost}"));
    }

    /// Accepts a fixed number of uploads, then fails; records deletions.
    #[derive(Debug, Default)]
    struct FlakyBlobs {
        accept: usize,
        stored: AtomicUsize,
        deleted: AtomicUsize,
    }

    #[async_trait]
    impl BlobStore for FlakyBlobs {
        async fn put(
            &self,
            filename: &str,
            content_type: Option<&str>,
            _stream: ByteStream,
        ) -> AppResult<BlobMeta> {
            if self.stored.load(Ordering::SeqCst) >= self.accept {
                return Err(AppError::store_unavailable("disk full"));
            }
            self.stored.fetch_add(1, Ordering::SeqCst);
            Ok(BlobMeta {
                id: BlobId::new(),
                filename: filename.to_string(),
                content_type: content_type.map(str::to_string),
                size_bytes: 0,
                uploaded_at: chrono::Utc::now(),
            })
        }
        async fn open(&self, id: &BlobId) -> AppResult<ByteStream> {
            Err(AppError::not_found(format!("Blob {id} not found")))
        }
        async fn metadata(&self, _id: &BlobId) -> AppResult<Option<BlobMeta>> {
            Ok(None)
        }
        async fn delete(&self, _id: &BlobId) -> AppResult<()> {
            self.deleted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_failed_upload_discards_earlier_blobs() {
        let store = Arc::new(MemoryShareStore::new());
        let blobs = Arc::new(FlakyBlobs {
            accept: 2,
            ..Default::default()
        });
        let service = TransferService::new(shares(store.clone()), blobs.clone());

        let err = service
            .send_share(
                None,
                vec![file("1", b"1"), file("2", b"2"), file("3", b"3")],
                defaults(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::StoreUnavailable);
        assert_eq!(blobs.deleted.load(Ordering::SeqCst), 2);
        assert!(store.is_empty());
    }
}
