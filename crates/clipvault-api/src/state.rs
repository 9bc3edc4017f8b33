//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use clipvault_core::config::AppConfig;
use clipvault_database::ShareStore;
use clipvault_service::{CodeRegistry, ShareLifecycle, TransferService};
use clipvault_storage::BlobStore;

/// Shared application state passed to all Axum handlers via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Send/receive/download orchestration.
    pub transfer_service: Arc<TransferService>,
    /// Share record store (for health checks).
    pub share_store: Arc<dyn ShareStore>,
    /// Blob store (for health checks).
    pub blob_store: Arc<dyn BlobStore>,
    /// When the process started serving.
    pub started_at: Instant,
}

impl AppState {
    /// Wire the services on top of the given stores.
    pub fn new(
        config: Arc<AppConfig>,
        share_store: Arc<dyn ShareStore>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        let codes = CodeRegistry::new(Arc::clone(&share_store), config.share.code_max_attempts);
        let shares = Arc::new(ShareLifecycle::new(
            Arc::clone(&share_store),
            codes,
            config.share.insert_max_attempts,
        ));
        let transfer_service = Arc::new(TransferService::new(shares, Arc::clone(&blob_store)));

        Self {
            config,
            transfer_service,
            share_store,
            blob_store,
            started_at: Instant::now(),
        }
    }
}
