//! Retention sweep: removes share records once they are past expiry plus
//! the configured horizon, together with the blobs they referenced.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing;

use clipvault_core::config::RetentionConfig;
use clipvault_core::error::AppError;
use clipvault_database::ShareStore;
use clipvault_storage::BlobStore;

use crate::executor::{JobExecutionError, JobHandler};

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Records removed from the store.
    pub records_removed: usize,
    /// Blobs deleted.
    pub blobs_removed: usize,
    /// Blobs whose deletion failed (left for manual cleanup).
    pub blob_failures: usize,
}

/// Handles the periodic retention sweep
#[derive(Debug)]
pub struct RetentionSweeper {
    /// Share record store
    store: Arc<dyn ShareStore>,
    /// Blob store; `None` leaves blobs in place
    blobs: Option<Arc<dyn BlobStore>>,
    /// How long past `expires_at` a record survives
    horizon: Duration,
}

impl RetentionSweeper {
    /// Create a sweeper from the retention settings
    pub fn new(
        store: Arc<dyn ShareStore>,
        blobs: Arc<dyn BlobStore>,
        config: &RetentionConfig,
    ) -> Self {
        let horizon = i64::try_from(config.sweep_after_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self {
            store,
            blobs: config.delete_blobs.then_some(blobs),
            horizon,
        }
    }

    /// Remove every record with `expires_at + horizon <= now`
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<SweepReport, AppError> {
        let cutoff = now.checked_sub_signed(self.horizon).unwrap_or(DateTime::<Utc>::MIN_UTC);
        let removed = self.store.purge_expired(cutoff).await?;

        let mut report = SweepReport {
            records_removed: removed.len(),
            ..SweepReport::default()
        };

        if let Some(blobs) = &self.blobs {
            for id in removed.iter().flat_map(|record| record.file_refs.iter()) {
                match blobs.delete(id).await {
                    Ok(()) => report.blobs_removed += 1,
                    Err(e) => {
                        tracing::warn!(blob_id = %id, error = %e, "Failed to delete swept blob");
                        report.blob_failures += 1;
                    }
                }
            }
        }

        if report.records_removed > 0 {
            tracing::info!(
                records = report.records_removed,
                blobs = report.blobs_removed,
                blob_failures = report.blob_failures,
                %cutoff,
                "Retention sweep removed expired shares"
            );
        } else {
            tracing::debug!(%cutoff, "Retention sweep found nothing to remove");
        }

        Ok(report)
    }
}

#[async_trait]
impl JobHandler for RetentionSweeper {
    fn job_type(&self) -> &str {
        "retention_sweep"
    }

    async fn execute(&self) -> Result<Value, JobExecutionError> {
        let report = self.run_once(Utc::now()).await?;
        Ok(serde_json::json!({
            "task": "retention_sweep",
            "records_removed": report.records_removed,
            "blobs_removed": report.blobs_removed,
            "blob_failures": report.blob_failures,
        }))
    }
}
