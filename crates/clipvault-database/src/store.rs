//! The record store seam.
//!
//! Everything above this crate talks to share records through
//! [`ShareStore`]; the concrete backend is chosen once at startup by
//! [`open_share_store`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use clipvault_core::config::{DatabaseConfig, StoreProvider};
use clipvault_core::result::AppResult;
use clipvault_entity::share::{NewShareRecord, ShareRecord};

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::{MemoryShareStore, ShareRepository};

/// Persistent collection of share records keyed by code.
#[async_trait]
pub trait ShareStore: Send + Sync + fmt::Debug + 'static {
    /// Short backend name used in logs and health output.
    fn backend(&self) -> &'static str;

    /// Check that the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Whether a record with this code currently exists, expired or not.
    async fn code_exists(&self, code: &str) -> AppResult<bool>;

    /// Look up a record by code without touching its counter.
    async fn find_by_code(&self, code: &str) -> AppResult<Option<ShareRecord>>;

    /// Persist a new record with `receiver_count = 0`.
    ///
    /// Fails with `Conflict` if a record with the same code already exists.
    async fn insert(&self, data: &NewShareRecord) -> AppResult<ShareRecord>;

    /// Atomically increment `receiver_count` if the record exists, has not
    /// expired at `now`, and still has remaining receivers.
    ///
    /// Returns the post-increment record, or `None` when any condition fails.
    async fn claim(&self, code: &str, now: DateTime<Utc>) -> AppResult<Option<ShareRecord>>;

    /// Remove every record with `expires_at <= cutoff` and return them.
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<ShareRecord>>;

    /// Release backend resources.
    async fn close(&self) {}
}

/// Build the configured share store.
///
/// For PostgreSQL this connects the pool and, when `migrate` is set, applies
/// pending migrations before returning.
pub async fn open_share_store(
    config: &DatabaseConfig,
    migrate: bool,
) -> AppResult<Arc<dyn ShareStore>> {
    match config.provider {
        StoreProvider::Postgres => {
            let db = DatabasePool::connect(config).await?;
            if migrate {
                run_migrations(db.pool()).await?;
            }
            Ok(Arc::new(ShareRepository::new(db)))
        }
        StoreProvider::Memory => {
            info!("Using in-memory share store; records are lost on restart");
            Ok(Arc::new(MemoryShareStore::new()))
        }
    }
}
