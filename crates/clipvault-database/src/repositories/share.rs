//! PostgreSQL share repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use clipvault_core::error::{AppError, ErrorKind};
use clipvault_core::result::AppResult;
use clipvault_entity::share::{NewShareRecord, ShareRecord};

use crate::connection::DatabasePool;
use crate::store::ShareStore;

/// Share records stored in the `shares` table.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    db: DatabasePool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

/// Map a sqlx error, keeping primary-key violations distinguishable.
fn store_error(context: &str, err: sqlx::Error) -> AppError {
    let conflict = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    let kind = if conflict {
        ErrorKind::Conflict
    } else {
        ErrorKind::StoreUnavailable
    };
    AppError::with_source(kind, context.to_string(), err)
}

#[async_trait]
impl ShareStore for ShareRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }

    async fn code_exists(&self, code: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM shares WHERE code = $1)")
            .bind(code)
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| store_error("Failed to check share code", e))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<ShareRecord>> {
        sqlx::query_as::<_, ShareRecord>("SELECT * FROM shares WHERE code = $1")
            .bind(code)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| store_error("Failed to find share", e))
    }

    async fn insert(&self, data: &NewShareRecord) -> AppResult<ShareRecord> {
        sqlx::query_as::<_, ShareRecord>(
            "INSERT INTO shares (code, payload_text, file_refs, created_at, expires_at, max_receivers) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.code)
        .bind(&data.payload_text)
        .bind(&data.file_refs)
        .bind(data.created_at)
        .bind(data.expires_at)
        .bind(data.max_receivers)
        .fetch_one(self.db.pool())
        .await
        .map_err(|e| store_error("Failed to create share", e))
    }

    async fn claim(&self, code: &str, now: DateTime<Utc>) -> AppResult<Option<ShareRecord>> {
        sqlx::query_as::<_, ShareRecord>(
            "UPDATE shares SET receiver_count = receiver_count + 1 \
             WHERE code = $1 AND receiver_count < max_receivers AND expires_at >= $2 \
             RETURNING *",
        )
        .bind(code)
        .bind(now)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| store_error("Failed to claim share", e))
    }

    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<ShareRecord>> {
        sqlx::query_as::<_, ShareRecord>("DELETE FROM shares WHERE expires_at <= $1 RETURNING *")
            .bind(cutoff)
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| store_error("Failed to purge expired shares", e))
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
