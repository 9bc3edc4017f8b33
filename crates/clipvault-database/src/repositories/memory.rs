//! In-memory share store backed by `dashmap`.
//!
//! Intended for development and tests. The map's per-shard write lock makes
//! `insert` and `claim` atomic per code, which is all the gate needs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use clipvault_core::error::AppError;
use clipvault_core::result::AppResult;
use clipvault_entity::share::{NewShareRecord, ShareRecord};

use crate::store::ShareStore;

/// Share records held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryShareStore {
    records: Arc<DashMap<String, ShareRecord>>,
}

impl MemoryShareStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn code_exists(&self, code: &str) -> AppResult<bool> {
        Ok(self.records.contains_key(code))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<ShareRecord>> {
        Ok(self.records.get(code).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, data: &NewShareRecord) -> AppResult<ShareRecord> {
        match self.records.entry(data.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Share code {} is already in use",
                data.code
            ))),
            Entry::Vacant(slot) => {
                let record = data.clone().into_record();
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn claim(&self, code: &str, now: DateTime<Utc>) -> AppResult<Option<ShareRecord>> {
        let Some(mut entry) = self.records.get_mut(code) else {
            return Ok(None);
        };
        let record = entry.value_mut();
        if record.is_expired(now) || record.is_exhausted() {
            return Ok(None);
        }
        record.receiver_count += 1;
        Ok(Some(record.clone()))
    }

    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<ShareRecord>> {
        let mut removed = Vec::new();
        self.records.retain(|_, record| {
            if record.expires_at <= cutoff {
                removed.push(record.clone());
                false
            } else {
                true
            }
        });
        debug!(count = removed.len(), "Purged expired in-memory shares");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use clipvault_core::error::ErrorKind;

    fn new_record(code: &str, max_receivers: i32, ttl_minutes: i64) -> NewShareRecord {
        let now = Utc::now();
        NewShareRecord {
            code: code.to_string(),
            payload_text: Some("hello".to_string()),
            file_refs: Vec::new(),
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
            max_receivers,
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_code() {
        let store = MemoryShareStore::new();
        store.insert(&new_record("4821", 1, 10)).await.unwrap();

        let err = store.insert(&new_record("4821", 3, 10)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let kept = store.find_by_code("4821").await.unwrap().unwrap();
        assert_eq!(kept.max_receivers, 1);
    }

    #[tokio::test]
    async fn test_claim_stops_at_limit() {
        let store = MemoryShareStore::new();
        store.insert(&new_record("1234", 2, 10)).await.unwrap();
        let now = Utc::now();

        assert_eq!(store.claim("1234", now).await.unwrap().unwrap().receiver_count, 1);
        assert_eq!(store.claim("1234", now).await.unwrap().unwrap().receiver_count, 2);
        assert!(store.claim("1234", now).await.unwrap().is_none());

        let record = store.find_by_code("1234").await.unwrap().unwrap();
        assert_eq!(record.receiver_count, 2);
    }

    #[tokio::test]
    async fn test_claim_refuses_expired_record() {
        let store = MemoryShareStore::new();
        store.insert(&new_record("5555", 5, 10)).await.unwrap();

        let later = Utc::now() + Duration::minutes(11);
        assert!(store.claim("5555", later).await.unwrap().is_none());
        let record = store.find_by_code("5555").await.unwrap().unwrap();
        assert_eq!(record.receiver_count, 0);
    }

    #[tokio::test]
    async fn test_claim_unknown_code() {
        let store = MemoryShareStore::new();
        assert!(store.claim("9999", Utc::now()).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_never_exceed_limit() {
        let store = MemoryShareStore::new();
        store.insert(&new_record("7777", 3, 10)).await.unwrap();
        let now = Utc::now();

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.claim("7777", now).await.unwrap().is_some() })
            })
            .collect();

        let mut admitted = 0;
        for task in futures::future::join_all(tasks).await {
            if task.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 3);
        let record = store.find_by_code("7777").await.unwrap().unwrap();
        assert_eq!(record.receiver_count, 3);
    }

    #[tokio::test]
    async fn test_purge_expired_returns_removed_records() {
        let store = MemoryShareStore::new();
        store.insert(&new_record("1111", 1, 1)).await.unwrap();
        store.insert(&new_record("2222", 1, 30)).await.unwrap();

        let cutoff = Utc::now() + Duration::minutes(5);
        let removed = store.purge_expired(cutoff).await.unwrap();

        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].code, "1111");
        assert!(!store.code_exists("1111").await.unwrap());
        assert!(store.code_exists("2222").await.unwrap());
        assert_eq!(store.len(), 1);
    }
}
