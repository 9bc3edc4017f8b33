//! Share record lifecycle: creation and the redemption gate.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use clipvault_core::error::AppError;
use clipvault_core::result::AppResult;
use clipvault_core::types::{BlobId, ShareCode};
use clipvault_database::ShareStore;
use clipvault_entity::share::{NewShareRecord, ShareRecord};

use super::code::CodeRegistry;
use super::params::ShareOptions;

/// Message for codes that are unknown, malformed, expired, or swept.
pub const INVALID_CODE: &str = "Invalid Code";
/// Message for codes whose receiver limit is used up.
pub const CODE_EXPIRED: &str = "Code expired";

/// Creates share records and gates their redemption.
#[derive(Debug, Clone)]
pub struct ShareLifecycle {
    store: Arc<dyn ShareStore>,
    codes: CodeRegistry,
    insert_max_attempts: u32,
}

impl ShareLifecycle {
    /// Creates a new lifecycle service.
    pub fn new(store: Arc<dyn ShareStore>, codes: CodeRegistry, insert_max_attempts: u32) -> Self {
        Self {
            store,
            codes,
            insert_max_attempts: insert_max_attempts.max(1),
        }
    }

    /// Persist a new share under a freshly generated code.
    ///
    /// The caller guarantees there is something to share. If another sender
    /// inserts the same code between generation and insert, a new code is
    /// drawn, up to `insert_max_attempts` times.
    pub async fn create(
        &self,
        text: Option<String>,
        file_refs: Vec<BlobId>,
        options: ShareOptions,
    ) -> AppResult<ShareRecord> {
        let now = Utc::now();
        let expires_at = Duration::try_minutes(options.expiry_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Expiry of {} minutes is out of range",
                    options.expiry_minutes
                ))
            })?;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let code = self.codes.generate().await?;
            let data = NewShareRecord {
                code: code.to_string(),
                payload_text: text.clone(),
                file_refs: file_refs.clone(),
                created_at: now,
                expires_at,
                max_receivers: options.max_receivers,
            };

            match self.store.insert(&data).await {
                Ok(record) => {
                    info!(
                        code = %record.code,
                        files = record.file_refs.len(),
                        max_receivers = record.max_receivers,
                        expires_at = %record.expires_at,
                        "Share created"
                    );
                    return Ok(record);
                }
                Err(e) if e.is_conflict() && attempt < self.insert_max_attempts => {
                    warn!(code = %code, attempt, "Share code taken concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Redeem a code, consuming one receiver slot.
    ///
    /// Returns the record after the increment. Unknown, malformed, and
    /// expired codes fail with `NotFound`; exhausted ones with `LimitReached`.
    pub async fn redeem(&self, code: &str) -> AppResult<ShareRecord> {
        let code = ShareCode::parse(code).map_err(|_| AppError::not_found(INVALID_CODE))?;
        let now = Utc::now();

        if let Some(record) = self.store.claim(code.as_str(), now).await? {
            info!(
                code = %record.code,
                receiver_count = record.receiver_count,
                max_receivers = record.max_receivers,
                "Share redeemed"
            );
            return Ok(record);
        }

        // The claim was refused; look again only to choose the error.
        match self.store.find_by_code(code.as_str()).await? {
            Some(record) if !record.is_expired(now) && record.is_exhausted() => {
                info!(code = %record.code, "Share redemption refused: limit reached");
                Err(AppError::limit_reached(CODE_EXPIRED))
            }
            _ => Err(AppError::not_found(INVALID_CODE)),
        }
    }
}
