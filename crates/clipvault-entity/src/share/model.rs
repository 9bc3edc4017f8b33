//! Share record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clipvault_core::types::BlobId;

/// One send operation: its text, its blob references, and its gate state.
///
/// Everything except `receiver_count` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ShareRecord {
    /// Four-digit share code (primary key).
    pub code: String,
    /// Inline text, if the sender included any.
    pub payload_text: Option<String>,
    /// Blob ids in upload order.
    pub file_refs: Vec<BlobId>,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// When the share stops being redeemable.
    pub expires_at: DateTime<Utc>,
    /// How many redemptions are allowed.
    pub max_receivers: i32,
    /// How many redemptions have passed the gate.
    pub receiver_count: i32,
}

impl ShareRecord {
    /// Whether `now` is past the record's expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether every allowed redemption has been used.
    pub fn is_exhausted(&self) -> bool {
        self.receiver_count >= self.max_receivers
    }

    /// Redemptions still available (never negative).
    pub fn remaining_receivers(&self) -> i32 {
        (self.max_receivers - self.receiver_count).max(0)
    }
}

/// Data required to insert a new share record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShareRecord {
    /// Generated share code.
    pub code: String,
    /// Inline text.
    pub payload_text: Option<String>,
    /// Blob ids in upload order.
    pub file_refs: Vec<BlobId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
    /// Redemption limit.
    pub max_receivers: i32,
}

impl NewShareRecord {
    /// The record as stored, before any redemption.
    pub fn into_record(self) -> ShareRecord {
        ShareRecord {
            code: self.code,
            payload_text: self.payload_text,
            file_refs: self.file_refs,
            created_at: self.created_at,
            expires_at: self.expires_at,
            max_receivers: self.max_receivers,
            receiver_count: 0,
        }
    }
}
