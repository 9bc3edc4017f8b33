//! Share creation policy.

use serde::{Deserialize, Serialize};

/// Largest accepted value for either expiry setting: one year.
pub const EXPIRY_CEILING_MINUTES: i64 = 365 * 24 * 60;

/// Defaults and limits applied when a share is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Receiver limit used when none (or a non-positive one) is supplied.
    #[serde(default = "default_max_receivers")]
    pub default_max_receivers: i32,
    /// Expiry used when none (or a non-positive one) is supplied.
    #[serde(default = "default_expiry_minutes")]
    pub default_expiry_minutes: i64,
    /// Hard ceiling on the requested expiry.
    #[serde(default = "default_max_expiry_minutes")]
    pub max_expiry_minutes: i64,
    /// Cap on collision redraws per generated code (0 = unbounded).
    #[serde(default)]
    pub code_max_attempts: u32,
    /// How many times an insert that lost a code race is retried.
    #[serde(default = "default_insert_max_attempts")]
    pub insert_max_attempts: u32,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            default_max_receivers: default_max_receivers(),
            default_expiry_minutes: default_expiry_minutes(),
            max_expiry_minutes: default_max_expiry_minutes(),
            code_max_attempts: 0,
            insert_max_attempts: default_insert_max_attempts(),
        }
    }
}

fn default_max_receivers() -> i32 {
    1
}

fn default_expiry_minutes() -> i64 {
    10
}

fn default_max_expiry_minutes() -> i64 {
    30
}

fn default_insert_max_attempts() -> u32 {
    5
}
