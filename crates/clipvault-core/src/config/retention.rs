//! Retention sweep configuration.

use serde::{Deserialize, Serialize};

/// Background removal of expired share records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Whether the sweep is scheduled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// How long a record lingers past its `expires_at` before it is removed.
    #[serde(default = "default_sweep_after")]
    pub sweep_after_seconds: u64,
    /// Cron expression (with seconds field) for the sweep.
    #[serde(default = "default_schedule")]
    pub schedule: String,
    /// Delete the blobs referenced by swept records.
    #[serde(default = "default_true")]
    pub delete_blobs: bool,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_after_seconds: default_sweep_after(),
            schedule: default_schedule(),
            delete_blobs: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_after() -> u64 {
    600
}

fn default_schedule() -> String {
    "0 * * * * *".to_string()
}
