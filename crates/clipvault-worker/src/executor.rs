//! Job handler contract.

use async_trait::async_trait;
use serde_json::Value;

use clipvault_core::error::{AppError, ErrorKind};

/// Trait for job handler implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Get the job type this handler processes
    fn job_type(&self) -> &str;

    /// Run the job once and return a summary
    async fn execute(&self) -> Result<Value, JobExecutionError>;
}

/// Error from job execution
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// Permanent failure; retrying will not help
    #[error("Permanent job failure: {0}")]
    Permanent(String),

    /// Transient failure; the next scheduled run may succeed
    #[error("Transient job failure: {0}")]
    Transient(String),
}

impl From<AppError> for JobExecutionError {
    /// Store outages are transient; every other kind is permanent.
    fn from(err: AppError) -> Self {
        match err.kind {
            ErrorKind::StoreUnavailable => Self::Transient(err.to_string()),
            _ => Self::Permanent(err.to_string()),
        }
    }
}

impl JobExecutionError {
    /// Whether a later run may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_outage_is_transient() {
        let err = JobExecutionError::from(AppError::store_unavailable("pool timed out"));
        assert!(err.is_transient());
        assert!(err.to_string().contains("pool timed out"));
    }

    #[test]
    fn test_other_failures_are_permanent() {
        let err = JobExecutionError::from(AppError::configuration("bad horizon"));
        assert!(matches!(err, JobExecutionError::Permanent(_)));
        assert!(!err.is_transient());
    }
}
