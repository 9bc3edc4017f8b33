//! Cron scheduler for periodic background tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use clipvault_core::error::AppError;

use crate::executor::JobHandler;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler })
    }

    /// Run `handler` on the given cron schedule (seconds field first).
    ///
    /// Failures are logged; the next tick runs the handler again.
    pub async fn register(
        &self,
        handler: Arc<dyn JobHandler>,
        schedule: &str,
    ) -> Result<(), AppError> {
        let job_type = handler.job_type().to_string();
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let handler = Arc::clone(&handler);
            Box::pin(async move {
                tracing::debug!(job = handler.job_type(), "Running scheduled job");
                match handler.execute().await {
                    Ok(summary) => {
                        tracing::debug!(job = handler.job_type(), %summary, "Scheduled job finished");
                    }
                    Err(e) => {
                        tracing::error!(
                            job = handler.job_type(),
                            transient = e.is_transient(),
                            "Scheduled job failed: {e}"
                        );
                    }
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!("Invalid schedule '{schedule}' for {job_type}: {e}"))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add {job_type} schedule: {e}")))?;

        tracing::info!(job = %job_type, schedule, "Registered scheduled job");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;

    use crate::executor::JobExecutionError;

    #[derive(Debug)]
    struct Noop;

    #[async_trait]
    impl JobHandler for Noop {
        fn job_type(&self) -> &str {
            "noop"
        }

        async fn execute(&self) -> Result<Value, JobExecutionError> {
            Ok(Value::Null)
        }
    }

    #[tokio::test]
    async fn test_rejects_invalid_schedule() {
        let scheduler = CronScheduler::new().await.unwrap();
        let err = scheduler
            .register(Arc::new(Noop), "every now and then")
            .await
            .unwrap_err();
        assert_eq!(err.kind, clipvault_core::error::ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_register_valid_schedule() {
        let scheduler = CronScheduler::new().await.unwrap();
        scheduler
            .register(Arc::new(Noop), "0 * * * * *")
            .await
            .unwrap();
    }
}
