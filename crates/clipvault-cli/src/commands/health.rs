//! Store health check command.

use serde::Serialize;
use tabled::Tabled;

use clipvault_core::config::AppConfig;
use clipvault_database::open_share_store;
use clipvault_storage::open_blob_store;

use crate::output::{self, OutputFormat};

/// One row of the health table
#[derive(Debug, Serialize, Tabled)]
struct ComponentRow {
    /// Component name
    component: String,
    /// Backend in use
    backend: String,
    /// Check result
    status: String,
}

impl ComponentRow {
    fn new(component: &str, backend: &str, result: Result<bool, String>) -> Self {
        let status = match result {
            Ok(true) => "healthy".to_string(),
            Ok(false) => "unhealthy".to_string(),
            Err(e) => format!("error: {e}"),
        };
        Self {
            component: component.to_string(),
            backend: backend.to_string(),
            status,
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Check both stores and print the result
pub async fn execute(config: &AppConfig, format: OutputFormat) -> anyhow::Result<()> {
    let mut rows = Vec::with_capacity(2);

    match open_share_store(&config.database, false).await {
        Ok(store) => {
            let result = store.health_check().await.map_err(|e| e.to_string());
            rows.push(ComponentRow::new("records", store.backend(), result));
            store.close().await;
        }
        Err(e) => rows.push(ComponentRow::new(
            "records",
            &config.database.provider.to_string(),
            Err(e.to_string()),
        )),
    }

    match open_blob_store(&config.storage).await {
        Ok(blobs) => {
            let result = blobs.health_check().await.map_err(|e| e.to_string());
            rows.push(ComponentRow::new("blobs", blobs.backend(), result));
        }
        Err(e) => rows.push(ComponentRow::new("blobs", "local", Err(e.to_string()))),
    }

    output::print_list(&rows, format);

    if rows.iter().all(ComponentRow::is_healthy) {
        Ok(())
    } else {
        anyhow::bail!("one or more components are unhealthy")
    }
}
