//! One-shot retention sweep.

use anyhow::Context;
use chrono::Utc;
use clap::Args;

use clipvault_core::config::AppConfig;
use clipvault_database::open_share_store;
use clipvault_storage::open_blob_store;
use clipvault_worker::RetentionSweeper;

use crate::output::{self, OutputFormat};

/// Arguments for the sweep command
#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Override `retention.sweep_after_seconds`
    #[arg(long)]
    pub after_seconds: Option<u64>,

    /// Keep the blobs of swept records
    #[arg(long)]
    pub keep_blobs: bool,
}

/// Remove expired records now instead of waiting for the scheduler
pub async fn execute(
    args: &SweepArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut retention = config.retention.clone();
    if let Some(seconds) = args.after_seconds {
        retention.sweep_after_seconds = seconds;
    }
    if args.keep_blobs {
        retention.delete_blobs = false;
    }

    let store = open_share_store(&config.database, false)
        .await
        .context("Failed to open share store")?;
    let blobs = open_blob_store(&config.storage)
        .await
        .context("Failed to open blob store")?;

    let sweeper = RetentionSweeper::new(store.clone(), blobs, &retention);
    let report = sweeper.run_once(Utc::now()).await;
    store.close().await;
    let report = report.context("Retention sweep failed")?;

    match format {
        OutputFormat::Json => output::print_item(&report, format),
        OutputFormat::Table => {
            output::print_success("Retention sweep complete");
            output::print_kv("Records removed", &report.records_removed.to_string());
            output::print_kv("Blobs removed", &report.blobs_removed.to_string());
            if report.blob_failures > 0 {
                output::print_warning(&format!(
                    "{} blob(s) could not be deleted",
                    report.blob_failures
                ));
            }
        }
    }
    Ok(())
}
