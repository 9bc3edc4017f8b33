//! Database migration command.

use anyhow::Context;

use clipvault_core::config::{AppConfig, StoreProvider};
use clipvault_database::DatabasePool;
use clipvault_database::migration::run_migrations;

use crate::output;

/// Apply all pending migrations
pub async fn execute(config: &AppConfig) -> anyhow::Result<()> {
    if config.database.provider != StoreProvider::Postgres {
        output::print_warning(&format!(
            "database.provider is '{}'; there is nothing to migrate",
            config.database.provider
        ));
        return Ok(());
    }

    let db = DatabasePool::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    println!("Running database migrations...");
    run_migrations(db.pool()).await.context("Migration failed")?;
    db.close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
