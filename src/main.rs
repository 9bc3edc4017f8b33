//! ClipVault server: ephemeral text and file sharing by four-digit code.
//!
//! Main entry point that wires the stores, services and HTTP router together.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use clipvault_core::config::AppConfig;
use clipvault_core::error::AppError;
use clipvault_worker::{CronScheduler, RetentionSweeper};

#[tokio::main]
async fn main() {
    let env = std::env::var("CLIPVAULT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration (env: {env}): {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ClipVault v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Data directories ─────────────────────────────────
    create_data_directories(&config).await?;

    // ── Step 2: Record store (+ migrations) ──────────────────────
    tracing::info!(
        "Opening share store (provider: {})...",
        config.database.provider
    );
    let share_store = clipvault_database::open_share_store(&config.database, true).await?;

    // ── Step 3: Blob store ───────────────────────────────────────
    let blob_store = clipvault_storage::open_blob_store(&config.storage).await?;

    // ── Step 4: Services and state ───────────────────────────────
    let config = Arc::new(config);
    let app_state = clipvault_api::AppState::new(
        Arc::clone(&config),
        Arc::clone(&share_store),
        Arc::clone(&blob_store),
    );

    // ── Step 5: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    // ── Step 6: Retention sweep ──────────────────────────────────
    let scheduler = if config.retention.enabled {
        let scheduler = CronScheduler::new().await?;
        let sweeper = RetentionSweeper::new(
            Arc::clone(&share_store),
            Arc::clone(&blob_store),
            &config.retention,
        );
        scheduler
            .register(Arc::new(sweeper), &config.retention.schedule)
            .await?;
        scheduler.start().await?;
        tracing::info!(
            sweep_after_seconds = config.retention.sweep_after_seconds,
            "Retention sweep scheduled"
        );
        Some(scheduler)
    } else {
        tracing::info!("Retention sweep disabled");
        None
    };

    // ── Step 7: HTTP server ──────────────────────────────────────
    let app = clipvault_api::build_app(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ClipVault server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.changed().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });
    let server = tokio::spawn(async move { server.await });

    shutdown_signal().await;
    let _ = shutdown_tx.send(true);

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    match tokio::time::timeout(grace, server).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => tracing::error!("Server error during shutdown: {}", e),
        Ok(Err(e)) => tracing::error!("Server task failed: {}", e),
        Err(_) => tracing::warn!(
            grace_seconds = config.server.shutdown_grace_seconds,
            "Graceful shutdown timed out; dropping open connections"
        ),
    }

    // ── Step 8: Stop background work and close stores ────────────
    if let Some(scheduler) = scheduler {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("Scheduler shutdown failed: {}", e);
        }
    }
    share_store.close().await;

    tracing::info!("ClipVault server shut down gracefully");
    Ok(())
}

/// Create required data directories
async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    let dirs = [
        config.storage.data_root.clone(),
        config.storage.local.root_path.clone(),
    ];

    for dir in &dirs {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir '{dir}': {e}")))?;
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
