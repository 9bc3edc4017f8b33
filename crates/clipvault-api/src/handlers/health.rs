//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ComponentHealth, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store_ok = state.share_store.health_check().await.unwrap_or(false);
    let blobs_ok = state.blob_store.health_check().await.unwrap_or(false);

    let (status, label) = if store_ok && blobs_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            store: ComponentHealth {
                backend: state.share_store.backend().to_string(),
                healthy: store_ok,
            },
            blobs: ComponentHealth {
                backend: state.blob_store.backend().to_string(),
                healthy: blobs_ok,
            },
        }),
    )
}
