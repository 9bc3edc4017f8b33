//! Route definitions for the ClipVault HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router and attach the state.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(transfer_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Send, receive, and download
fn transfer_routes() -> Router<AppState> {
    Router::new()
        .route("/send", post(handlers::transfer::send))
        .route("/receive/{code}", get(handlers::transfer::receive))
        .route("/file/{id}", get(handlers::blob::download))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
