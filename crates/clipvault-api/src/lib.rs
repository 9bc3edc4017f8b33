//! # clipvault-api
//!
//! HTTP API layer for ClipVault built on Axum.
//!
//! Provides the send/receive/download endpoints, a health check, optional
//! static file serving, middleware (CORS, access logging, body limit,
//! timeout), DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
