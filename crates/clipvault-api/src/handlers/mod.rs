//! HTTP request handlers.

pub mod blob;
pub mod health;
pub mod transfer;
