//! # clipvault-core
//!
//! Core crate for ClipVault. Contains the storage provider trait,
//! configuration schemas, typed identifiers (share codes and blob ids),
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other ClipVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
