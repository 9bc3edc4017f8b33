//! # clipvault-database
//!
//! Share record storage for ClipVault: the [`ShareStore`] trait, a
//! PostgreSQL implementation with migrations, and an in-memory
//! implementation for development and tests.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::{MemoryShareStore, ShareRepository};
pub use store::{ShareStore, open_share_store};
