//! # clipvault-storage
//!
//! Blob storage for ClipVault. A [`StorageProvider`] moves raw bytes; the
//! [`BlobBucket`] on top of it hands out blob ids and keeps per-blob
//! metadata so downloads can be served under their original filename.
//!
//! [`StorageProvider`]: clipvault_core::traits::StorageProvider

pub mod blob;
pub mod providers;

pub use blob::{BlobBucket, BlobStore, open_blob_store};
pub use providers::LocalStorageProvider;
