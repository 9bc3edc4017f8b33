//! # clipvault-entity
//!
//! Domain entity models for ClipVault. [`share::ShareRecord`] is the one
//! database row the service owns; [`blob::BlobMeta`] is the metadata the
//! blob bucket keeps next to every upload.

pub mod blob;
pub mod share;
