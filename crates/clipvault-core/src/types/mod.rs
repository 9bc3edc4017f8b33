//! Core type definitions used across the ClipVault workspace.

pub mod code;
pub mod id;

pub use code::ShareCode;
pub use id::BlobId;
