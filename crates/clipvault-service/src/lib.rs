//! # clipvault-service
//!
//! Business logic for ClipVault. The share module owns code generation and
//! the redemption gate; the transfer module combines it with the blob store
//! to implement send, receive, and download.
//!
//! Services follow constructor injection: all collaborators are handed in
//! as `Arc` references at construction time.

pub mod share;
pub mod transfer;

pub use share::{CodeRegistry, ShareLifecycle, ShareOptions};
pub use transfer::{BlobDownload, IncomingFile, ReceivedFile, ReceivedShare, TransferService};
