//! Send, receive, and download orchestration.

pub mod service;

pub use service::{BlobDownload, IncomingFile, ReceivedFile, ReceivedShare, TransferService};
