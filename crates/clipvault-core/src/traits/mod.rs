//! Core traits defined in `clipvault-core` and implemented by other crates.

pub mod storage;

pub use storage::{ByteStream, StorageProvider, bytes_stream};
