//! Share store backends.

pub mod memory;
pub mod share;

pub use memory::MemoryShareStore;
pub use share::ShareRepository;
