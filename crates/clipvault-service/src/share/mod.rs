//! Share codes, creation-time normalization, and the redemption gate.

pub mod code;
pub mod lifecycle;
pub mod params;

pub use code::CodeRegistry;
pub use lifecycle::ShareLifecycle;
pub use params::ShareOptions;
