//! Share code generation.

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use clipvault_core::error::AppError;
use clipvault_core::result::AppResult;
use clipvault_core::types::ShareCode;
use clipvault_core::types::code::{MAX_CODE, MIN_CODE};
use clipvault_database::ShareStore;

/// Draws four-digit codes that no stored record currently uses.
#[derive(Debug, Clone)]
pub struct CodeRegistry {
    store: Arc<dyn ShareStore>,
    /// Redraw cap; 0 means keep drawing until a free code turns up.
    max_attempts: u32,
}

impl CodeRegistry {
    /// Creates a new code registry.
    pub fn new(store: Arc<dyn ShareStore>, max_attempts: u32) -> Self {
        Self {
            store,
            max_attempts,
        }
    }

    /// Generate a code that is free at the time of the check.
    ///
    /// Store failures are returned immediately. Another sender can still take
    /// the same code before it is inserted; the store's uniqueness guard and
    /// [`ShareLifecycle`](super::ShareLifecycle) handle that case.
    pub async fn generate(&self) -> AppResult<ShareCode> {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let code = ShareCode::from_number(rand::rng().random_range(MIN_CODE..=MAX_CODE))?;
            if !self.store.code_exists(code.as_str()).await? {
                debug!(code = %code, attempts, "Generated share code");
                return Ok(code);
            }
            if self.max_attempts != 0 && attempts >= self.max_attempts {
                return Err(AppError::conflict(format!(
                    "No free share code found after {attempts} attempts"
                )));
            }
        }
    }
}
