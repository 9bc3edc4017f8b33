//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod database;
pub mod logging;
pub mod retention;
pub mod share;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;
pub use self::retention::RetentionConfig;
pub use self::share::{EXPIRY_CEILING_MINUTES, ShareConfig};
pub use self::storage::{LocalStorageConfig, StorageConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Blob storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Share creation policy.
    #[serde(default)]
    pub share: ShareConfig,
    /// Retention sweep settings.
    #[serde(default)]
    pub retention: RetentionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files under `config/`.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `CLIPVAULT_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from TOML files under `dir`.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CLIPVAULT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that would only fail later at startup.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.provider == StoreProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.provider = \"postgres\"",
            ));
        }
        if self.share.default_max_receivers < 1 {
            return Err(AppError::configuration(
                "share.default_max_receivers must be at least 1",
            ));
        }
        if self.share.max_expiry_minutes < 1 {
            return Err(AppError::configuration(
                "share.max_expiry_minutes must be at least 1",
            ));
        }
        if self.share.default_expiry_minutes < 1 {
            return Err(AppError::configuration(
                "share.default_expiry_minutes must be at least 1",
            ));
        }
        if self.share.max_expiry_minutes > EXPIRY_CEILING_MINUTES
            || self.share.default_expiry_minutes > EXPIRY_CEILING_MINUTES
        {
            return Err(AppError::configuration(format!(
                "share expiry settings must not exceed {EXPIRY_CEILING_MINUTES} minutes"
            )));
        }
        if self.share.insert_max_attempts == 0 {
            return Err(AppError::configuration(
                "share.insert_max_attempts must be at least 1",
            ));
        }
        Ok(())
    }
}
