//! CLI command definitions and dispatch.

pub mod config;
pub mod health;
pub mod migrate;
pub mod sweep;

use anyhow::Context;
use clap::{Parser, Subcommand};

use clipvault_core::config::AppConfig;

use crate::output::OutputFormat;

/// ClipVault: ephemeral text and file sharing by four-digit code
#[derive(Debug, Parser)]
#[command(name = "clipvault", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to apply (e.g. development, production)
    #[arg(short, long, env = "CLIPVAULT_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Run the retention sweep once
    Sweep(sweep::SweepArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Check the record store and blob store
    Health,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Migrate => migrate::execute(&self.load_config()?).await,
            Commands::Sweep(args) => sweep::execute(args, &self.load_config()?, self.format).await,
            Commands::Config(args) => config::execute(args, self, self.format),
            Commands::Health => health::execute(&self.load_config()?, self.format).await,
        }
    }

    /// Load configuration the same way the server does.
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        AppConfig::load_from(&self.config_dir, &self.env).with_context(|| {
            format!(
                "Failed to load configuration from '{}' (env: {})",
                self.config_dir, self.env
            )
        })
    }
}
