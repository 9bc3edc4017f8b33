//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use clipvault_database::connection::mask_password;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (database password masked)
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli, format: OutputFormat) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = cli.load_config()?;
            config.database.url = mask_password(&config.database.url);
            output::print_item(&config, format);
        }
        ConfigCommand::Validate => {
            let config = cli.load_config()?;
            output::print_success(&format!(
                "Configuration in '{}' (env: {}) is valid",
                cli.config_dir, cli.env
            ));
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv("Store", &config.database.provider.to_string());
            if !config.database.url.is_empty() {
                output::print_kv("Database", &mask_password(&config.database.url));
            }
            output::print_kv("Blob root", &config.storage.local.root_path);
            output::print_kv(
                "Retention",
                &format!(
                    "{}s after expiry ({})",
                    config.retention.sweep_after_seconds, config.retention.schedule
                ),
            );
        }
    }

    Ok(())
}
