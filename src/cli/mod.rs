//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for LedgerSync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// LedgerSync - CRM/ERP to PostgreSQL Sync Tool
#[derive(Parser, Debug)]
#[command(name = "ledgersync")]
#[command(version, about, long_about = None)]
#[command(author = "LedgerSync Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ledgersync.toml", env = "LEDGERSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LEDGERSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sync CRM and ERP records into PostgreSQL
    Sync(commands::sync::SyncArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_sync() {
        let cli = Cli::parse_from(["ledgersync", "sync"]);
        assert_eq!(cli.config, "ledgersync.toml");
        assert!(matches!(cli.command, Commands::Sync(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["ledgersync", "--config", "custom.toml", "sync"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["ledgersync", "--log-level", "debug", "sync"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_sync_flags() {
        let cli = Cli::parse_from([
            "ledgersync",
            "sync",
            "--dry-run",
            "--date-from",
            "2025-01-01",
            "--date-to",
            "2025-03-31",
            "--entity",
            "invoice,payment",
            "--tenant",
            "acme-eu",
            "--limit",
            "500",
        ]);

        match cli.command {
            Commands::Sync(args) => {
                assert!(args.dry_run);
                assert_eq!(args.date_from.as_deref(), Some("2025-01-01"));
                assert_eq!(args.date_to.as_deref(), Some("2025-03-31"));
                assert_eq!(args.entity.as_deref(), Some("invoice,payment"));
                assert_eq!(args.tenant.as_deref(), Some("acme-eu"));
                assert_eq!(args.limit, Some(500));
            }
            other => panic!("Expected sync command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["ledgersync", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["ledgersync", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
