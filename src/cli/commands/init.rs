//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ledgersync.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing LedgerSync configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        // Generate configuration content
        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        // Write to file
        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set LEDGERSYNC_CRM_API_TOKEN");
                println!("     - Set LEDGERSYNC_ERP_TOKEN");
                println!("     - Set LEDGERSYNC_PG_CONNECTION_STRING");
                println!("  3. Validate configuration: ledgersync validate-config");
                println!("  4. Preview a run: ledgersync sync --dry-run");
                println!("  5. Run the sync: ledgersync sync");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# LedgerSync Configuration File
# CRM/ERP to PostgreSQL financial record sync

# Runtime environment (development, staging, production)
environment = "development"

[application]
log_level = "info"

[crm]
base_url = "https://crm.example.com"
api_token = "${LEDGERSYNC_CRM_API_TOKEN}"

[erp]
base_url = "https://erp.example.com"
account_id = "ACCT-1"
token = "${LEDGERSYNC_ERP_TOKEN}"

[postgresql]
connection_string = "${LEDGERSYNC_PG_CONNECTION_STRING}"
max_connections = 10

[sync]
tenant_id = "acme-eu"
days_back = 365
page_size = 100
sub_batch_size = 40
max_retries = 3
retry_backoff_ms = [1000, 2000, 3000]
run_timeout_secs = 1800
entities = ["invoice", "payment", "credit_memo", "deal"]

[audit]
enabled = true
dir = "backups"

[logging]
local_enabled = true
local_path = "/var/log/ledgersync"
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# LedgerSync Configuration File
# CRM/ERP to PostgreSQL financial record sync
#
# This file contains all configuration options with examples and explanations.
#
# LedgerSync pulls deals from a CRM and invoices, payments, and credit
# memos from an ERP, normalizes them into canonical rows, and upserts
# them into PostgreSQL. Every run can also write CSV audit snapshots.

# ============================================================================
# Environment
# ============================================================================
# Runtime environment (development, staging, production)
# Production requires https:// upstream URLs.
environment = "development"

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# CRM Upstream (deals)
# ============================================================================
[crm]
# Base URL of the CRM API
base_url = "https://crm.example.com"

# Bearer token (use environment variable)
api_token = "${LEDGERSYNC_CRM_API_TOKEN}"

# Request timeout in seconds
timeout_seconds = 30

# ============================================================================
# ERP Upstream (invoices, payments, credit memos)
# ============================================================================
[erp]
# Base URL of the ERP API
base_url = "https://erp.example.com"

# Account identifier used for HTTP Basic auth
account_id = "ACCT-1"

# Access token used as the HTTP Basic password (use environment variable)
token = "${LEDGERSYNC_ERP_TOKEN}"

# Request timeout in seconds
timeout_seconds = 30

# ============================================================================
# PostgreSQL
# ============================================================================
[postgresql]
# Connection string format: postgresql://[user[:password]@][host][:port][/dbname][?params]
connection_string = "${LEDGERSYNC_PG_CONNECTION_STRING}"

# Connection pool settings
max_connections = 10                # Maximum connections in pool (1-100)
connection_timeout_seconds = 30     # Timeout for acquiring a connection
statement_timeout_seconds = 60      # Timeout for SQL statement execution

# ============================================================================
# Sync Run Settings
# ============================================================================
[sync]
# Tenant the run operates on. Every persisted row is scoped by tenant.
# May be left empty and supplied per run with --tenant.
tenant_id = "acme-eu"

# Default lookback window in days when no explicit dates are given
days_back = 365

# Records requested per upstream page (1-100)
page_size = 100

# Rows written per storage sub-batch (1-50)
sub_batch_size = 40

# Maximum write attempts per sub-batch, first try included (1-10)
max_retries = 3

# Retry backoff delays in milliseconds (must be non-decreasing)
retry_backoff_ms = [1000, 2000, 3000]

# Pause between upstream pages in milliseconds
inter_batch_delay_ms = 200

# Wall-clock budget for one run in seconds
run_timeout_secs = 1800

# Dry run mode (fetch and transform, but never write)
dry_run = false

# Entity kinds to sync
entities = ["invoice", "payment", "credit_memo", "deal"]

# ============================================================================
# Audit Snapshots
# ============================================================================
[audit]
# Write timestamped CSV files of what each run fetched and persisted
enabled = true

# Directory snapshot files are written to
dir = "backups"

# ============================================================================
# Currency Normalization
# ============================================================================
# Extra spelling-to-ISO-code entries merged over the built-in table.
# [currency.aliases]
# "Franken" = "CHF"
# "Kr" = "SEK"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local file logging
local_enabled = true

# Local log file path
local_path = "/var/log/ledgersync"

# Log rotation (daily or size)
local_rotation = "daily"

# Maximum log file size in MB
local_max_size_mb = 100
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "ledgersync.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "ledgersync.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[crm]"));
        assert!(config.contains("[erp]"));
        assert!(config.contains("[postgresql]"));
        assert!(config.contains("[sync]"));
        assert!(config.contains("${LEDGERSYNC_CRM_API_TOKEN}"));
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("# LedgerSync Configuration File"));
        assert!(config.contains("retry_backoff_ms"));
        assert!(config.contains("sub_batch_size"));
        assert!(config.contains("[audit]"));
    }

    #[test]
    fn test_sample_configs_parse() {
        // Both generated files must round-trip through the TOML schema
        let minimal: Result<crate::config::LedgerConfig, _> =
            toml::from_str(&InitArgs::generate_minimal_config());
        assert!(minimal.is_ok(), "minimal sample must parse: {minimal:?}");

        let full: Result<crate::config::LedgerConfig, _> =
            toml::from_str(&InitArgs::generate_config_with_examples());
        assert!(full.is_ok(), "example sample must parse: {full:?}");
    }
}
