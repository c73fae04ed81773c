//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the LedgerSync configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Validate configuration
        match config.validate() {
            Ok(_) => {
                use secrecy::ExposeSecret;

                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Environment: {:?}", config.environment);
                println!("  Log Level: {}", config.application.log_level);
                println!("  CRM URL: {}", config.crm.base_url);
                println!("  ERP URL: {}", config.erp.base_url);
                println!("  ERP Account: {}", config.erp.account_id);
                println!(
                    "  PostgreSQL Connection: {}",
                    config
                        .postgresql
                        .connection_string
                        .expose_secret()
                        .split('@')
                        .next_back()
                        .unwrap_or("***")
                );
                println!("  Max Connections: {}", config.postgresql.max_connections);
                println!(
                    "  Tenant: {}",
                    if config.sync.tenant_id.is_empty() {
                        "(set per run with --tenant)"
                    } else {
                        &config.sync.tenant_id
                    }
                );
                println!("  Entities: {:?}", config.sync.entities);
                println!("  Days Back: {}", config.sync.days_back);
                println!("  Page Size: {}", config.sync.page_size);
                println!("  Sub-batch Size: {}", config.sync.sub_batch_size);
                println!(
                    "  Retries: {} attempts, backoff {:?} ms",
                    config.sync.max_retries, config.sync.retry_backoff_ms
                );
                println!("  Run Budget: {}s", config.sync.run_timeout_secs);
                println!(
                    "  Audit Snapshots: {}",
                    if config.audit.enabled {
                        format!("enabled ({})", config.audit.dir)
                    } else {
                        "disabled".to_string()
                    }
                );
                if !config.currency.aliases.is_empty() {
                    println!("  Currency Aliases: {}", config.currency.aliases.len());
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}
