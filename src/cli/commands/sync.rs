//! Sync command implementation
//!
//! This module implements the `sync` command for pulling CRM deals and
//! ERP financial records into PostgreSQL.

use crate::config::load_config;
use crate::core::sync::{SyncCoordinator, SyncOptions};
use crate::domain::{LedgerError, UpstreamError};
use chrono::NaiveDate;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - simulate the sync without writing to PostgreSQL
    #[arg(long)]
    pub dry_run: bool,

    /// Window start date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date_from: Option<String>,

    /// Window end date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date_to: Option<String>,

    /// Override the lookback window in days
    #[arg(long)]
    pub days_back: Option<u32>,

    /// Stop each entity after roughly this many records
    #[arg(long)]
    pub limit: Option<u64>,

    /// Override entity kind(s) to sync (comma-separated)
    #[arg(long)]
    pub entity: Option<String>,

    /// Override the tenant the run operates on
    #[arg(long)]
    pub tenant: Option<String>,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting sync command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(tenant) = &self.tenant {
            tracing::info!(tenant = %tenant, "Overriding tenant from CLI");
            config.sync.tenant_id = tenant.clone();
        }

        if let Some(days_back) = self.days_back {
            tracing::info!(days_back, "Overriding lookback window from CLI");
            config.sync.days_back = days_back;
        }

        if let Some(entities) = &self.entity {
            let names: Vec<String> = entities.split(',').map(|s| s.trim().to_string()).collect();
            tracing::info!(entities = ?names, "Overriding entity kinds from CLI");
            config.sync.entities = names;
        }

        // Apply dry-run flag from CLI
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.sync.dry_run = true;
        }

        // Reject malformed dates before anything leaves this process
        let date_from = match parse_date_arg(self.date_from.as_deref()) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };
        let date_to = match parse_date_arg(self.date_to.as_deref()) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        // Validate configuration
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        let dry_run = config.sync.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled - no data will be written");
            println!("🔍 DRY RUN MODE - No data will be written to PostgreSQL");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !dry_run {
            println!("Sync Configuration:");
            println!("  Tenant: {}", config.sync.tenant_id);
            match (date_from, date_to) {
                (Some(from), Some(to)) => println!("  Window: {from} to {to}"),
                (Some(from), None) => println!("  Window: {from} to today"),
                (None, Some(to)) => {
                    println!("  Window: {} days back from {to}", config.sync.days_back)
                }
                (None, None) => println!("  Window: last {} days", config.sync.days_back),
            }
            println!("  Entities: {:?}", config.sync.entities);
            println!("  Page size: {}", config.sync.page_size);
            println!("  Sub-batch size: {}", config.sync.sub_batch_size);
            println!();
            print!("Proceed with sync? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Sync cancelled.");
                return Ok(0);
            }
        }

        // Create sync coordinator
        tracing::info!("Creating sync coordinator");
        let coordinator = match SyncCoordinator::new(config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create sync coordinator");
                eprintln!("Failed to initialize sync: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        // Fail fast when PostgreSQL is unreachable
        if let Err(e) = coordinator.prepare_storage().await {
            tracing::error!(error = %e, "PostgreSQL connectivity check failed");
            eprintln!("PostgreSQL is not reachable: {e}");
            return Ok(4);
        }

        let options = SyncOptions {
            date_from,
            date_to,
            limit: self.limit,
        };

        // Execute the run
        tracing::info!("Executing sync");
        println!("🚀 Starting sync...");
        println!();

        let summary = match coordinator.run(&options, shutdown_signal).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Sync aborted");
                eprintln!("Sync aborted: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        // Display summary
        println!();
        println!("📊 Sync Summary:");
        println!("  Tenant: {}", summary.tenant_id);
        println!("  Window: {}", summary.window);
        for outcome in &summary.entities {
            if let Some(entity) = outcome.entity {
                println!(
                    "  {}: {} processed, {} succeeded, {} failed",
                    entity, outcome.processed, outcome.succeeded, outcome.failed
                );
            }
        }
        println!("  Total Processed: {}", summary.total_processed());
        println!("  Successful: {}", summary.total_succeeded());
        println!("  Failed: {}", summary.total_failed());
        println!("  Payment Applications: {}", summary.total_relationships());
        println!("  Snapshots: {}", summary.snapshot_paths.len());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {}: {}", error.error_type, error.message);
                if let Some(context) = &error.context {
                    println!("    Context: {context}");
                }
            }
            println!();
        }

        // Determine exit code
        let exit_code = if summary.interrupted {
            println!();
            println!("⚠️  Sync interrupted gracefully. Committed batches were kept.");
            println!("   Re-running the same command is safe; writes are idempotent.");
            println!();
            tracing::info!("Sync interrupted by user signal");
            130 // SIGINT exit code (standard Unix convention)
        } else if summary.is_successful() {
            println!("✅ Sync completed successfully!");
            0
        } else {
            println!("⚠️  Sync completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}

/// Parses an optional YYYY-MM-DD argument
fn parse_date_arg(value: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("Invalid date '{s}'. Expected YYYY-MM-DD")),
    }
}

/// Maps a run-aborting error to the process exit code
fn exit_code_for(error: &LedgerError) -> i32 {
    match error {
        LedgerError::Authorization(_) => 2,
        LedgerError::Upstream(UpstreamError::Auth(_)) => 5,
        LedgerError::Upstream(UpstreamError::Status {
            status: 401 | 403, ..
        }) => 5,
        LedgerError::Storage(_) => 4,
        _ => 5, // Fatal error exit code
    }
}
