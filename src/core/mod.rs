//! Core business logic for LedgerSync.
//!
//! This module contains the pipeline stages between the upstream
//! adapters and PostgreSQL.
//!
//! # Modules
//!
//! - [`sync`] - Run orchestration, date windows, and run summaries
//! - [`transform`] - Raw payload to canonical row mapping per entity
//! - [`normalize`] - Currency spelling normalization to ISO 4217 codes
//! - [`upsert`] - Sub-batched idempotent writes with retry
//! - [`audit`] - CSV snapshots of fetched and persisted data
//!
//! # Sync Workflow
//!
//! The typical run:
//!
//! 1. **Resolve Window**: Explicit dates or `days_back` from today
//! 2. **Fetch**: Page through each entity from its upstream
//! 3. **Transform**: Map heterogeneous payloads to canonical rows
//! 4. **Extract**: Pull payment-to-invoice applications out of payments
//! 5. **Upsert**: Write sub-batches, retrying transient failures
//! 6. **Snapshot**: Write CSV audit files
//! 7. **Report**: Produce a run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use ledgersync::config::load_config;
//! use ledgersync::core::sync::{SyncCoordinator, SyncOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ledgersync.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let coordinator = SyncCoordinator::new(config)?;
//! let summary = coordinator.run(&SyncOptions::default(), shutdown_rx).await?;
//!
//! println!("Status: {}", summary.status_label());
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod normalize;
pub mod sync;
pub mod transform;
pub mod upsert;
