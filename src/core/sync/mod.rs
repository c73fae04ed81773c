//! Sync run orchestration, windows, and summaries.
//!
//! # Run Workflow
//!
//! One run moves through these stages:
//!
//! 1. **Validate**: Reject the run before any upstream call if the
//!    tenant is missing
//! 2. **Resolve Window**: Turn explicit bounds or `days_back` into an
//!    inclusive date range
//! 3. **Fetch**: Walk each entity's pages until the upstream is
//!    exhausted or the record limit is reached
//! 4. **Transform**: Normalize every raw record into a canonical row
//!    and extract payment applications
//! 5. **Upsert**: Write rows in sub-batches with retry on transient
//!    storage failures
//! 6. **Snapshot**: Persist CSV audit files of what was fetched and
//!    what was written
//! 7. **Report**: Produce a [`SyncSummary`] distinguishing full,
//!    partial, and interrupted runs
//!
//! The entire run executes under `sync.run_timeout_secs`; a run that
//! exceeds the budget aborts with a timeout error.
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
//! coordinator.prepare_storage().await?;
//!
//! let summary = coordinator.run(&SyncOptions::default(), shutdown_rx).await?;
//!
//! println!("Processed: {}", summary.total_processed());
//! println!("Succeeded: {}", summary.total_succeeded());
//! println!("Failed: {}", summary.total_failed());
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod summary;
pub mod window;

pub use coordinator::{SyncCoordinator, SyncOptions};
pub use summary::{EntityOutcome, SyncError, SyncErrorType, SyncSummary};
pub use window::DateWindow;
