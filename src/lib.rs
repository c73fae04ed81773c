// LedgerSync - CRM/ERP to PostgreSQL Sync Tool
// Copyright (c) 2025 LedgerSync Contributors
// Licensed under the MIT License

//! # LedgerSync - CRM/ERP to PostgreSQL Sync
//!
//! LedgerSync is a financial data pipeline built in Rust that pulls deals from a
//! CRM and invoices, payments, and credit memos from an ERP, normalizes them into
//! canonical rows, and upserts them into PostgreSQL for reporting and analytics.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** paginated record pages from both upstream APIs over a date window
//! - **Transforming** heterogeneous payloads into one canonical row shape
//! - **Normalizing** free-form currency spellings to ISO 4217 codes
//! - **Extracting** payment-to-invoice applications with settlement day counts
//! - **Upserting** rows idempotently in sub-batches with retry on transient failures
//! - **Snapshotting** each run's raw and persisted data to CSV audit files
//!
//! ## Architecture
//!
//! LedgerSync follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (sync, transform, normalize, upsert, audit)
//! - [`adapters`] - External integrations (CRM, ERP, PostgreSQL)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ledgersync::config::LedgerConfig;
//! use ledgersync::core::sync::{SyncCoordinator, SyncOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = LedgerConfig::from_file("ledgersync.toml")?;
//!
//!     // Create sync coordinator
//!     let coordinator = SyncCoordinator::new(config)?;
//!     coordinator.prepare_storage().await?;
//!
//!     // Execute a run
//!     let (_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let summary = coordinator.run(&SyncOptions::default(), shutdown_rx).await?;
//!
//!     println!("Synced {} records", summary.total_succeeded());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Idempotent Upserts
//!
//! Every canonical row is keyed by `(upstream_id, tenant_id)` and written with
//! `ON CONFLICT ... DO UPDATE`, so re-running a window converges to the same
//! database state instead of duplicating rows. Interrupted runs are safe to
//! re-run.
//!
//! ### Currency Normalization
//!
//! Upstream systems spell currencies however they like ("US Dollar", "usd",
//! "Euro"). LedgerSync maps known spellings to ISO 4217 codes and passes
//! unknown values through unchanged for manual review:
//!
//! ```rust
//! use ledgersync::core::normalize::CurrencyTable;
//!
//! let table = CurrencyTable::builtin();
//! assert_eq!(table.normalize("US Dollar").as_str(), "USD");
//! assert_eq!(table.normalize("Martian Credit").as_str(), "Martian Credit");
//! ```
//!
//! ### Payment Applications
//!
//! Payments carry a list of the invoices they settle. LedgerSync extracts one
//! relationship row per application, including how many days the invoice took
//! to settle, and deduplicates repeated pairs:
//!
//! ```rust,no_run
//! use ledgersync::core::transform::extract_apply_relationships;
//! use ledgersync::domain::{RawRecord, TenantId};
//!
//! # fn example(payment: &RawRecord) -> Result<(), Box<dyn std::error::Error>> {
//! let tenant = TenantId::new("acme-eu")?;
//! let relationships = extract_apply_relationships(payment, &tenant);
//! for r in &relationships {
//!     println!("{} settles {}", r.payment_upstream_id, r.invoice_upstream_id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! LedgerSync uses the [`domain::LedgerError`] type for all errors:
//!
//! ```rust,no_run
//! use ledgersync::domain::LedgerError;
//!
//! fn example() -> Result<(), LedgerError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = ledgersync::config::LedgerConfig::from_file("ledgersync.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! LedgerSync uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting sync");
//! warn!(currency = "Galactic Credit", "Unrecognized currency spelling");
//! error!(error = "connection reset", "Sub-batch failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
