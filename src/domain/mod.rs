//! Domain models and types for LedgerSync.
//!
//! This module contains the core domain models, types, and business rules
//! for LedgerSync: type safety through newtypes, explicit error types, and
//! schemaless-but-defensive handling of upstream payloads.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`TenantId`], [`UpstreamId`], [`EntityKind`])
//! - **Record models** ([`RawRecord`], [`CanonicalRow`], [`ApplyRelationship`])
//! - **Error types** ([`LedgerError`], [`UpstreamError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! LedgerSync uses the newtype pattern for identifiers to prevent mixing
//! different ID types:
//!
//! ```rust
//! use ledgersync::domain::{TenantId, UpstreamId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tenant = TenantId::new("acme-eu")?;
//! let record = UpstreamId::new("INV-2024-0001")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: TenantId = record;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, LedgerError>`]:
//!
//! ```rust
//! use ledgersync::domain::{LedgerError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = ledgersync::config::LedgerConfig::from_file("ledgersync.toml")?;
//!     Ok(())
//! }
//! ```

pub mod currency;
pub mod errors;
pub mod ids;
pub mod record;
pub mod relationship;
pub mod result;
pub mod row;

// Re-export commonly used types for convenience
pub use currency::CurrencyCode;
pub use errors::{LedgerError, StorageError, UpstreamError};
pub use ids::{EntityKind, TenantId, UpstreamId, UpstreamSystem};
pub use record::RawRecord;
pub use relationship::ApplyRelationship;
pub use result::Result;
pub use row::CanonicalRow;
