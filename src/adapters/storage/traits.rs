//! Storage abstraction traits
//!
//! The sync pipeline persists through [`RowStore`] so the batching and
//! retry logic never touches SQL directly and tests can substitute an
//! in-memory store.

use crate::domain::ids::EntityKind;
use crate::domain::relationship::ApplyRelationship;
use crate::domain::row::CanonicalRow;
use crate::domain::Result;
use async_trait::async_trait;

/// Conflict key for canonical row upserts
pub const ROW_CONFLICT_KEY: [&str; 2] = ["upstream_id", "tenant_id"];

/// Conflict key for payment application upserts
pub const RELATIONSHIP_CONFLICT_KEY: [&str; 3] =
    ["payment_upstream_id", "invoice_upstream_id", "tenant_id"];

/// Destination store for normalized rows and relationships
///
/// Writes are idempotent upserts keyed on the conflict keys above, so a
/// retried or re-run batch converges to the same stored state. Each call
/// is transactional: the whole slice commits or none of it does.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Test connectivity to the store
    async fn test_connection(&self) -> Result<()>;

    /// Ensure tables and indexes exist
    async fn ensure_schema(&self) -> Result<()>;

    /// Upsert a slice of canonical rows into the table for `entity`
    ///
    /// Returns the number of rows written. Fails as a unit; on error no
    /// row from the slice was persisted.
    async fn upsert_rows(&self, entity: EntityKind, rows: &[CanonicalRow]) -> Result<u64>;

    /// Upsert a slice of payment applications
    ///
    /// Same transactional contract as [`RowStore::upsert_rows`].
    async fn upsert_relationships(&self, relationships: &[ApplyRelationship]) -> Result<u64>;
}
