//! Batched idempotent persistence
//!
//! This module splits canonical rows into bounded sub-batches and writes
//! each through the retry policy. A sub-batch that exhausts its retries
//! (or fails permanently) is counted and skipped; later sub-batches still
//! run, because partial success is the normal operating mode of a sync
//! run, not an exception.

pub mod retry;

use crate::adapters::storage::RowStore;
use crate::domain::ids::EntityKind;
use crate::domain::relationship::ApplyRelationship;
use crate::domain::row::CanonicalRow;
use std::sync::Arc;

pub use retry::RetryPolicy;

/// Result of pushing one collection through the upserter
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Rows confirmed written
    pub succeeded: usize,
    /// Rows in sub-batches that gave up
    pub failed: usize,
    /// One message per failed sub-batch
    pub errors: Vec<String>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed sub-batch of the given size
    pub fn add_failure(&mut self, size: usize, error: String) {
        self.failed += size;
        self.errors.push(error);
    }

    /// Merge another outcome into this one
    pub fn merge(&mut self, other: BatchOutcome) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.errors.extend(other.errors);
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }
}

/// Splits row collections into sub-batches and upserts them with retry
pub struct BatchUpserter {
    store: Arc<dyn RowStore>,
    policy: RetryPolicy,
    sub_batch_size: usize,
    dry_run: bool,
}

impl BatchUpserter {
    pub fn new(
        store: Arc<dyn RowStore>,
        policy: RetryPolicy,
        sub_batch_size: usize,
        dry_run: bool,
    ) -> Self {
        Self {
            store,
            policy,
            sub_batch_size: sub_batch_size.max(1),
            dry_run,
        }
    }

    /// Upserts canonical rows for one entity kind
    ///
    /// Each sub-batch commits or fails as a unit; a failed sub-batch
    /// adds its full size to `failed` and the loop moves on.
    pub async fn upsert_rows(&self, entity: EntityKind, rows: &[CanonicalRow]) -> BatchOutcome {
        let mut outcome = BatchOutcome::new();

        for chunk in rows.chunks(self.sub_batch_size) {
            if self.dry_run {
                tracing::info!(
                    entity = %entity,
                    count = chunk.len(),
                    "DRY RUN: Would upsert rows"
                );
                outcome.succeeded += chunk.len();
                continue;
            }

            match self
                .policy
                .run(|| self.store.upsert_rows(entity, chunk))
                .await
            {
                Ok(written) => outcome.succeeded += written as usize,
                Err(e) => {
                    tracing::error!(
                        entity = %entity,
                        count = chunk.len(),
                        error = %e,
                        "Sub-batch failed after retries"
                    );
                    outcome.add_failure(chunk.len(), format!("{} sub-batch failed: {}", entity, e));
                }
            }
        }

        outcome
    }

    /// Upserts payment applications
    pub async fn upsert_relationships(
        &self,
        relationships: &[ApplyRelationship],
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::new();

        for chunk in relationships.chunks(self.sub_batch_size) {
            if self.dry_run {
                tracing::info!(
                    count = chunk.len(),
                    "DRY RUN: Would upsert payment applications"
                );
                outcome.succeeded += chunk.len();
                continue;
            }

            match self
                .policy
                .run(|| self.store.upsert_relationships(chunk))
                .await
            {
                Ok(written) => outcome.succeeded += written as usize,
                Err(e) => {
                    tracing::error!(
                        count = chunk.len(),
                        error = %e,
                        "Relationship sub-batch failed after retries"
                    );
                    outcome.add_failure(
                        chunk.len(),
                        format!("relationship sub-batch failed: {}", e),
                    );
                }
            }
        }

        outcome
    }
}
