//! PostgreSQL row store
//!
//! Implements [`RowStore`] with idempotent upserts. Each call runs in a
//! single transaction so a sub-batch commits or fails as a unit, which
//! keeps retries safe: re-executing the same slice converges on the same
//! stored state.

use crate::adapters::storage::client::PostgresClient;
use crate::adapters::storage::traits::RowStore;
use crate::domain::errors::StorageError;
use crate::domain::ids::EntityKind;
use crate::domain::relationship::ApplyRelationship;
use crate::domain::row::CanonicalRow;
use crate::domain::{LedgerError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// PostgreSQL implementation of [`RowStore`]
pub struct PostgresStore {
    client: Arc<PostgresClient>,
}

impl PostgresStore {
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgresClient> {
        &self.client
    }
}

/// Upsert statement for a canonical row table
///
/// All four entity tables share the same column layout, so the statement
/// differs only in the table name. Table names come from
/// [`EntityKind::table`], never from input data.
fn upsert_row_sql(table: &str) -> String {
    format!(
        r#"
        INSERT INTO {table} (
            upstream_id, tenant_id, transaction_id, transaction_date,
            counterparty_id, counterparty_name, total, currency, status,
            created_at, modified_at, raw, synced_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW())
        ON CONFLICT (upstream_id, tenant_id) DO UPDATE SET
            transaction_id = EXCLUDED.transaction_id,
            transaction_date = EXCLUDED.transaction_date,
            counterparty_id = EXCLUDED.counterparty_id,
            counterparty_name = EXCLUDED.counterparty_name,
            total = EXCLUDED.total,
            currency = EXCLUDED.currency,
            status = EXCLUDED.status,
            created_at = EXCLUDED.created_at,
            modified_at = EXCLUDED.modified_at,
            raw = EXCLUDED.raw,
            synced_at = NOW()
        "#
    )
}

/// Upsert statement for payment applications
fn upsert_relationship_sql() -> &'static str {
    r#"
    INSERT INTO payment_applications (
        payment_upstream_id, invoice_upstream_id, tenant_id,
        amount_applied, apply_date, days_to_settle, synced_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, NOW())
    ON CONFLICT (payment_upstream_id, invoice_upstream_id, tenant_id) DO UPDATE SET
        amount_applied = EXCLUDED.amount_applied,
        apply_date = EXCLUDED.apply_date,
        days_to_settle = EXCLUDED.days_to_settle,
        synced_at = NOW()
    "#
}

/// Map a driver error onto the storage error taxonomy
///
/// Connection-class, resource and lock/serialization failures are
/// transient (the retry layer may re-attempt them); anything the server
/// actively rejected is permanent.
fn classify_pg_error(context: &str, e: &tokio_postgres::Error) -> StorageError {
    if e.is_closed() {
        return StorageError::Unavailable(format!("{}: connection closed: {}", context, e));
    }

    if let Some(db_error) = e.as_db_error() {
        let code = db_error.code().code();
        let transient = code.starts_with("08")
            || code.starts_with("53")
            || code.starts_with("57")
            || code == "40001"
            || code == "40P01";

        if transient {
            return StorageError::Unavailable(format!("{}: {} ({})", context, db_error, code));
        }
        return StorageError::Rejected(format!("{}: {} ({})", context, db_error, code));
    }

    // No server error attached: transport-level failure
    StorageError::Unavailable(format!("{}: {}", context, e))
}

#[async_trait]
impl RowStore for PostgresStore {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    async fn upsert_rows(&self, entity: EntityKind, rows: &[CanonicalRow]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut conn = self.client.get_connection().await?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| classify_pg_error("Failed to begin transaction", &e))?;

        tx.batch_execute(&format!(
            "SET LOCAL statement_timeout = {}",
            self.client.statement_timeout_ms()
        ))
        .await
        .map_err(|e| classify_pg_error("Failed to set statement timeout", &e))?;

        let statement = tx
            .prepare(&upsert_row_sql(entity.table()))
            .await
            .map_err(|e| classify_pg_error("Failed to prepare upsert", &e))?;

        for row in rows {
            let raw_json = serde_json::to_value(&row.raw).map_err(|e| {
                LedgerError::Serialization(format!("Failed to serialize raw record: {}", e))
            })?;

            tx.execute(
                &statement,
                &[
                    &row.upstream_id,
                    &row.tenant_id,
                    &row.transaction_id,
                    &row.transaction_date,
                    &row.counterparty_id,
                    &row.counterparty_name,
                    &row.total,
                    &row.currency.as_str(),
                    &row.status,
                    &row.created_at,
                    &row.modified_at,
                    &raw_json,
                ],
            )
            .await
            .map_err(|e| {
                classify_pg_error(&format!("Upsert into {} failed", entity.table()), &e)
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| classify_pg_error("Failed to commit transaction", &e))?;

        tracing::debug!(
            entity = %entity,
            count = rows.len(),
            "Upserted canonical rows"
        );

        Ok(rows.len() as u64)
    }

    async fn upsert_relationships(&self, relationships: &[ApplyRelationship]) -> Result<u64> {
        if relationships.is_empty() {
            return Ok(0);
        }

        let mut conn = self.client.get_connection().await?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| classify_pg_error("Failed to begin transaction", &e))?;

        tx.batch_execute(&format!(
            "SET LOCAL statement_timeout = {}",
            self.client.statement_timeout_ms()
        ))
        .await
        .map_err(|e| classify_pg_error("Failed to set statement timeout", &e))?;

        let statement = tx
            .prepare(upsert_relationship_sql())
            .await
            .map_err(|e| classify_pg_error("Failed to prepare upsert", &e))?;

        for relationship in relationships {
            tx.execute(
                &statement,
                &[
                    &relationship.payment_upstream_id.as_str(),
                    &relationship.invoice_upstream_id.as_str(),
                    &relationship.tenant_id.as_str(),
                    &relationship.amount_applied,
                    &relationship.apply_date,
                    &relationship.days_to_settle,
                ],
            )
            .await
            .map_err(|e| classify_pg_error("Upsert into payment_applications failed", &e))?;
        }

        tx.commit()
            .await
            .map_err(|e| classify_pg_error("Failed to commit transaction", &e))?;

        tracing::debug!(
            count = relationships.len(),
            "Upserted payment applications"
        );

        Ok(relationships.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_sql_targets_entity_table() {
        for entity in EntityKind::all() {
            let sql = upsert_row_sql(entity.table());
            assert!(sql.contains(&format!("INSERT INTO {}", entity.table())));
            assert!(sql.contains("ON CONFLICT (upstream_id, tenant_id)"));
        }
    }

    #[test]
    fn test_row_sql_updates_all_non_key_columns() {
        let sql = upsert_row_sql("invoices");
        for column in [
            "transaction_id",
            "transaction_date",
            "counterparty_id",
            "counterparty_name",
            "total",
            "currency",
            "status",
            "created_at",
            "modified_at",
            "raw",
        ] {
            assert!(
                sql.contains(&format!("{} = EXCLUDED.{}", column, column)),
                "missing update for column {}",
                column
            );
        }
        assert!(sql.contains("synced_at = NOW()"));
    }

    #[test]
    fn test_relationship_sql_conflict_target() {
        let sql = upsert_relationship_sql();
        assert!(sql.contains("INSERT INTO payment_applications"));
        assert!(sql.contains(
            "ON CONFLICT (payment_upstream_id, invoice_upstream_id, tenant_id)"
        ));
        assert!(sql.contains("amount_applied = EXCLUDED.amount_applied"));
    }
}
