//! Canonical row model
//!
//! Every entity kind normalizes into the same [`CanonicalRow`] shape, so
//! the upsert and audit layers stay entity-agnostic. Date and time fields
//! sourced from an upstream pass through as the strings the upstream sent;
//! they are never re-parsed into native date types on this model. The full
//! raw record rides along for audit snapshots.

use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;
use super::ids::EntityKind;
use super::record::RawRecord;

/// A normalized financial record ready for persistence
///
/// The upsert identity is (`upstream_id`, `tenant_id`). Transformation is
/// total, so `upstream_id` may come out empty when the source record had
/// no usable id; such rows are filtered (and counted as failures) before
/// they reach the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub upstream_id: String,
    pub tenant_id: String,
    pub entity: EntityKind,
    pub transaction_id: Option<String>,
    pub transaction_date: Option<String>,
    pub counterparty_id: Option<String>,
    pub counterparty_name: Option<String>,
    pub total: f64,
    pub currency: CurrencyCode,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    pub raw: RawRecord,
}

impl CanonicalRow {
    /// Whether this row carries an upstream id usable as an upsert key
    pub fn has_upstream_id(&self) -> bool {
        !self.upstream_id.trim().is_empty()
    }
}
