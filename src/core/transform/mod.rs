//! Record transformation logic
//!
//! This module converts raw upstream records into canonical rows. One
//! mapper per entity kind; all of them are total functions that degrade
//! malformed fields to defaults instead of erroring, because one bad
//! record must never abort a batch.

pub mod apply;
pub mod crm;
pub mod erp;

use crate::core::normalize::CurrencyTable;
use crate::domain::ids::{EntityKind, TenantId};
use crate::domain::record::RawRecord;
use crate::domain::relationship::ApplyRelationship;
use crate::domain::row::CanonicalRow;

pub use apply::{dedup_relationships, extract_apply_relationships};
pub use crm::CrmDealMapper;
pub use erp::{ErpCreditMemoMapper, ErpInvoiceMapper, ErpPaymentMapper};

/// Transformation strategy for one entity kind
///
/// `transform` is total: any raw record yields a row, with missing or
/// malformed fields mapped to defaults (`0.0` totals, empty id, `None`
/// optionals). Only payment mappers produce relationships; the default
/// is empty.
pub trait EntityMapper: Send + Sync {
    /// The entity kind this mapper handles
    fn entity(&self) -> EntityKind;

    /// Converts one raw record into a canonical row
    fn transform(
        &self,
        record: &RawRecord,
        tenant: &TenantId,
        currencies: &CurrencyTable,
    ) -> CanonicalRow;

    /// Extracts cross-entity relationships carried by the record
    fn extract_relationships(
        &self,
        _record: &RawRecord,
        _tenant: &TenantId,
    ) -> Vec<ApplyRelationship> {
        Vec::new()
    }
}

/// The mapper for an entity kind
pub fn mapper_for(entity: EntityKind) -> Box<dyn EntityMapper> {
    match entity {
        EntityKind::Invoice => Box::new(ErpInvoiceMapper),
        EntityKind::Payment => Box::new(ErpPaymentMapper),
        EntityKind::CreditMemo => Box::new(ErpCreditMemoMapper),
        EntityKind::Deal => Box::new(CrmDealMapper),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapper_for_covers_every_kind() {
        for entity in EntityKind::all() {
            assert_eq!(mapper_for(entity).entity(), entity);
        }
    }

    #[test]
    fn test_transform_is_total_on_empty_record() {
        let tenant = TenantId::new("acme-eu").unwrap();
        let currencies = CurrencyTable::builtin();
        let empty = RawRecord::from_value(&json!({})).unwrap();

        for entity in EntityKind::all() {
            let row = mapper_for(entity).transform(&empty, &tenant, &currencies);
            assert_eq!(row.entity, entity);
            assert_eq!(row.upstream_id, "");
            assert_eq!(row.total, 0.0);
            assert_eq!(row.tenant_id, "acme-eu");
        }
    }
}
