//! CRM deal mapper

use crate::core::normalize::CurrencyTable;
use crate::core::transform::EntityMapper;
use crate::domain::ids::{EntityKind, TenantId};
use crate::domain::record::RawRecord;
use crate::domain::row::CanonicalRow;

const ID_KEYS: &[&str] = &["id", "deal_id"];
const TRANSACTION_ID_KEYS: &[&str] = &["deal_number", "reference"];
const TRANSACTION_DATE_KEYS: &[&str] = &["close_date", "expected_close_date"];
const COUNTERPARTY_ID_KEYS: &[&str] = &["company_id", "organization_id"];
const COUNTERPARTY_NAME_KEYS: &[&str] = &["company_name", "organization_name", "account_name"];
const TOTAL_KEYS: &[&str] = &["amount", "value", "deal_value"];
const STATUS_KEYS: &[&str] = &["status", "stage"];
const CREATED_KEYS: &[&str] = &["created_at", "add_time"];
const MODIFIED_KEYS: &[&str] = &["updated_at", "update_time", "modified_at"];

/// Mapper for CRM deals
pub struct CrmDealMapper;

impl EntityMapper for CrmDealMapper {
    fn entity(&self) -> EntityKind {
        EntityKind::Deal
    }

    fn transform(
        &self,
        record: &RawRecord,
        tenant: &TenantId,
        currencies: &CurrencyTable,
    ) -> CanonicalRow {
        let currency = currencies.normalize(&record.text("currency").unwrap_or_default());

        CanonicalRow {
            upstream_id: record.first_text(ID_KEYS).unwrap_or_default(),
            tenant_id: tenant.as_str().to_string(),
            entity: EntityKind::Deal,
            transaction_id: record.first_text(TRANSACTION_ID_KEYS),
            transaction_date: record.first_text(TRANSACTION_DATE_KEYS),
            counterparty_id: record.first_text(COUNTERPARTY_ID_KEYS),
            counterparty_name: record.first_text(COUNTERPARTY_NAME_KEYS),
            total: record.first_number(TOTAL_KEYS),
            currency,
            status: record.first_text(STATUS_KEYS),
            created_at: record.first_text(CREATED_KEYS),
            modified_at: record.first_text(MODIFIED_KEYS),
            raw: record.clone(),
        }
    }
}
