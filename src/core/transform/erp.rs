//! ERP record mappers
//!
//! Invoices, payments and credit memos share one field layout on the ERP
//! side, differing mostly in which field carries the monetary total. The
//! shared builder handles the common columns; each mapper supplies its
//! entity kind and total-field candidates.

use crate::core::normalize::CurrencyTable;
use crate::core::transform::apply::extract_apply_relationships;
use crate::core::transform::EntityMapper;
use crate::domain::ids::{EntityKind, TenantId};
use crate::domain::record::RawRecord;
use crate::domain::relationship::ApplyRelationship;
use crate::domain::row::CanonicalRow;

const ID_KEYS: &[&str] = &["internal_id", "id"];
const TRANSACTION_ID_KEYS: &[&str] = &["tran_id", "transaction_id", "document_number"];
const TRANSACTION_DATE_KEYS: &[&str] = &["tran_date", "transaction_date", "date"];
const COUNTERPARTY_ID_KEYS: &[&str] = &["entity_id", "customer_id", "entity"];
const COUNTERPARTY_NAME_KEYS: &[&str] = &["entity_name", "customer_name", "company_name"];
const STATUS_KEYS: &[&str] = &["status", "approval_status"];
const CREATED_KEYS: &[&str] = &["created_date", "date_created", "created_at"];
const MODIFIED_KEYS: &[&str] = &["last_modified_date", "date_last_modified", "modified_at"];

/// Builds a canonical row from an ERP record
///
/// Total where no usable value exists is `0.0`, an absent id is the
/// empty string; nothing here fails.
fn canonical_from_erp(
    entity: EntityKind,
    total_keys: &[&str],
    record: &RawRecord,
    tenant: &TenantId,
    currencies: &CurrencyTable,
) -> CanonicalRow {
    let currency = currencies.normalize(&record.text("currency").unwrap_or_default());

    CanonicalRow {
        upstream_id: record.first_text(ID_KEYS).unwrap_or_default(),
        tenant_id: tenant.as_str().to_string(),
        entity,
        transaction_id: record.first_text(TRANSACTION_ID_KEYS),
        transaction_date: record.first_text(TRANSACTION_DATE_KEYS),
        counterparty_id: record.first_text(COUNTERPARTY_ID_KEYS),
        counterparty_name: record.first_text(COUNTERPARTY_NAME_KEYS),
        total: record.first_number(total_keys),
        currency,
        status: record.first_text(STATUS_KEYS),
        created_at: record.first_text(CREATED_KEYS),
        modified_at: record.first_text(MODIFIED_KEYS),
        raw: record.clone(),
    }
}

/// Mapper for ERP invoices
pub struct ErpInvoiceMapper;

impl EntityMapper for ErpInvoiceMapper {
    fn entity(&self) -> EntityKind {
        EntityKind::Invoice
    }

    fn transform(
        &self,
        record: &RawRecord,
        tenant: &TenantId,
        currencies: &CurrencyTable,
    ) -> CanonicalRow {
        canonical_from_erp(
            EntityKind::Invoice,
            &["total", "amount", "total_amount"],
            record,
            tenant,
            currencies,
        )
    }
}

/// Mapper for ERP payments
///
/// The only mapper with relationship output: payments carry the apply
/// entries linking them to invoices.
pub struct ErpPaymentMapper;

impl EntityMapper for ErpPaymentMapper {
    fn entity(&self) -> EntityKind {
        EntityKind::Payment
    }

    fn transform(
        &self,
        record: &RawRecord,
        tenant: &TenantId,
        currencies: &CurrencyTable,
    ) -> CanonicalRow {
        canonical_from_erp(
            EntityKind::Payment,
            &["amount", "total", "payment_amount"],
            record,
            tenant,
            currencies,
        )
    }

    fn extract_relationships(
        &self,
        record: &RawRecord,
        tenant: &TenantId,
    ) -> Vec<ApplyRelationship> {
        extract_apply_relationships(record, tenant)
    }
}

/// Mapper for ERP credit memos
pub struct ErpCreditMemoMapper;

impl EntityMapper for ErpCreditMemoMapper {
    fn entity(&self) -> EntityKind {
        EntityKind::CreditMemo
    }

    fn transform(
        &self,
        record: &RawRecord,
        tenant: &TenantId,
        currencies: &CurrencyTable,
    ) -> CanonicalRow {
        canonical_from_erp(
            EntityKind::CreditMemo,
            &["total", "amount", "total_amount"],
            record,
            tenant,
            currencies,
        )
    }
}
