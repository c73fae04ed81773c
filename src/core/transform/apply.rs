//! Payment application extraction
//!
//! An upstream payment record carries a nested list of "apply" entries
//! naming the invoices the payment settles. Each entry becomes one
//! [`ApplyRelationship`]. Extraction is as forgiving as row
//! transformation: entries missing an invoice id are skipped, dates
//! that fail to parse just leave `days_to_settle` empty.

use crate::domain::ids::{TenantId, UpstreamId};
use crate::domain::record::RawRecord;
use crate::domain::relationship::ApplyRelationship;
use chrono::{DateTime, NaiveDate};
use std::collections::HashSet;

/// Field names under which upstreams nest the apply list
const APPLY_LIST_KEYS: &[&str] = &["applied_to", "apply", "applications"];

const PAYMENT_ID_KEYS: &[&str] = &["internal_id", "id"];
const INVOICE_ID_KEYS: &[&str] = &["invoice_id", "applied_to_id", "transaction_id", "doc_id"];
const AMOUNT_KEYS: &[&str] = &["amount", "amount_applied", "payment_amount"];
const APPLY_DATE_KEYS: &[&str] = &["apply_date", "applied_date", "date"];
const INVOICE_DATE_KEYS: &[&str] = &["invoice_date", "applied_to_date", "doc_date"];

/// Extracts the payment-to-invoice applications from one payment record
///
/// Returns an empty list when the payment has no usable id or no apply
/// list. Duplicate `(payment, invoice, tenant)` keys within the record
/// collapse to the first occurrence.
pub fn extract_apply_relationships(
    payment: &RawRecord,
    tenant: &TenantId,
) -> Vec<ApplyRelationship> {
    let payment_id = match payment
        .first_text(PAYMENT_ID_KEYS)
        .and_then(|id| UpstreamId::new(id).ok())
    {
        Some(id) => id,
        None => return Vec::new(),
    };

    let entries = match APPLY_LIST_KEYS.iter().find_map(|key| payment.array(key)) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    let mut relationships = Vec::new();
    for value in entries {
        let entry = match RawRecord::from_value(value) {
            Some(entry) => entry,
            None => continue,
        };

        let invoice_id = match entry
            .first_text(INVOICE_ID_KEYS)
            .and_then(|id| UpstreamId::new(id).ok())
        {
            Some(id) => id,
            None => continue,
        };

        let apply_date = entry.first_text(APPLY_DATE_KEYS);
        let invoice_date = entry.first_text(INVOICE_DATE_KEYS);
        let days_to_settle = match (&invoice_date, &apply_date) {
            (Some(invoiced), Some(applied)) => days_between(invoiced, applied),
            _ => None,
        };

        relationships.push(ApplyRelationship {
            payment_upstream_id: payment_id.clone(),
            invoice_upstream_id: invoice_id,
            tenant_id: tenant.clone(),
            amount_applied: entry.first_number(AMOUNT_KEYS),
            apply_date,
            days_to_settle,
        });
    }

    dedup_relationships(relationships)
}

/// Collapses duplicate relationship keys, keeping the first occurrence
///
/// A single fetched page can legitimately repeat the same relationship
/// across top-level records, so callers also run this over a page-level
/// accumulation before persisting.
pub fn dedup_relationships(relationships: Vec<ApplyRelationship>) -> Vec<ApplyRelationship> {
    let mut seen = HashSet::new();
    relationships
        .into_iter()
        .filter(|relationship| seen.insert(relationship.key()))
        .collect()
}

/// Whole days from the invoice date to the apply date
///
/// `None` when either date fails to parse.
pub fn days_between(invoice_date: &str, apply_date: &str) -> Option<i64> {
    let invoiced = parse_day(invoice_date)?;
    let applied = parse_day(apply_date)?;
    Some((applied - invoiced).num_days())
}

/// Parses an upstream date spelling down to a calendar day
fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    NaiveDate::parse_from_str(value, "%m/%d/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tenant() -> TenantId {
        TenantId::new("acme-eu").unwrap()
    }

    fn payment(value: serde_json::Value) -> RawRecord {
        RawRecord::from_value(&value).unwrap()
    }

    #[test]
    fn test_extracts_each_apply_entry() {
        let record = payment(json!({
            "internal_id": "PAY-9",
            "applied_to": [
                {
                    "invoice_id": "INV-1",
                    "amount": 500.0,
                    "apply_date": "2024-03-10",
                    "invoice_date": "2024-02-20"
                },
                {
                    "invoice_id": "INV-2",
                    "amount": "250.00",
                    "apply_date": "2024-03-10",
                    "invoice_date": "2024-03-01"
                }
            ]
        }));

        let relationships = extract_apply_relationships(&record, &tenant());
        assert_eq!(relationships.len(), 2);

        assert_eq!(relationships[0].payment_upstream_id.as_str(), "PAY-9");
        assert_eq!(relationships[0].invoice_upstream_id.as_str(), "INV-1");
        assert_eq!(relationships[0].amount_applied, 500.0);
        assert_eq!(relationships[0].days_to_settle, Some(19));

        assert_eq!(relationships[1].invoice_upstream_id.as_str(), "INV-2");
        assert_eq!(relationships[1].amount_applied, 250.0);
        assert_eq!(relationships[1].days_to_settle, Some(9));
    }

    #[test]
    fn test_duplicate_invoice_keeps_first_occurrence() {
        let record = payment(json!({
            "internal_id": "PAY-9",
            "applied_to": [
                {"invoice_id": "INV-1", "amount": 100.0},
                {"invoice_id": "INV-1", "amount": 900.0}
            ]
        }));

        let relationships = extract_apply_relationships(&record, &tenant());
        assert_eq!(relationships.len(), 1);
        assert_eq!(relationships[0].amount_applied, 100.0);
    }

    #[test]
    fn test_unparseable_dates_leave_days_empty() {
        let record = payment(json!({
            "internal_id": "PAY-9",
            "applied_to": [
                {
                    "invoice_id": "INV-1",
                    "apply_date": "soon",
                    "invoice_date": "2024-02-20"
                }
            ]
        }));

        let relationships = extract_apply_relationships(&record, &tenant());
        assert_eq!(relationships.len(), 1);
        assert_eq!(relationships[0].days_to_settle, None);
        assert_eq!(relationships[0].apply_date, Some("soon".to_string()));
    }

    #[test]
    fn test_mixed_date_formats() {
        assert_eq!(days_between("2024-02-20", "2024-03-10"), Some(19));
        assert_eq!(
            days_between("2024-02-20", "2024-03-10T08:30:00+02:00"),
            Some(19)
        );
        assert_eq!(days_between("02/20/2024", "2024-03-10"), Some(19));
        assert_eq!(days_between("", "2024-03-10"), None);
    }

    #[test]
    fn test_settlement_before_invoice_goes_negative() {
        assert_eq!(days_between("2024-03-10", "2024-03-01"), Some(-9));
    }

    #[test]
    fn test_entries_without_invoice_id_are_skipped() {
        let record = payment(json!({
            "internal_id": "PAY-9",
            "applied_to": [
                {"amount": 100.0},
                {"invoice_id": "", "amount": 50.0},
                {"invoice_id": "INV-3", "amount": 25.0}
            ]
        }));

        let relationships = extract_apply_relationships(&record, &tenant());
        assert_eq!(relationships.len(), 1);
        assert_eq!(relationships[0].invoice_upstream_id.as_str(), "INV-3");
    }

    #[test]
    fn test_payment_without_id_yields_nothing() {
        let record = payment(json!({
            "applied_to": [{"invoice_id": "INV-1", "amount": 100.0}]
        }));
        assert!(extract_apply_relationships(&record, &tenant()).is_empty());
    }

    #[test]
    fn test_payment_without_apply_list_yields_nothing() {
        let record = payment(json!({"internal_id": "PAY-9"}));
        assert!(extract_apply_relationships(&record, &tenant()).is_empty());
    }

    #[test]
    fn test_dedup_across_records() {
        let a = payment(json!({
            "internal_id": "PAY-9",
            "applied_to": [{"invoice_id": "INV-1", "amount": 100.0}]
        }));
        let b = payment(json!({
            "internal_id": "PAY-9",
            "applied_to": [{"invoice_id": "INV-1", "amount": 100.0}]
        }));

        let mut collected = extract_apply_relationships(&a, &tenant());
        collected.extend(extract_apply_relationships(&b, &tenant()));
        assert_eq!(collected.len(), 2);

        let deduped = dedup_relationships(collected);
        assert_eq!(deduped.len(), 1);
    }
}
