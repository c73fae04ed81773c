//! Payment application relationships
//!
//! When a payment is applied against one or more invoices, the upstream
//! exposes the application entries on the payment record. Each entry
//! becomes one [`ApplyRelationship`] row linking the payment to the
//! invoice it (partially) settles.

use serde::{Deserialize, Serialize};

use super::ids::{TenantId, UpstreamId};

/// One payment-to-invoice application
///
/// Identity is (`payment_upstream_id`, `invoice_upstream_id`, `tenant_id`);
/// duplicates within a fetched page collapse to the first occurrence before
/// persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyRelationship {
    pub payment_upstream_id: UpstreamId,
    pub invoice_upstream_id: UpstreamId,
    pub tenant_id: TenantId,
    pub amount_applied: f64,
    /// Date the payment was applied, as the upstream spelled it
    pub apply_date: Option<String>,
    /// Whole days between the invoice date and the apply date, when both
    /// were parseable
    pub days_to_settle: Option<i64>,
}

impl ApplyRelationship {
    /// The uniqueness key used for dedup and for the upsert conflict target
    pub fn key(&self) -> (String, String, String) {
        (
            self.payment_upstream_id.as_str().to_string(),
            self.invoice_upstream_id.as_str().to_string(),
            self.tenant_id.as_str().to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relationship(payment: &str, invoice: &str) -> ApplyRelationship {
        ApplyRelationship {
            payment_upstream_id: UpstreamId::new(payment).unwrap(),
            invoice_upstream_id: UpstreamId::new(invoice).unwrap(),
            tenant_id: TenantId::new("acme-eu").unwrap(),
            amount_applied: 500.0,
            apply_date: Some("2024-03-10".to_string()),
            days_to_settle: Some(18),
        }
    }

    #[test]
    fn test_key_components() {
        let rel = relationship("PAY-9", "INV-1");
        assert_eq!(
            rel.key(),
            (
                "PAY-9".to_string(),
                "INV-1".to_string(),
                "acme-eu".to_string()
            )
        );
    }

    #[test]
    fn test_same_pair_same_key() {
        let a = relationship("PAY-9", "INV-1");
        let mut b = relationship("PAY-9", "INV-1");
        b.amount_applied = 750.0;
        assert_eq!(a.key(), b.key());
    }
}
