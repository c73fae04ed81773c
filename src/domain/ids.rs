//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for tenant and upstream record
//! identifiers, plus the entity kind enumeration that drives per-entity
//! sync behavior. Each type ensures type safety and validates its input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tenant identifier newtype wrapper
///
/// Represents the tenant (organization/subsidiary) a sync run operates on.
/// Every persisted row is scoped by tenant.
///
/// # Examples
///
/// ```
/// use ledgersync::domain::ids::TenantId;
/// use std::str::FromStr;
///
/// let tenant = TenantId::from_str("acme-eu").unwrap();
/// assert_eq!(tenant.as_str(), "acme-eu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a new TenantId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The tenant identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(TenantId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Tenant ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the tenant ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Upstream record identifier newtype wrapper
///
/// Represents the identifier a record carries in its source system (the
/// ERP internal id or the CRM object id). Stable across fetches, so it
/// anchors idempotent upserts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpstreamId(String);

impl UpstreamId {
    /// Creates a new UpstreamId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The upstream identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(UpstreamId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Upstream ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the upstream ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UpstreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UpstreamId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UpstreamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The upstream system an entity kind is fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamSystem {
    /// The ERP-side financials API (invoices, payments, credit memos)
    Erp,
    /// The CRM-side API (deals)
    Crm,
}

impl fmt::Display for UpstreamSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamSystem::Erp => write!(f, "erp"),
            UpstreamSystem::Crm => write!(f, "crm"),
        }
    }
}

/// Kind of financial record the pipeline synchronizes
///
/// Each kind knows which upstream serves it, the record type name that
/// upstream uses on the wire, and the table its canonical rows land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Invoice,
    Payment,
    CreditMemo,
    Deal,
}

impl EntityKind {
    /// All entity kinds in sync order. Invoices before payments so
    /// relationship rows reference invoices already persisted in the
    /// same run.
    pub fn all() -> [EntityKind; 4] {
        [
            EntityKind::Invoice,
            EntityKind::Payment,
            EntityKind::CreditMemo,
            EntityKind::Deal,
        ]
    }

    /// The upstream system this kind is fetched from
    pub fn system(&self) -> UpstreamSystem {
        match self {
            EntityKind::Invoice | EntityKind::Payment | EntityKind::CreditMemo => {
                UpstreamSystem::Erp
            }
            EntityKind::Deal => UpstreamSystem::Crm,
        }
    }

    /// Record type name as the upstream API spells it
    pub fn wire_name(&self) -> &'static str {
        match self {
            EntityKind::Invoice => "invoice",
            EntityKind::Payment => "payment",
            EntityKind::CreditMemo => "creditmemo",
            EntityKind::Deal => "deal",
        }
    }

    /// Target table for canonical rows of this kind
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Invoice => "invoices",
            EntityKind::Payment => "payments",
            EntityKind::CreditMemo => "credit_memos",
            EntityKind::Deal => "deals",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Invoice => write!(f, "invoice"),
            EntityKind::Payment => write!(f, "payment"),
            EntityKind::CreditMemo => write!(f, "credit_memo"),
            EntityKind::Deal => write!(f, "deal"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "invoice" | "invoices" => Ok(EntityKind::Invoice),
            "payment" | "payments" => Ok(EntityKind::Payment),
            "credit_memo" | "credit-memo" | "creditmemo" | "credit_memos" => {
                Ok(EntityKind::CreditMemo)
            }
            "deal" | "deals" => Ok(EntityKind::Deal),
            other => Err(format!(
                "Unknown entity kind: '{other}'. Expected one of: invoice, payment, credit_memo, deal"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_creation() {
        let id = TenantId::new("acme-eu").unwrap();
        assert_eq!(id.as_str(), "acme-eu");
    }

    #[test]
    fn test_tenant_id_empty_fails() {
        assert!(TenantId::new("").is_err());
        assert!(TenantId::new("   ").is_err());
    }

    #[test]
    fn test_tenant_id_display() {
        let id = TenantId::new("acme-eu").unwrap();
        assert_eq!(format!("{}", id), "acme-eu");
    }

    #[test]
    fn test_upstream_id_creation() {
        let id = UpstreamId::new("INV-2024-0001").unwrap();
        assert_eq!(id.as_str(), "INV-2024-0001");
    }

    #[test]
    fn test_upstream_id_empty_fails() {
        assert!(UpstreamId::new("").is_err());
        assert!(UpstreamId::new("  ").is_err());
    }

    #[test]
    fn test_upstream_id_from_str() {
        let id: UpstreamId = "PAY-77".parse().unwrap();
        assert_eq!(id.as_str(), "PAY-77");
    }

    #[test]
    fn test_entity_kind_system() {
        assert_eq!(EntityKind::Invoice.system(), UpstreamSystem::Erp);
        assert_eq!(EntityKind::Payment.system(), UpstreamSystem::Erp);
        assert_eq!(EntityKind::CreditMemo.system(), UpstreamSystem::Erp);
        assert_eq!(EntityKind::Deal.system(), UpstreamSystem::Crm);
    }

    #[test]
    fn test_entity_kind_tables() {
        assert_eq!(EntityKind::Invoice.table(), "invoices");
        assert_eq!(EntityKind::Payment.table(), "payments");
        assert_eq!(EntityKind::CreditMemo.table(), "credit_memos");
        assert_eq!(EntityKind::Deal.table(), "deals");
    }

    #[test]
    fn test_entity_kind_parse() {
        assert_eq!(
            EntityKind::from_str("invoice").unwrap(),
            EntityKind::Invoice
        );
        assert_eq!(
            EntityKind::from_str("credit-memo").unwrap(),
            EntityKind::CreditMemo
        );
        assert_eq!(EntityKind::from_str("Deals").unwrap(), EntityKind::Deal);
        assert!(EntityKind::from_str("ledger").is_err());
    }

    #[test]
    fn test_entity_kind_order_invoices_before_payments() {
        let all = EntityKind::all();
        let invoice_pos = all.iter().position(|k| *k == EntityKind::Invoice).unwrap();
        let payment_pos = all.iter().position(|k| *k == EntityKind::Payment).unwrap();
        assert!(invoice_pos < payment_pos);
    }

    #[test]
    fn test_entity_kind_serialization() {
        let json = serde_json::to_string(&EntityKind::CreditMemo).unwrap();
        assert_eq!(json, "\"credit_memo\"");
        let back: EntityKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EntityKind::CreditMemo);
    }
}
