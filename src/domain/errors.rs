//! Domain error types
//!
//! This module defines the error hierarchy for LedgerSync. All errors are
//! domain-specific and don't expose third-party types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Main LedgerSync error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream (CRM/ERP) errors
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Storage (PostgreSQL) errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authorization errors (missing or invalid tenant context)
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// The run exceeded its wall-clock budget
    #[error("Sync run exceeded its {budget_secs}s budget at {at}")]
    Timeout {
        budget_secs: u64,
        at: DateTime<Utc>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Upstream-specific errors
///
/// Errors that occur when talking to the CRM or ERP APIs.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport-level failure (connect, TLS, timeout)
    #[error("Request failed: {0}")]
    Http(String),

    /// Non-success HTTP status from the upstream
    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Credentials were rejected
    #[error("Authentication rejected: {0}")]
    Auth(String),
}

/// Storage-specific errors
///
/// Errors that occur when writing to PostgreSQL. The transient/rejected
/// split drives the batch retry policy: only [`StorageError::is_transient`]
/// errors are retried.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Transient unavailability (connection lost, timeout, overload)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the write (constraint or shape problem)
    #[error("Write rejected: {0}")]
    Rejected(String),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(String),

    /// Schema migration failed
    #[error("Schema migration failed: {0}")]
    Migration(String),
}

impl StorageError {
    /// Whether a retry of the same write could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Unavailable(_) | StorageError::Pool(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_display() {
        let err = LedgerError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_upstream_error_conversion() {
        let upstream_err = UpstreamError::Http("Network error".to_string());
        let ledger_err: LedgerError = upstream_err.into();
        assert!(matches!(ledger_err, LedgerError::Upstream(_)));
    }

    #[test]
    fn test_storage_error_conversion() {
        let storage_err = StorageError::Unavailable("connection reset".to_string());
        let ledger_err: LedgerError = storage_err.into();
        assert!(matches!(ledger_err, LedgerError::Storage(_)));
    }

    #[test]
    fn test_storage_error_transient_classification() {
        assert!(StorageError::Unavailable("timeout".to_string()).is_transient());
        assert!(StorageError::Pool("exhausted".to_string()).is_transient());
        assert!(!StorageError::Rejected("null value in column".to_string()).is_transient());
        assert!(!StorageError::Migration("syntax error".to_string()).is_transient());
    }

    #[test]
    fn test_timeout_error_display() {
        let at = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let err = LedgerError::Timeout {
            budget_secs: 1800,
            at,
        };
        assert!(err.to_string().contains("1800s budget"));
        assert!(err.to_string().contains("2024-03-01"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let ledger_err: LedgerError = json_err.into();
        assert!(matches!(ledger_err, LedgerError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let ledger_err: LedgerError = toml_err.into();
        assert!(matches!(ledger_err, LedgerError::Configuration(_)));
        assert!(ledger_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_ledger_error_implements_std_error() {
        let err = LedgerError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_upstream_error_implements_std_error() {
        let err = UpstreamError::Decode("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
