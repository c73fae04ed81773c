//! Result type alias for LedgerSync
//!
//! This module provides a convenient Result type alias that uses LedgerError
//! as the error type.

use super::errors::LedgerError;

/// Result type alias for LedgerSync operations
///
/// This is a convenience type alias that uses `LedgerError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use ledgersync::domain::result::Result;
/// use ledgersync::domain::errors::LedgerError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LedgerError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LedgerError>;
