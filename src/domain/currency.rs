//! Currency code type
//!
//! [`CurrencyCode`] holds the result of currency normalization: an
//! ISO-4217 code when the upstream spelling was recognized, otherwise the
//! original spelling carried through unchanged so nothing is lost.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized (or passed-through) currency designation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether this looks like an ISO-4217 code (three ASCII letters,
    /// uppercase). Passed-through unknown spellings usually fail this.
    pub fn is_iso_alpha(&self) -> bool {
        self.0.len() == 3 && self.0.chars().all(|c| c.is_ascii_uppercase())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
