//! Currency normalization
//!
//! Upstreams spell currencies however they like ("US Dollar", "usd",
//! "Euros"); storage wants ISO-4217 codes. [`CurrencyTable`] is built
//! once at startup from the builtin name table merged with configured
//! aliases, then shared immutably by every transformer in the run.

use crate::domain::currency::CurrencyCode;
use std::collections::HashMap;

/// Builtin spelling table. Each entry maps one upstream spelling to its
/// ISO-4217 code; the codes themselves are listed so normalization is
/// idempotent on already-normalized input.
const BUILTIN_NAMES: &[(&str, &str)] = &[
    ("USD", "USD"),
    ("US Dollar", "USD"),
    ("US Dollars", "USD"),
    ("U.S. Dollar", "USD"),
    ("United States Dollar", "USD"),
    ("EUR", "EUR"),
    ("Euro", "EUR"),
    ("Euros", "EUR"),
    ("GBP", "GBP"),
    ("British Pound", "GBP"),
    ("Pound Sterling", "GBP"),
    ("British Pound Sterling", "GBP"),
    ("CAD", "CAD"),
    ("Canadian Dollar", "CAD"),
    ("AUD", "AUD"),
    ("Australian Dollar", "AUD"),
    ("CHF", "CHF"),
    ("Swiss Franc", "CHF"),
    ("JPY", "JPY"),
    ("Japanese Yen", "JPY"),
    ("Yen", "JPY"),
    ("CNY", "CNY"),
    ("Chinese Yuan", "CNY"),
    ("Yuan Renminbi", "CNY"),
    ("Renminbi", "CNY"),
    ("SEK", "SEK"),
    ("Swedish Krona", "SEK"),
    ("NOK", "NOK"),
    ("Norwegian Krone", "NOK"),
    ("DKK", "DKK"),
    ("Danish Krone", "DKK"),
    ("NZD", "NZD"),
    ("New Zealand Dollar", "NZD"),
    ("MXN", "MXN"),
    ("Mexican Peso", "MXN"),
    ("SGD", "SGD"),
    ("Singapore Dollar", "SGD"),
    ("HKD", "HKD"),
    ("Hong Kong Dollar", "HKD"),
    ("INR", "INR"),
    ("Indian Rupee", "INR"),
    ("BRL", "BRL"),
    ("Brazilian Real", "BRL"),
    ("ZAR", "ZAR"),
    ("South African Rand", "ZAR"),
    ("PLN", "PLN"),
    ("Polish Zloty", "PLN"),
    ("CZK", "CZK"),
    ("Czech Koruna", "CZK"),
];

/// Immutable spelling-to-code lookup
///
/// Normalization is total: unknown spellings pass through unchanged with
/// a warning so a novel upstream currency never fails a batch, and the
/// unresolved spelling stays visible for manual review.
pub struct CurrencyTable {
    /// Exact spellings
    entries: HashMap<String, String>,
    /// Case-folded spellings for the fallback lookup
    folded: HashMap<String, String>,
}

impl CurrencyTable {
    /// Table with only the builtin spellings
    pub fn builtin() -> Self {
        Self::with_aliases(&HashMap::new())
    }

    /// Table with builtin spellings plus configured aliases
    ///
    /// Aliases win over builtin entries with the same spelling, so a
    /// deployment can repoint a spelling the builtin table gets wrong
    /// for its upstreams.
    pub fn with_aliases(aliases: &HashMap<String, String>) -> Self {
        let mut entries = HashMap::new();
        let mut folded = HashMap::new();

        for (name, code) in BUILTIN_NAMES {
            entries.insert((*name).to_string(), (*code).to_string());
            folded.insert(name.to_lowercase(), (*code).to_string());
        }

        for (name, code) in aliases {
            entries.insert(name.clone(), code.clone());
            folded.insert(name.to_lowercase(), code.clone());
        }

        Self { entries, folded }
    }

    /// Normalizes one upstream currency spelling
    ///
    /// Exact match first, then case-insensitive. Unknown spellings are
    /// returned unchanged; empty input passes through without noise.
    pub fn normalize(&self, name: &str) -> CurrencyCode {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return CurrencyCode::new(name);
        }

        if let Some(code) = self.entries.get(trimmed) {
            return CurrencyCode::new(code.clone());
        }

        if let Some(code) = self.folded.get(&trimmed.to_lowercase()) {
            return CurrencyCode::new(code.clone());
        }

        tracing::warn!(
            currency = %name,
            "Unrecognized currency spelling; passing through for manual review"
        );
        CurrencyCode::new(name)
    }

    /// Number of known spellings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::builtin()
    }
}
