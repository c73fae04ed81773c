//! Raw upstream records
//!
//! A [`RawRecord`] is one record exactly as an upstream API returned it,
//! kept schemaless because the two upstreams disagree on field names and
//! types (numbers arrive as JSON numbers or as strings, ids as strings or
//! integers). Accessors are defensive: they coerce where safe and fall
//! back to defaults instead of erroring, so one malformed record never
//! takes down a batch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schemaless record as fetched from an upstream system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wraps an already-parsed JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wraps a JSON value if it is an object, `None` otherwise
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|map| Self(map.clone()))
    }

    /// Raw access to a field
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Field as text. Strings pass through; numbers and booleans are
    /// rendered, since upstream ids sometimes arrive as JSON numbers.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    /// First non-empty text value among candidate field names
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.text(key))
            .find(|s| !s.trim().is_empty())
    }

    /// Field as a number, defaulting to `0.0`
    ///
    /// Accepts JSON numbers and numeric strings. Absent, null, empty or
    /// unparseable values all read as zero.
    pub fn number(&self, key: &str) -> f64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// First field among candidates that yields a non-zero number, else `0.0`
    pub fn first_number(&self, keys: &[&str]) -> f64 {
        keys.iter()
            .map(|key| self.number(key))
            .find(|n| *n != 0.0)
            .unwrap_or(0.0)
    }

    /// Field as an array slice, if present and an array
    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.0.get(key).and_then(|v| v.as_array())
    }

    /// The underlying field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes self and returns the inner map
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
