//! CSV audit snapshots
//!
//! Every run can write what it fetched and what it persisted to
//! timestamped CSV files, one file per (label, run). Snapshot failures
//! are reported by the caller but never abort persistence; the run's
//! correctness does not depend on the audit trail.

use crate::domain::record::RawRecord;
use crate::domain::relationship::ApplyRelationship;
use crate::domain::row::CanonicalRow;
use crate::domain::{LedgerError, Result};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Writes labeled CSV snapshots into a backup directory
///
/// The timestamp is fixed at construction so every file written for one
/// run carries the same stamp.
pub struct SnapshotWriter {
    dir: PathBuf,
    stamp: String,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        // Colons and periods would not survive every filesystem
        let stamp = Utc::now()
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .replace([':', '.'], "-");

        Self {
            dir: dir.into(),
            stamp,
        }
    }

    /// The run timestamp embedded in every file name
    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    /// Snapshot raw upstream records
    ///
    /// Returns the written path, or `None` for an empty record set.
    pub fn write_raw(&self, label: &str, records: &[RawRecord]) -> Result<Option<PathBuf>> {
        let maps: Vec<&Map<String, Value>> = records.iter().map(|r| r.fields()).collect();
        self.write_maps(label, &maps)
    }

    /// Snapshot canonical rows
    pub fn write_rows(&self, label: &str, rows: &[CanonicalRow]) -> Result<Option<PathBuf>> {
        let mut owned = Vec::with_capacity(rows.len());
        for row in rows {
            owned.push(to_object(row)?);
        }
        let maps: Vec<&Map<String, Value>> = owned.iter().collect();
        self.write_maps(label, &maps)
    }

    /// Snapshot payment-to-invoice application rows
    pub fn write_relationships(
        &self,
        label: &str,
        relationships: &[ApplyRelationship],
    ) -> Result<Option<PathBuf>> {
        let mut owned = Vec::with_capacity(relationships.len());
        for relationship in relationships {
            owned.push(to_object(relationship)?);
        }
        let maps: Vec<&Map<String, Value>> = owned.iter().collect();
        self.write_maps(label, &maps)
    }

    fn write_maps(&self, label: &str, records: &[&Map<String, Value>]) -> Result<Option<PathBuf>> {
        if records.is_empty() {
            return Ok(None);
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to create backup directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.dir.join(format!("{}_{}.csv", label, self.stamp));
        write_csv(&path, records)?;

        tracing::info!(
            label = label,
            path = %path.display(),
            rows = records.len(),
            "Audit snapshot written"
        );

        Ok(Some(path))
    }
}

fn to_object<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(LedgerError::Serialization(format!(
            "Snapshot record serialized to non-object JSON: {}",
            other
        ))),
    }
}

/// Writes one CSV file: a sorted union-of-keys header, then one line per
/// record. Nested values are serialized as inline JSON text; the CSV
/// writer handles quoting and escaping.
fn write_csv(path: &Path, records: &[&Map<String, Value>]) -> Result<()> {
    let mut columns = BTreeSet::new();
    for record in records {
        for key in record.keys() {
            columns.insert(key.clone());
        }
    }
    let columns: Vec<String> = columns.into_iter().collect();

    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        LedgerError::Io(format!("Failed to open snapshot {}: {}", path.display(), e))
    })?;

    writer
        .write_record(&columns)
        .map_err(|e| LedgerError::Io(format!("Failed to write snapshot header: {}", e)))?;

    for record in records {
        let mut fields = Vec::with_capacity(columns.len());
        for column in &columns {
            fields.push(render_field(record.get(column))?);
        }
        writer
            .write_record(&fields)
            .map_err(|e| LedgerError::Io(format!("Failed to write snapshot row: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to flush snapshot: {}", e)))?;

    Ok(())
}

/// One CSV cell for one JSON value
fn render_field(value: Option<&Value>) -> Result<String> {
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(nested) => serde_json::to_string(nested)?,
    })
}
