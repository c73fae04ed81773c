//! Audit trail output

pub mod snapshot;

pub use snapshot::SnapshotWriter;
