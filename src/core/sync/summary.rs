//! Sync run summaries and error reporting

use crate::domain::EntityKind;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Per-entity counters for a single run
#[derive(Debug, Clone, Default)]
pub struct EntityOutcome {
    pub entity: Option<EntityKind>,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub relationships: usize,
}

impl EntityOutcome {
    pub fn new(entity: EntityKind) -> Self {
        Self {
            entity: Some(entity),
            ..Default::default()
        }
    }
}

/// Summary of a sync run
#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub run_id: Uuid,
    pub tenant_id: String,
    pub window: String,
    pub dry_run: bool,
    pub entities: Vec<EntityOutcome>,
    pub snapshot_paths: Vec<PathBuf>,
    pub errors: Vec<SyncError>,
    pub interrupted: bool,
    pub duration: Duration,
}

impl SyncSummary {
    pub fn new(tenant_id: String, window: String, dry_run: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            tenant_id,
            window,
            dry_run,
            entities: Vec::new(),
            snapshot_paths: Vec::new(),
            errors: Vec::new(),
            interrupted: false,
            duration: Duration::ZERO,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn add_entity(&mut self, outcome: EntityOutcome) {
        self.entities.push(outcome);
    }

    pub fn add_error(&mut self, error: SyncError) {
        self.errors.push(error);
    }

    pub fn add_snapshot(&mut self, path: PathBuf) {
        self.snapshot_paths.push(path);
    }

    pub fn total_processed(&self) -> usize {
        self.entities.iter().map(|e| e.processed).sum()
    }

    pub fn total_succeeded(&self) -> usize {
        self.entities.iter().map(|e| e.succeeded).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.entities.iter().map(|e| e.failed).sum()
    }

    pub fn total_relationships(&self) -> usize {
        self.entities.iter().map(|e| e.relationships).sum()
    }

    pub fn is_successful(&self) -> bool {
        !self.interrupted && self.total_failed() == 0 && self.errors.is_empty()
    }

    pub fn success_rate(&self) -> f64 {
        let processed = self.total_processed();
        if processed == 0 {
            return 100.0;
        }
        (self.total_succeeded() as f64 / processed as f64) * 100.0
    }

    /// One-word outcome used in logs and the CLI footer
    pub fn status_label(&self) -> &'static str {
        if self.interrupted {
            "interrupted"
        } else if self.is_successful() {
            "succeeded"
        } else {
            "partial"
        }
    }

    /// Logs the summary at appropriate levels
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            tenant_id = %self.tenant_id,
            window = %self.window,
            dry_run = self.dry_run,
            status = self.status_label(),
            processed = self.total_processed(),
            succeeded = self.total_succeeded(),
            failed = self.total_failed(),
            relationships = self.total_relationships(),
            snapshots = self.snapshot_paths.len(),
            duration_secs = self.duration.as_secs_f64(),
            success_rate = format!("{:.1}%", self.success_rate()),
            "Sync run complete"
        );

        for outcome in &self.entities {
            tracing::info!(
                entity = outcome.entity.map(|e| e.to_string()).unwrap_or_default(),
                processed = outcome.processed,
                succeeded = outcome.succeeded,
                failed = outcome.failed,
                relationships = outcome.relationships,
                "Entity totals"
            );
        }

        for error in &self.errors {
            tracing::warn!(
                error_type = %error.error_type,
                context = error.context.as_deref().unwrap_or(""),
                "Sync error: {}",
                error.message
            );
        }
    }
}

/// Category of a recorded sync error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorType {
    Configuration,
    Upstream,
    Storage,
    Snapshot,
    Validation,
    Unknown,
}

impl std::fmt::Display for SyncErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SyncErrorType::Configuration => "configuration",
            SyncErrorType::Upstream => "upstream",
            SyncErrorType::Storage => "storage",
            SyncErrorType::Snapshot => "snapshot",
            SyncErrorType::Validation => "validation",
            SyncErrorType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// An error recorded against a run without aborting it
#[derive(Debug, Clone)]
pub struct SyncError {
    pub error_type: SyncErrorType,
    pub message: String,
    pub context: Option<String>,
}

impl SyncError {
    pub fn new(error_type: SyncErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
