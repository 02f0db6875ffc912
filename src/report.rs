//! JSON change report.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::transform::{ChangeSet, ChangeStats, ModificationRecord, ProcessMode};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Outcome of transliterating one file.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeReport {
    /// Mode the file was processed in
    pub mode: ProcessMode,
    /// Input document
    pub input: PathBuf,
    /// Output document (None in dry-run mode)
    pub output: Option<PathBuf>,
    /// When processing finished
    pub generated_at: DateTime<Utc>,
    /// Aggregate counts
    pub stats: ChangeStats,
    /// One record per modified run
    pub records: Vec<ModificationRecord>,
}

impl ChangeReport {
    /// Build a report from a change set.
    pub fn new(input: impl Into<PathBuf>, output: Option<PathBuf>, changes: ChangeSet) -> Self {
        Self {
            mode: changes.mode,
            input: input.into(),
            output,
            generated_at: Utc::now(),
            stats: changes.stats,
            records: changes.records,
        }
    }

    /// Check if the report describes a dry run.
    pub fn is_dry_run(&self) -> bool {
        self.mode == ProcessMode::DryRun
    }

    /// One-line summary of the counts.
    pub fn summary(&self) -> String {
        let verb = if self.is_dry_run() {
            "would be modified"
        } else {
            "modified"
        };
        format!(
            "{} of {} runs {}",
            self.stats.modified_runs, self.stats.total_runs, verb
        )
    }

    /// Convert the report to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };

        result.map_err(|e| Error::Report(format!("JSON serialization error: {}", e)))
    }
}
