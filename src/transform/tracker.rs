//! Change tracking shared by the applying and dry-run paths.

use std::fmt;

use log::debug;
use serde::{Serialize, Serializer};

use super::{ProcessMode, RebuiltRun};
use crate::model::TextRun;

/// One step of a path from the document body to a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Paragraph at this block index
    Paragraph(usize),
    /// Table at this block index
    Table(usize),
    /// Row index within a table
    Row(usize),
    /// Cell index within a row
    Cell(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Paragraph(i) => write!(f, "p[{}]", i),
            PathSegment::Table(i) => write!(f, "tbl[{}]", i),
            PathSegment::Row(i) => write!(f, "tr[{}]", i),
            PathSegment::Cell(i) => write!(f, "tc[{}]", i),
        }
    }
}

/// Location of a run: the path to its paragraph and its index among the
/// paragraph's runs before rebuilding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunLocation {
    /// Path from the body to the paragraph
    pub path: Vec<PathSegment>,
    /// Run index within the paragraph
    pub run: usize,
}

impl RunLocation {
    /// Create a new run location.
    pub fn new(path: Vec<PathSegment>, run: usize) -> Self {
        Self { path, run }
    }
}

impl fmt::Display for RunLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("body")?;
        for segment in &self.path {
            write!(f, "/{}", segment)?;
        }
        write!(f, "/r[{}]", self.run)
    }
}

impl Serialize for RunLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A run whose text changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModificationRecord {
    /// Where the run lives
    pub location: RunLocation,
    /// Text before transliteration
    pub original: String,
    /// Text after transliteration
    pub replacement: String,
    /// Number of runs the original was rebuilt into
    pub runs: usize,
    /// Number of rebuilt runs that received the Tamil font
    pub font_overrides: usize,
}

/// Aggregate counts collected during a traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeStats {
    /// Paragraphs visited, including those in tables
    pub paragraphs: usize,
    /// Tables visited, including nested ones
    pub tables: usize,
    /// Runs visited
    pub total_runs: usize,
    /// Runs selected by the style filter (all runs without one)
    pub eligible_runs: usize,
    /// Runs excluded by the style filter
    pub skipped_by_style: usize,
    /// Runs whose text changed
    pub modified_runs: usize,
    /// Runs emitted in place of modified runs
    pub rebuilt_runs: usize,
    /// Rebuilt runs that received the Tamil font
    pub font_overrides: usize,
}

/// Records every rebuild decision of a traversal.
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    mode: ProcessMode,
    stats: ChangeStats,
    records: Vec<ModificationRecord>,
}

impl ChangeTracker {
    /// Create a tracker for the given mode.
    pub fn new(mode: ProcessMode) -> Self {
        Self {
            mode,
            stats: ChangeStats::default(),
            records: Vec::new(),
        }
    }

    /// Get the processing mode.
    pub fn mode(&self) -> ProcessMode {
        self.mode
    }

    /// Get the statistics so far.
    pub fn stats(&self) -> &ChangeStats {
        &self.stats
    }

    /// Get the modification records so far.
    pub fn records(&self) -> &[ModificationRecord] {
        &self.records
    }

    pub(crate) fn observe_paragraph(&mut self) {
        self.stats.paragraphs += 1;
    }

    pub(crate) fn observe_table(&mut self) {
        self.stats.tables += 1;
    }

    pub(crate) fn observe_run(
        &mut self,
        location: RunLocation,
        original: &TextRun,
        eligible: bool,
        rebuilt: &RebuiltRun,
    ) {
        self.stats.total_runs += 1;
        if eligible {
            self.stats.eligible_runs += 1;
        } else {
            self.stats.skipped_by_style += 1;
        }
        if !rebuilt.is_modified() {
            return;
        }

        let replacement = rebuilt.text();
        debug!(
            "Run modified at {}: {:?} -> {:?}",
            location, original.text, replacement
        );

        self.stats.modified_runs += 1;
        self.stats.rebuilt_runs += rebuilt.runs.len();
        self.stats.font_overrides += rebuilt.font_overrides;
        self.records.push(ModificationRecord {
            location,
            original: original.text.clone(),
            replacement,
            runs: rebuilt.runs.len(),
            font_overrides: rebuilt.font_overrides,
        });
    }

    /// Finish tracking and return the collected changes.
    pub fn finish(self) -> ChangeSet {
        ChangeSet {
            mode: self.mode,
            stats: self.stats,
            records: self.records,
        }
    }
}

/// Everything a traversal changed, or would change in dry-run mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    /// Mode the traversal ran in
    pub mode: ProcessMode,
    /// Aggregate counts
    pub stats: ChangeStats,
    /// One record per modified run, in document order
    pub records: Vec<ModificationRecord>,
}

impl ChangeSet {
    /// Check if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let location = RunLocation::new(
            vec![
                PathSegment::Table(1),
                PathSegment::Row(0),
                PathSegment::Cell(2),
                PathSegment::Paragraph(0),
            ],
            3,
        );
        assert_eq!(location.to_string(), "body/tbl[1]/tr[0]/tc[2]/p[0]/r[3]");
        assert_eq!(
            serde_json::to_string(&location).unwrap(),
            "\"body/tbl[1]/tr[0]/tc[2]/p[0]/r[3]\""
        );
    }

    #[test]
    fn test_tracker_counts() {
        let mut tracker = ChangeTracker::new(ProcessMode::DryRun);
        tracker.observe_paragraph();

        let skipped = TextRun::styled("मन्त्र", "Normal");
        let unchanged = RebuiltRun {
            runs: vec![skipped.clone()],
            font_overrides: 0,
            modified: false,
        };
        tracker.observe_run(
            RunLocation::new(vec![PathSegment::Paragraph(0)], 0),
            &skipped,
            false,
            &unchanged,
        );

        let original = TextRun::new("मन्त्र");
        let rebuilt = RebuiltRun {
            runs: vec![original.derive("மந்த்ர")],
            font_overrides: 1,
            modified: true,
        };
        tracker.observe_run(
            RunLocation::new(vec![PathSegment::Paragraph(0)], 1),
            &original,
            true,
            &rebuilt,
        );

        let changes = tracker.finish();
        assert_eq!(changes.mode, ProcessMode::DryRun);
        assert_eq!(changes.stats.paragraphs, 1);
        assert_eq!(changes.stats.total_runs, 2);
        assert_eq!(changes.stats.eligible_runs, 1);
        assert_eq!(changes.stats.skipped_by_style, 1);
        assert_eq!(changes.stats.modified_runs, 1);
        assert_eq!(changes.stats.font_overrides, 1);
        assert_eq!(changes.records.len(), 1);
        assert_eq!(changes.records[0].original, "मन्त्र");
        assert_eq!(changes.records[0].replacement, "மந்த்ர");
        assert_eq!(changes.records[0].location.to_string(), "body/p[0]/r[1]");
    }
}
