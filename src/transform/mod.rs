//! Sanskrit-to-Tamil transformation of a document.
//!
//! The walker visits every run; the rebuilder splits a run into script spans,
//! transliterates the Sanskrit ones and applies the font policy; the tracker
//! records every change.

mod font;
mod options;
mod rebuild;
mod tracker;
mod walker;

pub use font::FontPolicy;
pub use options::{ProcessMode, TransliterateOptions, DEFAULT_TAMIL_FONT};
pub use rebuild::{RebuiltRun, RunRebuilder};
pub use tracker::{
    ChangeSet, ChangeStats, ChangeTracker, ModificationRecord, PathSegment, RunLocation,
};
pub use walker::DocumentWalker;

use crate::error::Result;
use crate::model::Document;
use crate::script::Transliterator;
use log::info;

/// Transliterate every eligible run of a document.
///
/// In [`ProcessMode::DryRun`] the document is left untouched and the returned
/// change set describes what would have changed. On error, paragraphs
/// processed before the failing run may already have been replaced.
pub fn process_document<T: Transliterator + ?Sized>(
    document: &mut Document,
    options: &TransliterateOptions,
    transliterator: &T,
) -> Result<ChangeSet> {
    let font_policy = FontPolicy::new(options.tamil_font.as_deref());
    let walker = DocumentWalker::new(options, RunRebuilder::new(transliterator, &font_policy));
    let mut tracker = ChangeTracker::new(options.mode);

    walker.walk(document, &mut tracker)?;

    let changes = tracker.finish();
    info!(
        "Processed {} runs, modified {} runs",
        changes.stats.total_runs, changes.stats.modified_runs
    );
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, TextRun};
    use crate::script::DevanagariToTamil;

    #[test]
    fn test_process_document_counts() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_runs([
            TextRun::new("This is मन्त्र text"),
            TextRun::styled("नमः", "Sanskrit"),
            TextRun::new("plain"),
        ]));

        let options = TransliterateOptions::new().with_style("Sanskrit");
        let changes = process_document(&mut doc, &options, &DevanagariToTamil::new()).unwrap();

        assert_eq!(changes.stats.total_runs, 3);
        assert_eq!(changes.stats.eligible_runs, 1);
        assert_eq!(changes.stats.skipped_by_style, 2);
        assert_eq!(changes.stats.modified_runs, 1);
        assert_eq!(changes.stats.font_overrides, 1);
        assert_eq!(doc.plain_text(), "This is मन्त्र textநமஃplain");
    }
}
