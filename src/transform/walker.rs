//! Document traversal.

use super::{ChangeTracker, PathSegment, RunLocation, RunRebuilder, TransliterateOptions};
use crate::error::{Error, Result};
use crate::model::{Block, Document, InlineContent, Paragraph, Table};
use crate::script::Transliterator;

/// Walks a document depth-first in document order, rebuilding every run.
///
/// The same classification and rebuild logic runs in both processing modes;
/// only the final replacement of a paragraph's inline content depends on the
/// tracker's mode.
pub struct DocumentWalker<'a, T: ?Sized> {
    options: &'a TransliterateOptions,
    rebuilder: RunRebuilder<'a, T>,
}

impl<'a, T: Transliterator + ?Sized> DocumentWalker<'a, T> {
    /// Create a walker.
    pub fn new(options: &'a TransliterateOptions, rebuilder: RunRebuilder<'a, T>) -> Self {
        Self { options, rebuilder }
    }

    /// Walk the whole document body.
    pub fn walk(&self, document: &mut Document, tracker: &mut ChangeTracker) -> Result<()> {
        let mut path = Vec::new();
        self.walk_blocks(&mut document.body, &mut path, tracker)
    }

    fn walk_blocks(
        &self,
        blocks: &mut [Block],
        path: &mut Vec<PathSegment>,
        tracker: &mut ChangeTracker,
    ) -> Result<()> {
        for (index, block) in blocks.iter_mut().enumerate() {
            match block {
                Block::Paragraph(paragraph) => {
                    path.push(PathSegment::Paragraph(index));
                    self.walk_paragraph(paragraph, path, tracker)?;
                    path.pop();
                }
                Block::Table(table) => {
                    path.push(PathSegment::Table(index));
                    self.walk_table(table, path, tracker)?;
                    path.pop();
                }
                Block::Preserved(_) => {}
            }
        }
        Ok(())
    }

    fn walk_table(
        &self,
        table: &mut Table,
        path: &mut Vec<PathSegment>,
        tracker: &mut ChangeTracker,
    ) -> Result<()> {
        tracker.observe_table();

        for (row_index, row) in table.rows_mut().enumerate() {
            path.push(PathSegment::Row(row_index));
            for (cell_index, cell) in row.cells_mut().enumerate() {
                path.push(PathSegment::Cell(cell_index));
                self.walk_blocks(&mut cell.blocks, path, tracker)?;
                path.pop();
            }
            path.pop();
        }
        Ok(())
    }

    fn walk_paragraph(
        &self,
        paragraph: &mut Paragraph,
        path: &[PathSegment],
        tracker: &mut ChangeTracker,
    ) -> Result<()> {
        tracker.observe_paragraph();

        let writes = tracker.mode().writes();
        let mut content = Vec::with_capacity(paragraph.content.len());
        let mut changed = false;
        let mut run_index = 0;

        for item in &paragraph.content {
            let InlineContent::Text(run) = item else {
                if writes {
                    content.push(item.clone());
                }
                continue;
            };

            let location = RunLocation::new(path.to_vec(), run_index);
            run_index += 1;

            let eligible = self.options.is_eligible(&run.style);
            let rebuilt =
                self.rebuilder
                    .rebuild(run, eligible)
                    .map_err(|source| Error::Transliteration {
                        location: location.clone(),
                        text: run.text.clone(),
                        source,
                    })?;
            tracker.observe_run(location, run, eligible, &rebuilt);

            if rebuilt.is_modified() {
                changed = true;
            }
            if writes {
                content.extend(rebuilt.runs.into_iter().map(InlineContent::Text));
            }
        }

        if writes && changed {
            paragraph.content = content;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TableCell, TableRow, TextRun, XmlElement};
    use crate::script::{DevanagariToTamil, TransliterationError};
    use crate::transform::{FontPolicy, ProcessMode};

    fn walk(doc: &mut Document, options: &TransliterateOptions) -> Result<ChangeTracker> {
        let engine = DevanagariToTamil::new();
        let policy = FontPolicy::new(options.tamil_font.as_deref());
        let walker = DocumentWalker::new(options, RunRebuilder::new(&engine, &policy));
        let mut tracker = ChangeTracker::new(options.mode);
        walker.walk(doc, &mut tracker)?;
        Ok(tracker)
    }

    #[test]
    fn test_preserved_content_keeps_position() {
        let mut paragraph = Paragraph::new();
        paragraph.add_preserved(XmlElement::new("w:pPr"));
        paragraph.add_text("This is मन्त्र text");
        paragraph.add_preserved(XmlElement::new("w:bookmarkEnd"));
        let mut doc = Document::new();
        doc.add_paragraph(paragraph);

        let tracker = walk(&mut doc, &TransliterateOptions::new()).unwrap();
        assert_eq!(tracker.stats().modified_runs, 1);

        let Block::Paragraph(p) = &doc.body[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.content.len(), 5);
        assert!(matches!(p.content[0], InlineContent::Preserved(_)));
        assert!(matches!(p.content[4], InlineContent::Preserved(_)));
        assert_eq!(p.plain_text(), "This is மந்த்ர text");
    }

    #[test]
    fn test_nested_table_locations() {
        let mut inner = Table::new();
        inner.add_row(TableRow::new(vec![TableCell::with_paragraphs(vec![
            Paragraph::with_runs([TextRun::new("x"), TextRun::new("नमः")]),
        ])]));
        let mut outer = Table::new();
        outer.add_row(TableRow::from_strings(["a"]));
        outer.add_row(TableRow::new(vec![
            TableCell::text("b"),
            TableCell::with_blocks(vec![Block::Table(inner)]),
        ]));

        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("intro"));
        doc.add_table(outer);

        let changes = walk(&mut doc, &TransliterateOptions::new())
            .unwrap()
            .finish();
        assert_eq!(changes.stats.tables, 2);
        assert_eq!(changes.stats.paragraphs, 4);
        assert_eq!(changes.records.len(), 1);
        assert_eq!(
            changes.records[0].location.to_string(),
            "body/tbl[1]/tr[1]/tc[1]/tbl[0]/tr[0]/tc[0]/p[0]/r[1]"
        );
        assert_eq!(changes.records[0].replacement, "நமஃ");
    }

    #[test]
    fn test_dry_run_leaves_document() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("मन्त्र"));
        let before = doc.clone();

        let options = TransliterateOptions::new().dry_run();
        let tracker = walk(&mut doc, &options).unwrap();
        assert_eq!(tracker.mode(), ProcessMode::DryRun);
        assert_eq!(tracker.stats().modified_runs, 1);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_failure_reports_location() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("ok"));
        doc.add_paragraph(Paragraph::with_runs([
            TextRun::new("a"),
            TextRun::new("राम"),
        ]));

        let options = TransliterateOptions::new();
        let policy = FontPolicy::disabled();
        let failing = |_: &str| Err::<String, _>(TransliterationError::Engine("down".into()));
        let walker = DocumentWalker::new(&options, RunRebuilder::new(&failing, &policy));
        let mut tracker = ChangeTracker::new(ProcessMode::Apply);

        let err = walker.walk(&mut doc, &mut tracker).unwrap_err();
        match err {
            Error::Transliteration { location, text, .. } => {
                assert_eq!(location.to_string(), "body/p[1]/r[1]");
                assert_eq!(text, "राम");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(doc.paragraphs()[1].plain_text(), "aराम");
    }
}
