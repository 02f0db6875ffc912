//! Integration tests for document transliteration on the in-memory model.

use std::cell::RefCell;

use sansliterate::transform::{ChangeTracker, DocumentWalker, FontPolicy, RunRebuilder};
use sansliterate::{
    is_sanskrit_char, process_document, transliterate_document, Block, DevanagariToTamil,
    Document, Error, Paragraph, ProcessMode, Table, TableCell, TableRow, TextRun, TextStyle,
    TransliterateOptions, TransliterationError,
};

fn sample_document() -> Document {
    let mut inner = Table::new();
    inner.add_row(TableRow::new(vec![TableCell::with_blocks(vec![
        Block::Paragraph(Paragraph::with_runs([TextRun::styled("ॐ नमः", "Sanskrit")])),
    ])]));

    let mut outer = Table::new();
    outer.add_row(TableRow::new(vec![
        TableCell::text("Verse"),
        TableCell::with_blocks(vec![Block::Table(inner)]),
    ]));

    let mut doc = Document::new();
    doc.add_paragraph(Paragraph::with_runs([
        TextRun::italic("This is मन्त्र text"),
        TextRun::styled("शिवाय", "Sanskrit"),
    ]));
    doc.add_table(outer);
    doc.add_paragraph(Paragraph::with_text("English only, 2024."));
    doc
}

fn shape(doc: &Document) -> Vec<String> {
    doc.body
        .iter()
        .map(|block| match block {
            Block::Paragraph(_) => "p".to_string(),
            Block::Table(t) => format!("tbl{:?}", t.shape()),
            Block::Preserved(_) => "x".to_string(),
        })
        .collect()
}

#[test]
fn test_no_devanagari_left() {
    let mut doc = sample_document();
    let changes = transliterate_document(&mut doc, &TransliterateOptions::default()).unwrap();

    assert!(!doc.plain_text().chars().any(is_sanskrit_char));
    assert_eq!(changes.stats.paragraphs, 4);
    assert_eq!(changes.stats.tables, 2);
    assert_eq!(changes.stats.total_runs, 5);
    assert_eq!(changes.stats.modified_runs, 3);
    assert_eq!(changes.records.len(), 3);
}

#[test]
fn test_non_sanskrit_text_is_kept() {
    let mut doc = sample_document();
    transliterate_document(&mut doc, &TransliterateOptions::default()).unwrap();

    let texts: Vec<String> = doc.paragraphs().iter().map(|p| p.plain_text()).collect();
    assert_eq!(
        texts,
        vec![
            "This is மந்த்ர textஶிவாய",
            "Verse",
            "ஓம் நமஃ",
            "English only, 2024.",
        ]
    );
}

#[test]
fn test_structure_is_unchanged() {
    let mut doc = sample_document();
    let before = shape(&doc);
    let paragraphs = doc.paragraph_count();
    let tables = doc.table_count();

    transliterate_document(&mut doc, &TransliterateOptions::default()).unwrap();

    assert_eq!(shape(&doc), before);
    assert_eq!(doc.paragraph_count(), paragraphs);
    assert_eq!(doc.table_count(), tables);
}

#[test]
fn test_formatting_copied_to_split_runs() {
    let mut doc = sample_document();
    transliterate_document(&mut doc, &TransliterateOptions::default()).unwrap();

    let first = doc.paragraphs()[0];
    let runs: Vec<&TextRun> = first.runs().collect();
    assert_eq!(runs.len(), 4);
    for run in &runs[..3] {
        assert_eq!(run.style.italic, Some(true));
    }
    assert_eq!(runs[0].style.fonts, None);
    assert_eq!(runs[1].style.complex_script_font(), Some("Vijaya"));
    assert_eq!(runs[2].style.fonts, None);

    // Purely Sanskrit run keeps its style and gets the font.
    assert_eq!(runs[3].style.style_name.as_deref(), Some("Sanskrit"));
    assert_eq!(runs[3].style.font_name(), Some("Vijaya"));
}

#[test]
fn test_style_filter() {
    let mut doc = sample_document();
    let options = TransliterateOptions::new().with_style("Sanskrit");
    let changes = transliterate_document(&mut doc, &options).unwrap();

    assert_eq!(changes.stats.eligible_runs, 2);
    assert_eq!(changes.stats.skipped_by_style, 3);
    assert_eq!(changes.stats.modified_runs, 2);

    let texts: Vec<String> = doc.paragraphs().iter().map(|p| p.plain_text()).collect();
    assert_eq!(texts[0], "This is मन्त्र textஶிவாய");
    assert_eq!(texts[2], "ஓம் நமஃ");
}

#[test]
fn test_engine_sees_only_sanskrit_spans() {
    let seen = RefCell::new(Vec::new());
    let engine = |text: &str| {
        seen.borrow_mut().push(text.to_string());
        Ok::<_, TransliterationError>(format!("[{}]", text.chars().count()))
    };

    let mut doc = sample_document();
    process_document(&mut doc, &TransliterateOptions::default(), &engine).unwrap();

    let seen = seen.into_inner();
    assert_eq!(seen, vec!["मन्त्र", "शिवाय", "ॐ", "नमः"]);
    assert!(seen
        .iter()
        .all(|span| span.chars().all(is_sanskrit_char)));
}

#[test]
fn test_dry_run_matches_apply() {
    let mut applied = sample_document();
    let apply = transliterate_document(&mut applied, &TransliterateOptions::default()).unwrap();

    let original = sample_document();
    let mut dry = original.clone();
    let preview =
        transliterate_document(&mut dry, &TransliterateOptions::new().dry_run()).unwrap();

    assert_eq!(dry, original);
    assert_eq!(preview.mode, ProcessMode::DryRun);
    assert_eq!(apply.mode, ProcessMode::Apply);
    assert_eq!(preview.stats, apply.stats);
    assert_eq!(preview.records, apply.records);
}

#[test]
fn test_second_pass_changes_nothing() {
    let mut doc = sample_document();
    transliterate_document(&mut doc, &TransliterateOptions::default()).unwrap();
    let once = doc.clone();

    let changes = transliterate_document(&mut doc, &TransliterateOptions::default()).unwrap();
    assert!(changes.is_empty());
    assert_eq!(doc, once);
}

#[test]
fn test_failure_reports_location() {
    let mut doc = sample_document();
    let engine = |text: &str| match text {
        "नमः" => Err(TransliterationError::Engine("unsupported".to_string())),
        other => Ok(other.to_string() + "!"),
    };

    let err = process_document(&mut doc, &TransliterateOptions::default(), &engine).unwrap_err();
    match err {
        Error::Transliteration { location, text, .. } => {
            assert_eq!(location.to_string(), "body/tbl[1]/tr[0]/tc[1]/tbl[0]/tr[0]/tc[0]/p[0]/r[0]");
            assert_eq!(text, "ॐ नमः");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_walker_with_tracker() {
    let engine = DevanagariToTamil::new();
    let policy = FontPolicy::new(Some("Latha"));
    let options = TransliterateOptions::new().with_tamil_font("Latha");
    let walker = DocumentWalker::new(&options, RunRebuilder::new(&engine, &policy));

    let mut doc = Document::new();
    doc.add_paragraph(Paragraph::with_runs([TextRun::with_style(
        "राम",
        TextStyle {
            bold: Some(true),
            ..Default::default()
        },
    )]));

    let mut tracker = ChangeTracker::new(ProcessMode::Apply);
    walker.walk(&mut doc, &mut tracker).unwrap();

    assert_eq!(tracker.stats().modified_runs, 1);
    assert_eq!(tracker.stats().font_overrides, 1);
    assert_eq!(tracker.records()[0].replacement, "ராம");

    let run = doc.paragraphs()[0].runs().next().cloned().unwrap();
    assert_eq!(run.text, "ராம");
    assert_eq!(run.style.bold, Some(true));
    assert_eq!(run.style.font_name(), Some("Latha"));
}
