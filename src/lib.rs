//! # sansliterate
//!
//! Transliterate Sanskrit (Devanagari) text inside DOCX documents to Tamil
//! script while leaving every other character and all formatting unchanged.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sansliterate::Sansliterate;
//!
//! fn main() -> sansliterate::Result<()> {
//!     // Writes stotram_ta.docx next to the input
//!     let report = Sansliterate::new()
//!         .with_style("Sanskrit")
//!         .with_tamil_font("Latha")
//!         .run("stotram.docx")?;
//!
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! - Every run of every paragraph, including paragraphs inside (nested)
//!   tables, is split into maximal Devanagari and non-Devanagari spans.
//! - Only the Devanagari spans go through the [`Transliterator`]; everything
//!   else is copied through.
//! - A run with mixed scripts is rebuilt as one run per span, each with a copy
//!   of the original formatting.
//! - Runs that were purely Sanskrit get the configured Tamil font.
//! - A dry run goes through the same code path and only reports.

pub mod detect;
pub mod docx;
pub mod error;
pub mod model;
pub mod report;
pub mod script;
pub mod transform;

// Re-export commonly used types
pub use detect::{check_package_header, has_docx_extension, is_docx};
pub use docx::DocxFile;
pub use error::{Error, Result};
pub use model::{
    Block, Document, InlineContent, Paragraph, RunFonts, Table, TableCell, TableRow, TextRun,
    TextStyle, XmlElement, XmlNode,
};
pub use report::{ChangeReport, JsonFormat};
pub use script::{
    contains_sanskrit, is_sanskrit_char, split_into_spans, DevanagariToTamil, ScriptClass, Span,
    TransliterationError, Transliterator,
};
pub use transform::{
    process_document, ChangeSet, ChangeStats, ModificationRecord, ProcessMode, RunLocation,
    TransliterateOptions, DEFAULT_TAMIL_FONT,
};

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

/// Transliterate a DOCX file with default options.
///
/// The result is written to [`default_output_path`] of the input.
///
/// # Example
///
/// ```no_run
/// use sansliterate::transliterate_file;
///
/// let report = transliterate_file("stotram.docx").unwrap();
/// println!("{}", report.summary());
/// ```
pub fn transliterate_file<P: AsRef<Path>>(input: P) -> Result<ChangeReport> {
    Sansliterate::new().run(input)
}

/// Transliterate an in-memory document with the built-in transliterator.
///
/// # Example
///
/// ```
/// use sansliterate::{transliterate_document, Document, Paragraph, TransliterateOptions};
///
/// let mut doc = Document::new();
/// doc.add_paragraph(Paragraph::with_text("This is मन्त्र text"));
///
/// let changes = transliterate_document(&mut doc, &TransliterateOptions::default()).unwrap();
/// assert_eq!(changes.stats.modified_runs, 1);
/// assert_eq!(doc.plain_text(), "This is மந்த்ர text");
/// ```
pub fn transliterate_document(
    document: &mut Document,
    options: &TransliterateOptions,
) -> Result<ChangeSet> {
    process_document(document, options, &DevanagariToTamil::new())
}

/// Default output path: `<input_stem>_ta<suffix>` next to the input, with
/// `.docx` as suffix when the input has none.
///
/// # Example
///
/// ```
/// use sansliterate::default_output_path;
/// use std::path::Path;
///
/// assert_eq!(
///     default_output_path("docs/stotram.docx"),
///     Path::new("docs/stotram_ta.docx")
/// );
/// ```
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = match input.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => ".docx".to_string(),
    };
    input.with_file_name(format!("{}_ta{}", stem, suffix))
}

/// Builder for transliterating DOCX files.
///
/// # Example
///
/// ```no_run
/// use sansliterate::Sansliterate;
///
/// let report = Sansliterate::new()
///     .with_style("Sanskrit")
///     .dry_run()
///     .run("stotram.docx")?;
/// println!("{}", report.to_json(sansliterate::JsonFormat::Pretty)?);
/// # Ok::<(), sansliterate::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sansliterate {
    options: TransliterateOptions,
    strict: bool,
    output: Option<PathBuf>,
}

impl Sansliterate {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only transliterate runs whose character style name equals `style`.
    /// An empty name removes the restriction.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.options = self.options.with_style(style);
        self
    }

    /// Set the Tamil font. An empty name disables the font override.
    pub fn with_tamil_font(mut self, font: impl Into<String>) -> Self {
        self.options = self.options.with_tamil_font(font);
        self
    }

    /// Never change fonts.
    pub fn without_font(mut self) -> Self {
        self.options = self.options.without_font();
        self
    }

    /// Report what would change without writing anything.
    pub fn dry_run(mut self) -> Self {
        self.options = self.options.dry_run();
        self
    }

    /// Reject malformed Devanagari sequences instead of passing them through.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Set the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Get the transliteration options.
    pub fn options(&self) -> &TransliterateOptions {
        &self.options
    }

    /// Get the output path for `input`.
    pub fn output_path<P: AsRef<Path>>(&self, input: P) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(input))
    }

    /// Get the built-in transliterator configured by this builder.
    pub fn transliterator(&self) -> DevanagariToTamil {
        if self.strict {
            DevanagariToTamil::strict()
        } else {
            DevanagariToTamil::new()
        }
    }

    /// Transliterate an in-memory document.
    pub fn process(&self, document: &mut Document) -> Result<ChangeSet> {
        process_document(document, &self.options, &self.transliterator())
    }

    /// Transliterate a DOCX file with the built-in transliterator.
    pub fn run<P: AsRef<Path>>(&self, input: P) -> Result<ChangeReport> {
        self.run_with(input, &self.transliterator())
    }

    /// Transliterate a DOCX file with a custom transliterator.
    ///
    /// The input is only read. Outside dry-run mode the result is saved
    /// atomically to the output path, which must differ from the input.
    pub fn run_with<P, T>(&self, input: P, transliterator: &T) -> Result<ChangeReport>
    where
        P: AsRef<Path>,
        T: Transliterator + ?Sized,
    {
        let input = input.as_ref();
        if !input.is_file() {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }
        if !has_docx_extension(input) {
            warn!(
                "Input file does not have a .docx extension: {} (continuing anyway)",
                input.display()
            );
        }

        let writes = self.options.mode.writes();
        let output = self.output_path(input);
        if writes {
            if same_file(input, &output) {
                return Err(Error::SameInputOutput(output));
            }
            if let Some(dir) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
        } else {
            info!("Running in dry-run mode; no files will be modified.");
        }

        info!("Loading document: {}", input.display());
        check_package_header(input)?;
        let mut docx = DocxFile::open(input)?;

        let changes = process_document(docx.document_mut(), &self.options, transliterator)?;

        if writes {
            info!("Saving transliterated document to: {}", output.display());
            docx.save(&output)?;
            match DocxFile::open(&output) {
                Ok(_) => info!("Successfully saved and re-opened output document."),
                Err(e) => warn!("Output document saved but could not be re-opened: {}", e),
            }
        } else {
            info!(
                "Dry-run complete. {} of {} runs would be modified.",
                changes.stats.modified_runs, changes.stats.total_runs
            );
        }

        Ok(ChangeReport::new(input, writes.then_some(output), changes))
    }
}

/// Check if two paths name the same file, following symlinks and resolving
/// relative paths. The second path does not need to exist.
fn same_file(existing: &Path, candidate: &Path) -> bool {
    match (fs::canonicalize(existing), resolve(candidate)) {
        (Ok(a), Some(b)) => a == b,
        _ => false,
    }
}

fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = fs::canonicalize(path) {
        return Some(resolved);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => env::current_dir().ok()?,
    };
    let parent = fs::canonicalize(&parent).unwrap_or(parent);
    Some(parent.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let builder = Sansliterate::new()
            .with_style("Sanskrit")
            .with_tamil_font("Latha")
            .dry_run()
            .strict();

        assert_eq!(builder.options().style_filter.as_deref(), Some("Sanskrit"));
        assert_eq!(builder.options().tamil_font.as_deref(), Some("Latha"));
        assert_eq!(builder.options().mode, ProcessMode::DryRun);
        assert!(builder.transliterator().is_strict());
    }

    #[test]
    fn test_builder_default() {
        let builder = Sansliterate::default();
        assert_eq!(builder.options().tamil_font.as_deref(), Some(DEFAULT_TAMIL_FONT));
        assert_eq!(builder.options().mode, ProcessMode::Apply);
        assert!(!builder.transliterator().is_strict());
        assert_eq!(
            Sansliterate::new().without_font().options().tamil_font,
            None
        );
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(default_output_path("a/b.docx"), PathBuf::from("a/b_ta.docx"));
        assert_eq!(default_output_path("a/b"), PathBuf::from("a/b_ta.docx"));
        assert_eq!(default_output_path("notes.DOCX"), PathBuf::from("notes_ta.DOCX"));
        assert_eq!(default_output_path("x.tar.docx"), PathBuf::from("x.tar_ta.docx"));
    }

    #[test]
    fn test_output_override() {
        let builder = Sansliterate::new().with_output("out/result.docx");
        assert_eq!(builder.output_path("in.docx"), PathBuf::from("out/result.docx"));
    }

    #[test]
    fn test_missing_input() {
        let err = Sansliterate::new().run("does/not/exist.docx").unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[test]
    fn test_same_input_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.docx");
        fs::write(&input, b"PK\x03\x04").unwrap();

        let err = Sansliterate::new()
            .with_output(dir.path().join(".").join("doc.docx"))
            .run(&input)
            .unwrap_err();
        assert!(matches!(err, Error::SameInputOutput(_)));
    }

    #[test]
    fn test_not_a_package() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.docx");
        fs::write(&input, b"plain text").unwrap();

        let err = Sansliterate::new().run(&input).unwrap_err();
        assert!(err.is_load_error());
        assert!(!dir.path().join("doc_ta.docx").exists());
    }

    #[test]
    fn test_process_in_memory() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("ि"));
        assert!(Sansliterate::new().process(&mut doc.clone()).is_ok());

        let err = Sansliterate::new().strict().process(&mut doc).unwrap_err();
        assert!(matches!(err, Error::Transliteration { .. }));
    }
}
