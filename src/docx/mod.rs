//! DOCX container support.
//!
//! A [`DocxFile`] keeps every part of the package as loaded. Only the body of
//! the main document part is converted into the [`Document`] model; saving
//! writes the model back into that part and copies everything else verbatim.

mod package;
mod reader;
mod styles;
mod writer;
pub mod xml;

pub use package::{save_atomic, Package, PackageEntry};
pub use styles::StyleSheet;

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::model::Document;
use xml::XmlPart;

/// Run text for `w:noBreakHyphen`.
const NON_BREAKING_HYPHEN: char = '\u{2011}';

/// Run text for `w:softHyphen`.
const SOFT_HYPHEN: char = '\u{00AD}';

/// A loaded DOCX package.
#[derive(Debug, Clone)]
pub struct DocxFile {
    package: Package,
    main_part: String,
    /// Main part with the children of `w:body` moved into `document`
    shell: XmlPart,
    styles: StyleSheet,
    document: Document,
}

impl DocxFile {
    /// Load a DOCX file from disk. The file is only read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            Error::DocumentLoad(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Load a DOCX package from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let package = Package::read(bytes)?;
        let main_part = reader::locate_main_part(&package)?;
        let styles = reader::load_styles(&package, &main_part)?;

        let data = package
            .get(&main_part)
            .ok_or_else(|| Error::DocumentLoad(format!("{} is not a file", main_part)))?;
        let mut shell = XmlPart::parse(data)?;
        let body = shell
            .root
            .child_mut("w:body")
            .ok_or_else(|| Error::DocumentLoad(format!("{} has no w:body", main_part)))?;
        let document = reader::read_body(std::mem::take(&mut body.children), &styles);

        debug!(
            "Loaded {}: {} paragraphs, {} tables, {} runs",
            main_part,
            document.paragraph_count(),
            document.table_count(),
            document.run_count()
        );

        Ok(Self {
            package,
            main_part,
            shell,
            styles,
            document,
        })
    }

    /// Get the document body.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the document body mutably.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Consume the file and return the document body.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Get the name of the main document part.
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// Get the character styles of the document.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Get the underlying package.
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Serialize the package with the current document body.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut part = self.shell.clone();
        let body = part
            .root
            .child_mut("w:body")
            .ok_or_else(|| Error::DocumentSave("main part lost its w:body".to_string()))?;
        body.children = writer::write_blocks(&self.document.body);

        self.package
            .write_with(&self.main_part, &part.to_bytes())
    }

    /// Save the package to `path` atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        save_atomic(path.as_ref(), &bytes)
    }
}
