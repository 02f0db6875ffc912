//! Document model types.
//!
//! This module defines the in-memory tree the transliterator walks: a body of
//! blocks (paragraphs, tables, preserved markup), paragraphs of inline content,
//! and runs carrying an explicit formatting value. The model is independent of
//! the container it was loaded from; anything it does not interpret is kept as
//! an [`XmlNode`] and written back unchanged.

mod block;
mod document;
mod paragraph;
mod table;
mod xml;

pub use block::Block;
pub use document::Document;
pub use paragraph::{InlineContent, Paragraph, RunFonts, TextRun, TextStyle};
pub use table::{RowContent, Table, TableCell, TableContent, TableRow};
pub use xml::{XmlElement, XmlNode};
