//! Table types.

use super::{Block, Paragraph, XmlNode};
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Attributes of the table element
    pub attributes: Vec<(String, String)>,

    /// Rows and preserved markup (table properties, grid) in document order
    pub content: Vec<TableContent>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.content.push(TableContent::Row(row));
    }

    /// Add markup that is carried through untouched.
    pub fn add_preserved(&mut self, node: impl Into<XmlNode>) {
        self.content.push(TableContent::Preserved(node.into()));
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.content.iter().filter_map(|c| match c {
            TableContent::Row(row) => Some(row),
            TableContent::Preserved(_) => None,
        })
    }

    /// Iterate mutably over rows.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut TableRow> {
        self.content.iter_mut().filter_map(|c| match c {
            TableContent::Row(row) => Some(row),
            TableContent::Preserved(_) => None,
        })
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Get the number of cells in each row.
    pub fn shape(&self) -> Vec<usize> {
        self.rows().map(TableRow::cell_count).collect()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Content of a table element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableContent {
    /// A table row
    Row(TableRow),

    /// Markup kept verbatim
    Preserved(XmlNode),
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Attributes of the row element
    pub attributes: Vec<(String, String)>,

    /// Cells and preserved markup (row properties) in document order
    pub content: Vec<RowContent>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            attributes: Vec::new(),
            content: cells.into_iter().map(RowContent::Cell).collect(),
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Iterate over cells.
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.content.iter().filter_map(|c| match c {
            RowContent::Cell(cell) => Some(cell),
            RowContent::Preserved(_) => None,
        })
    }

    /// Iterate mutably over cells.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut TableCell> {
        self.content.iter_mut().filter_map(|c| match c {
            RowContent::Cell(cell) => Some(cell),
            RowContent::Preserved(_) => None,
        })
    }

    /// Get the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Content of a row element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowContent {
    /// A table cell
    Cell(TableCell),

    /// Markup kept verbatim
    Preserved(XmlNode),
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Attributes of the cell element
    pub attributes: Vec<(String, String)>,

    /// Cell content (paragraphs, nested tables, cell properties)
    pub blocks: Vec<Block>,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_paragraphs(vec![Paragraph::with_text(text)])
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a cell with multiple paragraphs.
    pub fn with_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        Self::with_blocks(paragraphs.into_iter().map(Block::Paragraph).collect())
    }

    /// Create a cell with arbitrary blocks.
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            attributes: Vec::new(),
            blocks,
        }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(Block::plain_text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}
