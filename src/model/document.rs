//! Document-level types.

use super::{Block, Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A document body: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Body blocks in document order
    pub body: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from blocks.
    pub fn with_blocks(body: Vec<Block>) -> Self {
        Self { body }
    }

    /// Add a block to the body.
    pub fn add_block(&mut self, block: Block) {
        self.body.push(block);
    }

    /// Add a paragraph to the body.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(paragraph));
    }

    /// Add a table to the body.
    pub fn add_table(&mut self, table: Table) {
        self.body.push(Block::Table(table));
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// All paragraphs in document order, including those inside (nested) tables.
    pub fn paragraphs(&self) -> Vec<&Paragraph> {
        fn collect<'a>(blocks: &'a [Block], out: &mut Vec<&'a Paragraph>) {
            for block in blocks {
                match block {
                    Block::Paragraph(p) => out.push(p),
                    Block::Table(t) => {
                        for cell in t.rows().flat_map(|row| row.cells()) {
                            collect(&cell.blocks, out);
                        }
                    }
                    Block::Preserved(_) => {}
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.body, &mut out);
        out
    }

    /// Get the number of paragraphs, including those inside tables.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().len()
    }

    /// Get the number of tables, including nested ones.
    pub fn table_count(&self) -> usize {
        fn count(blocks: &[Block]) -> usize {
            blocks
                .iter()
                .map(|block| match block {
                    Block::Table(t) => {
                        1 + t
                            .rows()
                            .flat_map(|row| row.cells())
                            .map(|cell| count(&cell.blocks))
                            .sum::<usize>()
                    }
                    _ => 0,
                })
                .sum()
        }
        count(&self.body)
    }

    /// Get the number of text runs in all paragraphs.
    pub fn run_count(&self) -> usize {
        self.paragraphs().iter().map(|p| p.run_count()).sum()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.body
            .iter()
            .filter_map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
