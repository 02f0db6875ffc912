//! Transliteration options and configuration.

use crate::model::TextStyle;
use serde::{Deserialize, Serialize};

/// Font applied to runs that were entirely Sanskrit.
pub const DEFAULT_TAMIL_FONT: &str = "Vijaya";

/// Options for transliterating a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransliterateOptions {
    /// Only runs whose character style name equals this value are eligible
    pub style_filter: Option<String>,

    /// Font for runs that were entirely Sanskrit (None = leave fonts alone)
    pub tamil_font: Option<String>,

    /// Whether results are written back into the document
    pub mode: ProcessMode,
}

impl TransliterateOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict transliteration to runs with the given style name. An empty
    /// name removes the restriction.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        let style = style.into();
        self.style_filter = (!style.trim().is_empty()).then_some(style);
        self
    }

    /// Set the Tamil font. An empty name disables the font override.
    pub fn with_tamil_font(mut self, font: impl Into<String>) -> Self {
        let font = font.into();
        self.tamil_font = (!font.trim().is_empty()).then_some(font);
        self
    }

    /// Never change fonts.
    pub fn without_font(mut self) -> Self {
        self.tamil_font = None;
        self
    }

    /// Set processing mode.
    pub fn with_mode(mut self, mode: ProcessMode) -> Self {
        self.mode = mode;
        self
    }

    /// Only record what would change.
    pub fn dry_run(mut self) -> Self {
        self.mode = ProcessMode::DryRun;
        self
    }

    /// Check if a run with this formatting is subject to transliteration.
    pub fn is_eligible(&self, style: &TextStyle) -> bool {
        match &self.style_filter {
            Some(filter) => style.style_name.as_deref() == Some(filter.as_str()),
            None => true,
        }
    }
}

impl Default for TransliterateOptions {
    fn default() -> Self {
        Self {
            style_filter: None,
            tamil_font: Some(DEFAULT_TAMIL_FONT.to_string()),
            mode: ProcessMode::Apply,
        }
    }
}

/// Whether the walker commits rebuilt runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessMode {
    /// Replace runs in the document
    #[default]
    Apply,
    /// Record changes without touching the document
    DryRun,
}

impl ProcessMode {
    /// Check if this mode writes results back.
    pub fn writes(&self) -> bool {
        matches!(self, ProcessMode::Apply)
    }
}
