//! Tamil font override for rebuilt runs.

use crate::model::{RunFonts, TextRun};
use crate::script::is_sanskrit_char;

/// Decides whether a rebuilt run gets the configured Tamil font.
///
/// A run can carry only one font, so the override is applied only to runs
/// whose source text was purely Sanskrit; mixed runs keep their fonts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontPolicy {
    font: Option<String>,
}

impl FontPolicy {
    /// Create a policy applying `font`. An empty name disables the override.
    pub fn new(font: Option<&str>) -> Self {
        Self {
            font: font
                .filter(|name| !name.trim().is_empty())
                .map(str::to_string),
        }
    }

    /// Create a policy that never changes fonts.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Get the configured font name.
    pub fn font(&self) -> Option<&str> {
        self.font.as_deref()
    }

    /// Check if text qualifies for the override: non-empty, containing
    /// Devanagari, and no alphabetic character outside the Devanagari block.
    pub fn qualifies(source_text: &str) -> bool {
        let mut has_sanskrit = false;
        for ch in source_text.chars() {
            if is_sanskrit_char(ch) {
                has_sanskrit = true;
            } else if ch.is_alphabetic() {
                return false;
            }
        }
        has_sanskrit
    }

    /// Apply the font to `run` if its source text qualifies. Returns whether
    /// the font was overridden.
    pub fn apply(&self, run: &mut TextRun, source_text: &str) -> bool {
        let Some(font) = self.font.as_deref() else {
            return false;
        };
        if !Self::qualifies(source_text) {
            return false;
        }
        run.style
            .fonts
            .get_or_insert_with(RunFonts::default)
            .apply_complex_script_font(font);
        true
    }
}
