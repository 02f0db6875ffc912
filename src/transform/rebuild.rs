//! Run reconstruction.
//!
//! A run whose text mixes scripts is split at every span boundary so that each
//! piece can carry its own font; every piece gets a copy of the source
//! formatting. Adjacent spans are never merged.

use super::FontPolicy;
use crate::model::TextRun;
use crate::script::{
    contains_sanskrit, split_into_spans, ScriptClass, TransliterationError, Transliterator,
};

/// The result of rebuilding one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RebuiltRun {
    /// Replacement runs in span order
    pub runs: Vec<TextRun>,

    /// Number of runs that received the Tamil font
    pub font_overrides: usize,

    pub(crate) modified: bool,
}

impl RebuiltRun {
    fn unchanged(run: &TextRun) -> Self {
        Self {
            runs: vec![run.clone()],
            font_overrides: 0,
            modified: false,
        }
    }

    /// Check if the run's text changed.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Concatenated text of the replacement runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Rebuilds runs by transliterating their Sanskrit spans.
pub struct RunRebuilder<'a, T: ?Sized> {
    transliterator: &'a T,
    font_policy: &'a FontPolicy,
}

impl<'a, T: Transliterator + ?Sized> RunRebuilder<'a, T> {
    /// Create a rebuilder.
    pub fn new(transliterator: &'a T, font_policy: &'a FontPolicy) -> Self {
        Self {
            transliterator,
            font_policy,
        }
    }

    /// Rebuild a run.
    ///
    /// Ineligible runs, runs without Devanagari and runs whose transliterated
    /// text equals the original come back as the original single run. On
    /// failure nothing is produced for the run.
    pub fn rebuild(
        &self,
        run: &TextRun,
        eligible: bool,
    ) -> Result<RebuiltRun, TransliterationError> {
        if !eligible || !contains_sanskrit(&run.text) {
            return Ok(RebuiltRun::unchanged(run));
        }

        let spans = split_into_spans(&run.text);
        let mut runs = Vec::with_capacity(spans.len());
        let mut font_overrides = 0;

        for span in &spans {
            let mut rebuilt = match span.class {
                ScriptClass::Other => run.derive(span.text),
                ScriptClass::Sanskrit => run.derive(self.transliterator.transliterate(span.text)?),
            };
            if self.font_policy.apply(&mut rebuilt, span.text) {
                font_overrides += 1;
            }
            runs.push(rebuilt);
        }

        let rebuilt = RebuiltRun {
            runs,
            font_overrides,
            modified: true,
        };
        if rebuilt.text() == run.text {
            return Ok(RebuiltRun::unchanged(run));
        }
        Ok(rebuilt)
    }
}
