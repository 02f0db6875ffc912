//! Script detection and transliteration.
//!
//! [`classify`] decides which characters are Sanskrit (Devanagari) and groups
//! them into spans. The [`Transliterator`] trait is the seam to the engine that
//! maps a Sanskrit span to Tamil; [`DevanagariToTamil`] is the built-in engine.

pub mod classify;
mod tamil;

pub use classify::{
    contains_sanskrit, is_sanskrit_char, split_into_spans, ScriptClass, Span, DEVANAGARI_END,
    DEVANAGARI_START,
};
pub use tamil::DevanagariToTamil;

use thiserror::Error;

/// Errors raised by a transliteration engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransliterationError {
    /// A combining sign has no consonant to attach to.
    #[error("malformed Devanagari at offset {offset}: {reason} ({ch:?})")]
    Malformed {
        /// Byte offset within the span
        offset: usize,
        /// The offending character
        ch: char,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Failure reported by an external engine.
    #[error("transliteration engine error: {0}")]
    Engine(String),
}

/// Maps Sanskrit (Devanagari-only) text to its Tamil rendering.
///
/// Called once per maximal Sanskrit span, never on mixed text.
pub trait Transliterator {
    /// Transliterate a Devanagari span.
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError>;
}

impl<F> Transliterator for F
where
    F: Fn(&str) -> Result<String, TransliterationError>,
{
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
        self(text)
    }
}
