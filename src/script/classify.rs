//! Character classification and span splitting.
//!
//! A character is Sanskrit iff its code point lies in the Devanagari block.
//! Whitespace, punctuation and digits outside the block are Other, so they are
//! never merged into a neighbouring Sanskrit span.

use serde::{Deserialize, Serialize};

/// First code point of the Devanagari block.
pub const DEVANAGARI_START: u32 = 0x0900;

/// Last code point of the Devanagari block.
pub const DEVANAGARI_END: u32 = 0x097F;

/// Classification of a character or span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptClass {
    /// Devanagari text
    Sanskrit,
    /// Anything else
    Other,
}

impl ScriptClass {
    /// Classify a single character.
    pub fn of(ch: char) -> Self {
        if is_sanskrit_char(ch) {
            ScriptClass::Sanskrit
        } else {
            ScriptClass::Other
        }
    }
}

/// A maximal substring with uniform classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// Classification of every character in the span
    pub class: ScriptClass,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// The span's text
    pub text: &'a str,
}

impl Span<'_> {
    /// Check if this span is Sanskrit.
    pub fn is_sanskrit(&self) -> bool {
        self.class == ScriptClass::Sanskrit
    }
}

/// Return true if the character is in the Devanagari Unicode block.
pub fn is_sanskrit_char(ch: char) -> bool {
    (DEVANAGARI_START..=DEVANAGARI_END).contains(&(ch as u32))
}

/// Return true if the text contains at least one Devanagari character.
pub fn contains_sanskrit(text: &str) -> bool {
    text.chars().any(is_sanskrit_char)
}

/// Split text into maximal spans of Sanskrit and Other characters.
///
/// Spans are ordered, cover the whole input and do not overlap. Empty input
/// yields no spans.
pub fn split_into_spans(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut chars = text.char_indices();
    let Some((_, first)) = chars.next() else {
        return spans;
    };

    let mut class = ScriptClass::of(first);
    let mut start = 0;
    for (offset, ch) in chars {
        let ch_class = ScriptClass::of(ch);
        if ch_class != class {
            spans.push(Span {
                class,
                start,
                end: offset,
                text: &text[start..offset],
            });
            class = ch_class;
            start = offset;
        }
    }
    spans.push(Span {
        class,
        start,
        end: text.len(),
        text: &text[start..],
    });
    spans
}
