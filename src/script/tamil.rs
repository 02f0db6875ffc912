//! Built-in Devanagari to Tamil transliteration.
//!
//! Tamil has no letters for aspirated or voiced stops, so those consonants map
//! onto the nearest Tamil letter followed by a superscript digit (², ³, ⁴), the
//! convention used in Tamil editions of Sanskrit texts. The digit is written
//! after the vowel sign or virama that belongs to the consonant. Dandas are
//! shared by both scripts and pass through unchanged, as does any Devanagari
//! character without a Tamil counterpart.

use super::{TransliterationError, Transliterator};

const VIRAMA: char = '\u{094D}';
const NUKTA: char = '\u{093C}';
const TAMIL_VIRAMA: char = '்';

/// Table-driven Devanagari to Tamil transliterator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DevanagariToTamil {
    strict: bool,
}

impl DevanagariToTamil {
    /// Create a lenient transliterator: a vowel sign or virama with no
    /// consonant before it (a cluster split across runs) is rendered as the
    /// bare Tamil sign.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strict transliterator that rejects orphaned combining signs.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Check if this transliterator rejects orphaned combining signs.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn orphan(
        &self,
        offset: usize,
        ch: char,
        reason: &'static str,
    ) -> Result<(), TransliterationError> {
        if self.strict {
            Err(TransliterationError::Malformed { offset, ch, reason })
        } else {
            Ok(())
        }
    }
}

impl Transliterator for DevanagariToTamil {
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
        let mut out = String::with_capacity(text.len() * 2);
        let mut chars = text.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            if let Some((base, marker)) = consonant(ch) {
                out.push_str(base);
                while chars.next_if(|&(_, next)| next == NUKTA).is_some() {}

                let sign = match chars.peek() {
                    Some(&(_, VIRAMA)) => Some("்"),
                    Some(&(_, next)) => vowel_sign(next),
                    None => None,
                };
                match sign {
                    Some(sign) => {
                        chars.next();
                        push_sign_with_marker(&mut out, sign, marker);
                    }
                    None => out.extend(marker),
                }
                continue;
            }

            if let Some(vowel) = independent_vowel(ch) {
                out.push_str(vowel);
            } else if ch == VIRAMA {
                self.orphan(offset, ch, "virama without consonant")?;
                out.push(TAMIL_VIRAMA);
            } else if let Some(sign) = vowel_sign(ch) {
                self.orphan(offset, ch, "vowel sign without consonant")?;
                out.push_str(sign);
            } else if ch == NUKTA {
                self.orphan(offset, ch, "nukta without consonant")?;
            } else if let Some(mark) = modifier(ch) {
                out.push_str(mark);
            } else if let Some(digit) = digit(ch) {
                out.push(digit);
            } else {
                out.push(ch);
            }
        }

        Ok(out)
    }
}

/// Write a vowel sign, placing the consonant's marker after the sign's first
/// code point (after the virama for the vocalic r/l signs).
fn push_sign_with_marker(out: &mut String, sign: &str, marker: Option<char>) {
    let mut sign_chars = sign.chars();
    out.extend(sign_chars.next());
    out.extend(marker);
    out.push_str(sign_chars.as_str());
}

fn consonant(ch: char) -> Option<(&'static str, Option<char>)> {
    let mapped = match ch {
        'क' | '\u{0958}' => ("க", None),
        'ख' | '\u{0959}' => ("க", Some('²')),
        'ग' | '\u{095A}' => ("க", Some('³')),
        'घ' => ("க", Some('⁴')),
        'ङ' => ("ங", None),
        'च' => ("ச", None),
        'छ' => ("ச", Some('²')),
        'ज' | '\u{095B}' => ("ஜ", None),
        'झ' => ("ஜ", Some('²')),
        'ञ' => ("ஞ", None),
        'ट' => ("ட", None),
        'ठ' => ("ட", Some('²')),
        'ड' | '\u{095C}' => ("ட", Some('³')),
        'ढ' | '\u{095D}' => ("ட", Some('⁴')),
        'ण' => ("ண", None),
        'त' => ("த", None),
        'थ' => ("த", Some('²')),
        'द' => ("த", Some('³')),
        'ध' => ("த", Some('⁴')),
        'न' => ("ந", None),
        '\u{0929}' => ("ன", None),
        'प' => ("ப", None),
        'फ' => ("ப", Some('²')),
        '\u{095E}' => ("ஃப", None),
        'ब' => ("ப", Some('³')),
        'भ' => ("ப", Some('⁴')),
        'म' => ("ம", None),
        'य' | '\u{095F}' => ("ய", None),
        'र' => ("ர", None),
        '\u{0931}' => ("ற", None),
        'ल' => ("ல", None),
        'ळ' => ("ள", None),
        '\u{0934}' => ("ழ", None),
        'व' => ("வ", None),
        'श' => ("ஶ", None),
        'ष' => ("ஷ", None),
        'स' => ("ஸ", None),
        'ह' => ("ஹ", None),
        _ => return None,
    };
    Some(mapped)
}

fn independent_vowel(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        'अ' => "அ",
        'आ' => "ஆ",
        'इ' => "இ",
        'ई' => "ஈ",
        'उ' => "உ",
        'ऊ' => "ஊ",
        'ऋ' => "ரு",
        'ॠ' => "ரூ",
        'ऌ' => "லு",
        'ॡ' => "லூ",
        'ऎ' => "எ",
        'ए' | 'ऍ' => "ஏ",
        'ऐ' => "ஐ",
        'ऒ' | 'ऑ' => "ஒ",
        'ओ' => "ஓ",
        'औ' => "ஔ",
        _ => return None,
    };
    Some(mapped)
}

fn vowel_sign(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        'ा' => "ா",
        'ि' => "ி",
        'ी' => "ீ",
        'ु' => "ு",
        'ू' => "ூ",
        'ृ' => "்ரு",
        'ॄ' => "்ரூ",
        'ॢ' => "்லு",
        'ॣ' => "்லூ",
        'ॆ' => "ெ",
        'े' | 'ॅ' => "ே",
        'ै' => "ை",
        'ॊ' | 'ॉ' => "ொ",
        'ो' => "ோ",
        'ौ' => "ௌ",
        _ => return None,
    };
    Some(mapped)
}

fn modifier(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        'ं' | 'ँ' => "ம்",
        'ः' => "ஃ",
        'ऽ' => "’",
        'ॐ' => "ஓம்",
        _ => return None,
    };
    Some(mapped)
}

fn digit(ch: char) -> Option<char> {
    match ch {
        '०'..='९' => char::from_u32(ch as u32 - '०' as u32 + '௦' as u32),
        _ => None,
    }
}
