//! Paragraph and text-level types.

use super::{XmlElement, XmlNode};
use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Attributes of the paragraph element (revision ids etc.)
    pub attributes: Vec<(String, String)>,

    /// Inline content in document order
    pub content: Vec<InlineContent>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a paragraph from a list of runs.
    pub fn with_runs(runs: impl IntoIterator<Item = TextRun>) -> Self {
        Self {
            attributes: Vec::new(),
            content: runs.into_iter().map(InlineContent::Text).collect(),
        }
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(InlineContent::Text(TextRun::new(text)));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Text(run));
    }

    /// Add content that is carried through untouched.
    pub fn add_preserved(&mut self, node: impl Into<XmlNode>) {
        self.content.push(InlineContent::Preserved(node.into()));
    }

    /// Iterate over the text runs of the paragraph.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(InlineContent::as_run)
    }

    /// Get the number of text runs.
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs().map(|run| run.text.as_str()).collect()
    }

    /// Check if the paragraph has no text.
    pub fn is_empty(&self) -> bool {
        self.runs().all(TextRun::is_empty)
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// Markup kept verbatim (paragraph properties, hyperlinks, fields, drawings)
    Preserved(XmlNode),
}

impl InlineContent {
    /// Get the run if this is a text run.
    pub fn as_run(&self) -> Option<&TextRun> {
        match self {
            InlineContent::Text(run) => Some(run),
            InlineContent::Preserved(_) => None,
        }
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,

    /// Attributes of the run element (revision ids etc.)
    pub attributes: Vec<(String, String)>,

    /// Markup the run was loaded from, if any
    #[serde(skip)]
    pub(crate) origin: Option<Box<RunOrigin>>,
}

/// Snapshot of a run as it was loaded.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunOrigin {
    pub(crate) element: XmlElement,
    pub(crate) text: String,
    pub(crate) style: TextStyle,
    pub(crate) attributes: Vec<(String, String)>,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_style(text, TextStyle::default())
    }

    /// Create a text run with the given style.
    pub fn with_style(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            attributes: Vec::new(),
            origin: None,
        }
    }

    /// Create a text run carrying a named character style.
    pub fn styled(text: impl Into<String>, style_name: impl Into<String>) -> Self {
        Self::with_style(text, TextStyle::named(style_name))
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::with_style(
            text,
            TextStyle {
                bold: Some(true),
                ..Default::default()
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::with_style(
            text,
            TextStyle {
                italic: Some(true),
                ..Default::default()
            },
        )
    }

    /// Create a run that shares this run's formatting but has new text.
    pub fn derive(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: self.style.clone(),
            attributes: self.attributes.clone(),
            origin: None,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn with_origin(mut self, element: XmlElement) -> Self {
        self.origin = Some(Box::new(RunOrigin {
            element,
            text: self.text.clone(),
            style: self.style.clone(),
            attributes: self.attributes.clone(),
        }));
        self
    }

    /// The element this run was loaded from, if text and formatting are unchanged.
    pub(crate) fn pristine_source(&self) -> Option<&XmlElement> {
        self.origin
            .as_deref()
            .filter(|origin| {
                origin.text == self.text
                    && origin.style == self.style
                    && origin.attributes == self.attributes
            })
            .map(|origin| &origin.element)
    }
}

/// Text styling properties.
///
/// Fields the transliterator inspects or changes are modelled explicitly; any
/// other run property is kept in `other_properties` in its original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Character style id (`w:rStyle`)
    pub style_id: Option<String>,

    /// Resolved character style name, used for style filtering
    pub style_name: Option<String>,

    /// Bold toggle (None = inherited)
    pub bold: Option<bool>,

    /// Italic toggle (None = inherited)
    pub italic: Option<bool>,

    /// Underline kind (e.g., "single")
    pub underline: Option<String>,

    /// Font size in half-points
    pub font_size: Option<u32>,

    /// Text color (hex without '#', or "auto")
    pub color: Option<String>,

    /// Font slots
    pub fonts: Option<RunFonts>,

    /// Other run properties, kept verbatim
    pub other_properties: Vec<XmlElement>,
}

impl TextStyle {
    /// Create a style referencing a character style whose id equals its name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            style_id: Some(name.clone()),
            style_name: Some(name),
            ..Default::default()
        }
    }

    /// Get the primary (ascii) font name.
    pub fn font_name(&self) -> Option<&str> {
        self.fonts.as_ref().and_then(|f| f.ascii.as_deref())
    }

    /// Get the complex-script font name.
    pub fn complex_script_font(&self) -> Option<&str> {
        self.fonts.as_ref().and_then(|f| f.cs.as_deref())
    }

    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold == Some(true)
            || self.italic == Some(true)
            || self.underline.as_deref().is_some_and(|u| u != "none")
    }

    /// Check if no property is set at all.
    pub fn is_empty(&self) -> bool {
        self.style_id.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.font_size.is_none()
            && self.color.is_none()
            && self.fonts.is_none()
            && self.other_properties.is_empty()
    }
}

/// Font slots of a run (`w:rFonts`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFonts {
    /// Font for ASCII characters
    pub ascii: Option<String>,

    /// Font for high ANSI characters
    pub h_ansi: Option<String>,

    /// Font for East Asian characters
    pub east_asia: Option<String>,

    /// Font for complex-script characters (Indic scripts)
    pub cs: Option<String>,

    /// Which slot to prefer for ambiguous characters
    pub hint: Option<String>,

    /// Other attributes (theme fonts), kept verbatim
    pub other_attributes: Vec<(String, String)>,
}

/// Theme attributes that take precedence over the explicit slots Tamil text uses.
const OVERRIDDEN_THEME_ATTRIBUTES: [&str; 3] = ["w:asciiTheme", "w:hAnsiTheme", "w:cstheme"];

impl RunFonts {
    /// Use `font` for the ascii, high ANSI and complex-script slots and hint
    /// the complex-script slot.
    pub fn apply_complex_script_font(&mut self, font: &str) {
        self.ascii = Some(font.to_string());
        self.h_ansi = Some(font.to_string());
        self.cs = Some(font.to_string());
        self.hint = Some("cs".to_string());
        self.other_attributes
            .retain(|(key, _)| !OVERRIDDEN_THEME_ATTRIBUTES.contains(&key.as_str()));
    }
}
