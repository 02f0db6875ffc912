//! XML part parsing and serialization.
//!
//! Parts are read into the generic [`XmlNode`] tree. Namespace prefixes are
//! kept as written, so WordprocessingML elements are matched by their `w:`
//! qualified names.

use std::borrow::Cow;
use std::str;

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{XmlElement, XmlNode};

/// The `<?xml ...?>` declaration of a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for XmlDeclaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: Some("yes".to_string()),
        }
    }
}

/// A parsed XML part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlPart {
    pub declaration: Option<XmlDeclaration>,
    /// Comments and processing instructions before the root element
    pub prolog: Vec<XmlNode>,
    pub root: XmlElement,
}

impl XmlPart {
    /// Parse a part from UTF-8 bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let text = str::from_utf8(bytes).map_err(|e| load_error(format!("invalid UTF-8: {e}")))?;
        let text = text.trim_start_matches('\u{feff}');

        let mut reader = Reader::from_str(text);
        let mut declaration = None;
        let mut prolog = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| load_error(format!("at byte {}: {e}", reader.buffer_position())))?;

            match event {
                Event::Decl(decl) => {
                    let version = decl.version().map_err(|e| load_error(e.to_string()))?;
                    let encoding = decl
                        .encoding()
                        .transpose()
                        .map_err(|e| load_error(e.to_string()))?;
                    let standalone = decl
                        .standalone()
                        .transpose()
                        .map_err(|e| load_error(e.to_string()))?;
                    declaration = Some(XmlDeclaration {
                        version: bytes_to_string(&version)?,
                        encoding: encoding.as_deref().map(bytes_to_string).transpose()?,
                        standalone: standalone.as_deref().map(bytes_to_string).transpose()?,
                    });
                }
                Event::Start(start) => stack.push(read_element(&start)?),
                Event::Empty(start) => {
                    let element = read_element(&start)?;
                    attach(element.into(), &mut stack, &mut root, &mut prolog);
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| load_error("unexpected closing tag".to_string()))?;
                    attach(element.into(), &mut stack, &mut root, &mut prolog);
                }
                Event::Text(text) => {
                    // Whitespace outside the root element is not significant.
                    if let Some(parent) = stack.last_mut() {
                        let text = text.unescape().map_err(|e| load_error(e.to_string()))?;
                        parent.children.push(XmlNode::text(text));
                    }
                }
                Event::CData(data) => {
                    let data = bytes_to_string(&data)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::CData { data });
                    }
                }
                Event::Comment(comment) => {
                    let node = XmlNode::Comment {
                        content: bytes_to_string(&comment)?,
                    };
                    attach(node, &mut stack, &mut root, &mut prolog);
                }
                Event::PI(pi) => {
                    let node = XmlNode::ProcessingInstruction {
                        content: bytes_to_string(&pi)?,
                    };
                    attach(node, &mut stack, &mut root, &mut prolog);
                }
                Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if !stack.is_empty() {
            return Err(load_error("unclosed element at end of part".to_string()));
        }
        let root = root.ok_or_else(|| load_error("part has no root element".to_string()))?;

        Ok(Self {
            declaration,
            prolog,
            root,
        })
    }

    /// Serialize the part to UTF-8 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::with_capacity(4096);
        if let Some(decl) = &self.declaration {
            out.push_str("<?xml version=\"");
            out.push_str(&escape(&decl.version));
            out.push('"');
            if let Some(encoding) = &decl.encoding {
                out.push_str(" encoding=\"");
                out.push_str(&escape(encoding));
                out.push('"');
            }
            if let Some(standalone) = &decl.standalone {
                out.push_str(" standalone=\"");
                out.push_str(&escape(standalone));
                out.push('"');
            }
            out.push_str("?>\r\n");
        }
        for node in &self.prolog {
            write_node(&mut out, node);
        }
        write_element(&mut out, &self.root);
        out.into_bytes()
    }
}

/// Attach a finished node to its parent, or make it the root.
///
/// Nodes outside the root element go to the prolog; anything after the root
/// is dropped.
fn attach(
    node: XmlNode,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    prolog: &mut Vec<XmlNode>,
) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return;
    }
    match node {
        XmlNode::Element(element) if root.is_none() => *root = Some(element),
        other if root.is_none() => prolog.push(other),
        _ => {}
    }
}

fn read_element(start: &BytesStart<'_>) -> Result<XmlElement> {
    let mut element = XmlElement::new(bytes_to_string(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| load_error(e.to_string()))?;
        let key = bytes_to_string(attr.key.as_ref())?;
        let value = attr.unescape_value().map_err(|e| load_error(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn bytes_to_string(bytes: &[u8]) -> Result<String> {
    str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| load_error(format!("invalid UTF-8: {e}")))
}

fn load_error(message: String) -> Error {
    Error::DocumentLoad(format!("malformed XML: {message}"))
}

/// Serialize a node.
pub fn write_node(out: &mut String, node: &XmlNode) {
    match node {
        XmlNode::Element(element) => write_element(out, element),
        XmlNode::Text { text } => out.push_str(&escape_text(text)),
        XmlNode::CData { data } => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
        XmlNode::Comment { content } => {
            out.push_str("<!--");
            out.push_str(content);
            out.push_str("-->");
        }
        XmlNode::ProcessingInstruction { content } => {
            out.push_str("<?");
            out.push_str(content);
            out.push_str("?>");
        }
    }
}

/// Serialize an element and its subtree.
pub fn write_element(out: &mut String, element: &XmlElement) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &element.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

/// Escape an attribute value. Tabs and line ends become character references
/// so that attribute value normalization does not turn them into spaces.
fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for ch in escaped.chars() {
        match ch {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Escape text content. A carriage return not followed by a line feed is
/// written as a character reference; a raw one would be read back as `\n`.
fn escape_text(text: &str) -> Cow<'_, str> {
    let escaped = partial_escape(text);
    if !escaped.contains('\r') {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    let mut chars = escaped.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' && chars.peek() != Some(&'\n') {
            out.push_str("&#13;");
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}
