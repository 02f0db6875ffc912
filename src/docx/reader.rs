//! WordprocessingML to document model.

use log::debug;

use super::package::Package;
use super::styles::{is_on, StyleSheet};
use super::xml::XmlPart;
use super::{NON_BREAKING_HYPHEN, SOFT_HYPHEN};
use crate::error::{Error, Result};
use crate::model::{
    Block, Document, Paragraph, RowContent, RunFonts, Table, TableCell, TableContent, TableRow,
    TextRun, TextStyle, XmlElement, XmlNode,
};

const DEFAULT_MAIN_PART: &str = "word/document.xml";
const DEFAULT_STYLES_PART: &str = "word/styles.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
const STYLES_REL: &str = "/styles";

/// Find the main document part through the package relationships.
pub(crate) fn locate_main_part(package: &Package) -> Result<String> {
    let target = match package.get("_rels/.rels") {
        Some(bytes) => find_relationship(bytes, "", OFFICE_DOCUMENT_REL)?,
        None => None,
    };
    let part = target.unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());

    if !package.contains(&part) {
        return Err(Error::DocumentLoad(format!(
            "main document part {} is missing",
            part
        )));
    }
    Ok(part)
}

/// Find and parse the styles part related to the main part, if any.
pub(crate) fn load_styles(package: &Package, main_part: &str) -> Result<StyleSheet> {
    let (dir, file) = split_part_name(main_part);
    let rels_name = format!("{}_rels/{}.rels", dir, file);

    let target = match package.get(&rels_name) {
        Some(bytes) => find_relationship(bytes, dir, STYLES_REL)?,
        None => None,
    };
    let part = target.unwrap_or_else(|| DEFAULT_STYLES_PART.to_string());

    match package.get(&part) {
        Some(bytes) => {
            let sheet = StyleSheet::from_element(&XmlPart::parse(bytes)?.root);
            debug!("Loaded {} character styles from {}", sheet.len(), part);
            Ok(sheet)
        }
        None => {
            debug!("No styles part, runs have no style names");
            Ok(StyleSheet::default())
        }
    }
}

/// Split "word/document.xml" into ("word/", "document.xml").
fn split_part_name(part: &str) -> (&str, &str) {
    match part.rfind('/') {
        Some(index) => part.split_at(index + 1),
        None => ("", part),
    }
}

/// Find the internal target of the first relationship whose type ends with
/// `type_suffix`, resolved against `base_dir`.
fn find_relationship(rels: &[u8], base_dir: &str, type_suffix: &str) -> Result<Option<String>> {
    let part = XmlPart::parse(rels)?;
    let target = part
        .root
        .elements()
        .filter(|el| el.name == "Relationship")
        .filter(|el| el.attr("TargetMode") != Some("External"))
        .find(|el| el.attr("Type").is_some_and(|t| t.ends_with(type_suffix)))
        .and_then(|el| el.attr("Target"))
        .map(|target| resolve_target(base_dir, target));
    Ok(target)
}

fn resolve_target(base_dir: &str, target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("{}{}", base_dir, target),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Convert the children of `w:body` into blocks.
pub(crate) fn read_body(children: Vec<XmlNode>, styles: &StyleSheet) -> Document {
    Document::with_blocks(read_blocks(children, styles))
}

fn read_blocks(children: Vec<XmlNode>, styles: &StyleSheet) -> Vec<Block> {
    children
        .into_iter()
        .map(|node| match node {
            XmlNode::Element(el) if el.name == "w:p" => {
                Block::Paragraph(read_paragraph(el, styles))
            }
            XmlNode::Element(el) if el.name == "w:tbl" => Block::Table(read_table(el, styles)),
            other => Block::Preserved(other),
        })
        .collect()
}

fn read_paragraph(element: XmlElement, styles: &StyleSheet) -> Paragraph {
    let mut paragraph = Paragraph::new();
    paragraph.attributes = element.attributes;

    for node in element.children {
        match node {
            XmlNode::Element(el) if el.name == "w:r" => match read_run(&el, styles) {
                Some(run) => paragraph.add_run(run.with_origin(el)),
                None => paragraph.add_preserved(el),
            },
            other => paragraph.add_preserved(other),
        }
    }
    paragraph
}

fn read_table(element: XmlElement, styles: &StyleSheet) -> Table {
    let mut table = Table::new();
    table.attributes = element.attributes;

    for node in element.children {
        match node {
            XmlNode::Element(el) if el.name == "w:tr" => table.add_row(read_row(el, styles)),
            other => table.content.push(TableContent::Preserved(other)),
        }
    }
    table
}

fn read_row(element: XmlElement, styles: &StyleSheet) -> TableRow {
    let content = element
        .children
        .into_iter()
        .map(|node| match node {
            XmlNode::Element(el) if el.name == "w:tc" => RowContent::Cell(TableCell {
                attributes: el.attributes,
                blocks: read_blocks(el.children, styles),
            }),
            other => RowContent::Preserved(other),
        })
        .collect();

    TableRow {
        attributes: element.attributes,
        content,
    }
}

/// Lift a `w:r` into a text run, or None if it holds anything besides
/// properties, text, tabs, line breaks and hyphens.
fn read_run(element: &XmlElement, styles: &StyleSheet) -> Option<TextRun> {
    let mut text = String::new();
    let mut style = TextStyle::default();

    for node in &element.children {
        let el = match node {
            XmlNode::Element(el) => el,
            XmlNode::Text { text } if text.trim().is_empty() => continue,
            _ => return None,
        };
        match el.name.as_str() {
            "w:rPr" => style = read_run_properties(el),
            "w:t" => text.push_str(&el.text_content()),
            "w:tab" => text.push('\t'),
            "w:br" if matches!(el.attr("w:type"), None | Some("textWrapping"))
                && el.attr("w:clear").is_none() =>
            {
                text.push('\n')
            }
            "w:cr" => text.push('\n'),
            "w:noBreakHyphen" => text.push(NON_BREAKING_HYPHEN),
            "w:softHyphen" => text.push(SOFT_HYPHEN),
            "w:lastRenderedPageBreak" => {}
            _ => return None,
        }
    }

    style.style_name = styles.resolve(style.style_id.as_deref());
    Some(TextRun {
        text,
        style,
        attributes: element.attributes.clone(),
        origin: None,
    })
}

fn read_run_properties(rpr: &XmlElement) -> TextStyle {
    let mut style = TextStyle::default();

    for el in rpr.elements() {
        let val = simple_value(el);
        match (el.name.as_str(), val) {
            ("w:rStyle", Some(Some(id))) => style.style_id = Some(id.to_string()),
            ("w:b", Some(val)) => style.bold = Some(val.map_or(true, is_on)),
            ("w:i", Some(val)) => style.italic = Some(val.map_or(true, is_on)),
            ("w:u", Some(Some(kind))) => style.underline = Some(kind.to_string()),
            ("w:color", Some(Some(color))) => style.color = Some(color.to_string()),
            ("w:sz", Some(Some(size))) if size.parse::<u32>().is_ok() => {
                style.font_size = size.parse().ok()
            }
            ("w:rFonts", _) if el.children.is_empty() => style.fonts = Some(read_fonts(el)),
            _ => style.other_properties.push(el.clone()),
        }
    }
    style
}

/// The `w:val` of an element that carries nothing else: `Some(None)` for a
/// bare element, `None` if it has other attributes or children.
fn simple_value(el: &XmlElement) -> Option<Option<&str>> {
    if !el.children.is_empty() {
        return None;
    }
    match el.attributes.as_slice() {
        [] => Some(None),
        [(key, value)] if key == "w:val" => Some(Some(value.as_str())),
        _ => None,
    }
}

fn read_fonts(el: &XmlElement) -> RunFonts {
    let mut fonts = RunFonts::default();
    for (key, value) in &el.attributes {
        let slot = match key.as_str() {
            "w:ascii" => &mut fonts.ascii,
            "w:hAnsi" => &mut fonts.h_ansi,
            "w:eastAsia" => &mut fonts.east_asia,
            "w:cs" => &mut fonts.cs,
            "w:hint" => &mut fonts.hint,
            _ => {
                fonts.other_attributes.push((key.clone(), value.clone()));
                continue;
            }
        };
        *slot = Some(value.clone());
    }
    fonts
}
