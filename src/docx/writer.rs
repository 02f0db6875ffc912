//! Document model to WordprocessingML.

use super::{NON_BREAKING_HYPHEN, SOFT_HYPHEN};
use crate::model::{
    Block, InlineContent, Paragraph, RowContent, RunFonts, Table, TableContent, TableRow, TextRun,
    TextStyle, XmlElement, XmlNode,
};

/// Run property elements in the order `CT_RPr` requires.
const RUN_PROPERTY_ORDER: &[&str] = &[
    "w:rStyle",
    "w:rFonts",
    "w:b",
    "w:bCs",
    "w:i",
    "w:iCs",
    "w:caps",
    "w:smallCaps",
    "w:strike",
    "w:dstrike",
    "w:outline",
    "w:shadow",
    "w:emboss",
    "w:imprint",
    "w:noProof",
    "w:snapToGrid",
    "w:vanish",
    "w:webHidden",
    "w:color",
    "w:spacing",
    "w:w",
    "w:kern",
    "w:position",
    "w:sz",
    "w:szCs",
    "w:highlight",
    "w:u",
    "w:effect",
    "w:bdr",
    "w:shd",
    "w:fitText",
    "w:vertAlign",
    "w:rtl",
    "w:cs",
    "w:em",
    "w:lang",
    "w:eastAsianLayout",
    "w:specVanish",
    "w:oMath",
];

/// Convert blocks back into `w:body` children.
pub(crate) fn write_blocks(blocks: &[Block]) -> Vec<XmlNode> {
    blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(p) => write_paragraph(p).into(),
            Block::Table(t) => write_table(t).into(),
            Block::Preserved(node) => node.clone(),
        })
        .collect()
}

fn write_paragraph(paragraph: &Paragraph) -> XmlElement {
    XmlElement {
        name: "w:p".to_string(),
        attributes: paragraph.attributes.clone(),
        children: paragraph
            .content
            .iter()
            .map(|item| match item {
                InlineContent::Text(run) => write_run(run).into(),
                InlineContent::Preserved(node) => node.clone(),
            })
            .collect(),
    }
}

fn write_table(table: &Table) -> XmlElement {
    XmlElement {
        name: "w:tbl".to_string(),
        attributes: table.attributes.clone(),
        children: table
            .content
            .iter()
            .map(|item| match item {
                TableContent::Row(row) => write_row(row).into(),
                TableContent::Preserved(node) => node.clone(),
            })
            .collect(),
    }
}

fn write_row(row: &TableRow) -> XmlElement {
    XmlElement {
        name: "w:tr".to_string(),
        attributes: row.attributes.clone(),
        children: row
            .content
            .iter()
            .map(|item| match item {
                RowContent::Cell(cell) => XmlElement {
                    name: "w:tc".to_string(),
                    attributes: cell.attributes.clone(),
                    children: write_blocks(&cell.blocks),
                }
                .into(),
                RowContent::Preserved(node) => node.clone(),
            })
            .collect(),
    }
}

/// Serialize a run. Runs unchanged since loading are written back as loaded.
pub(crate) fn write_run(run: &TextRun) -> XmlElement {
    if let Some(source) = run.pristine_source() {
        return source.clone();
    }

    let mut element = XmlElement::new("w:r");
    element.attributes = run.attributes.clone();
    if let Some(rpr) = write_run_properties(&run.style) {
        element.children.push(rpr.into());
    }

    let mut pending = String::new();
    for ch in run.text.chars() {
        let separator = match ch {
            '\t' => "w:tab",
            '\n' => "w:br",
            NON_BREAKING_HYPHEN => "w:noBreakHyphen",
            SOFT_HYPHEN => "w:softHyphen",
            _ => {
                pending.push(ch);
                continue;
            }
        };
        flush_text(&mut element, &mut pending);
        element.children.push(XmlElement::new(separator).into());
    }
    flush_text(&mut element, &mut pending);

    element
}

fn flush_text(run: &mut XmlElement, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let mut t = XmlElement::new("w:t");
    if pending.starts_with(char::is_whitespace) || pending.ends_with(char::is_whitespace) {
        t.set_attr("xml:space", "preserve");
    }
    t.children.push(XmlNode::text(std::mem::take(pending)));
    run.children.push(t.into());
}

fn write_run_properties(style: &TextStyle) -> Option<XmlElement> {
    let mut properties: Vec<XmlElement> = Vec::new();

    if let Some(id) = &style.style_id {
        properties.push(XmlElement::new("w:rStyle").with_attr("w:val", id));
    }
    if let Some(fonts) = &style.fonts {
        properties.push(write_fonts(fonts));
    }
    if let Some(bold) = style.bold {
        properties.push(toggle("w:b", bold));
    }
    if let Some(italic) = style.italic {
        properties.push(toggle("w:i", italic));
    }
    if let Some(color) = &style.color {
        properties.push(XmlElement::new("w:color").with_attr("w:val", color));
    }
    if let Some(size) = style.font_size {
        properties.push(XmlElement::new("w:sz").with_attr("w:val", size.to_string()));
    }
    if let Some(underline) = &style.underline {
        properties.push(XmlElement::new("w:u").with_attr("w:val", underline));
    }
    properties.extend(style.other_properties.iter().cloned());

    if properties.is_empty() {
        return None;
    }
    properties.sort_by_key(|el| property_rank(&el.name));

    let mut rpr = XmlElement::new("w:rPr");
    rpr.children = properties.into_iter().map(XmlNode::from).collect();
    Some(rpr)
}

fn property_rank(name: &str) -> usize {
    RUN_PROPERTY_ORDER
        .iter()
        .position(|known| *known == name)
        .unwrap_or(RUN_PROPERTY_ORDER.len())
}

fn toggle(name: &str, on: bool) -> XmlElement {
    let element = XmlElement::new(name);
    if on {
        element
    } else {
        element.with_attr("w:val", "0")
    }
}

fn write_fonts(fonts: &RunFonts) -> XmlElement {
    let mut element = XmlElement::new("w:rFonts");
    let slots = [
        ("w:hint", &fonts.hint),
        ("w:ascii", &fonts.ascii),
        ("w:hAnsi", &fonts.h_ansi),
        ("w:eastAsia", &fonts.east_asia),
        ("w:cs", &fonts.cs),
    ];
    for (key, value) in slots {
        if let Some(value) = value {
            element.attributes.push((key.to_string(), value.clone()));
        }
    }
    element
        .attributes
        .extend(fonts.other_attributes.iter().cloned());
    element
}
