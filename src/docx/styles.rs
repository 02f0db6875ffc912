//! Character style names from `word/styles.xml`.

use std::collections::HashMap;

use crate::model::XmlElement;

/// Character styles of a document, keyed by style id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    names: HashMap<String, String>,
    default_character: Option<String>,
}

impl StyleSheet {
    /// Collect character styles from a `w:styles` root element.
    pub fn from_element(root: &XmlElement) -> Self {
        let mut sheet = Self::default();

        for style in root.elements().filter(|el| el.name == "w:style") {
            if style.attr("w:type") != Some("character") {
                continue;
            }
            let Some(id) = style.attr("w:styleId") else {
                continue;
            };
            let name = style
                .child("w:name")
                .and_then(|el| el.attr("w:val"))
                .unwrap_or(id)
                .to_string();

            if style.attr("w:default").is_some_and(is_on) {
                sheet.default_character = Some(name.clone());
            }
            sheet.names.insert(id.to_string(), name);
        }

        sheet
    }

    /// Resolve the style name of a run.
    ///
    /// An explicit style id resolves to its name. A run without a style id,
    /// or with an id that is not a character style of the sheet, has the
    /// default character style.
    pub fn resolve(&self, style_id: Option<&str>) -> Option<String> {
        style_id
            .and_then(|id| self.names.get(id))
            .or(self.default_character.as_ref())
            .cloned()
    }

    /// Get the name of the default character style.
    pub fn default_character(&self) -> Option<&str> {
        self.default_character.as_deref()
    }

    /// Get the number of character styles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no character style is defined.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// OOXML on/off value.
pub(crate) fn is_on(value: &str) -> bool {
    matches!(value, "1" | "true" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::xml::XmlPart;

    const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
<w:style w:type="character" w:default="1" w:styleId="DefaultParagraphFont"><w:name w:val="Default Paragraph Font"/></w:style>
<w:style w:type="character" w:customStyle="1" w:styleId="SanskritChar"><w:name w:val="Sanskrit"/></w:style>
<w:style w:type="character" w:styleId="Emphasis"/>
</w:styles>"#;

    #[test]
    fn test_resolve_names() {
        let part = XmlPart::parse(STYLES.as_bytes()).unwrap();
        let sheet = StyleSheet::from_element(&part.root);

        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.default_character(), Some("Default Paragraph Font"));
        assert_eq!(sheet.resolve(Some("SanskritChar")).as_deref(), Some("Sanskrit"));
        assert_eq!(sheet.resolve(Some("Emphasis")).as_deref(), Some("Emphasis"));
        assert_eq!(
            sheet.resolve(Some("Missing")).as_deref(),
            Some("Default Paragraph Font")
        );
        // Paragraph styles are not character styles.
        assert_eq!(
            sheet.resolve(Some("Normal")).as_deref(),
            Some("Default Paragraph Font")
        );
        assert_eq!(
            sheet.resolve(None).as_deref(),
            Some("Default Paragraph Font")
        );
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = StyleSheet::default();
        assert!(sheet.is_empty());
        assert_eq!(sheet.resolve(None), None);
        assert_eq!(sheet.resolve(Some("SanskritChar")), None);
    }

    #[test]
    fn test_is_on() {
        assert!(is_on("1"));
        assert!(is_on("true"));
        assert!(!is_on("0"));
        assert!(!is_on("false"));
    }
}
