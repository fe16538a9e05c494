//! Syntax style schemes.
//!
//! A scheme is a named set of [`TextFormat`]s keyed by format name. Schemes
//! are loaded from a small XML dialect:
//!
//! ```xml
//! <style-scheme version="1.0" name="Default">
//!     <style name="Text" foreground="#000000" background="#ffffff"/>
//!     <style name="Parentheses" foreground="#ff0000" bold="true"/>
//! </style-scheme>
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use horizon_codeedit_core::Color;
use horizon_codeedit_core::logging::targets;

use crate::error::{Error, Result};
use crate::format::TextFormat;

/// Format names the editor core looks up.
pub mod format_names {
    /// Default text colors; its background is the editor background.
    pub const TEXT: &str = "Text";
    /// Full-width highlight behind the cursor's line.
    pub const CURRENT_LINE: &str = "CurrentLine";
    /// A matched delimiter pair.
    pub const PARENTHESES: &str = "Parentheses";
    /// A delimiter without a partner.
    pub const PARENTHESES_MISMATCH: &str = "ParenthesesMismatch";
    /// Gutter numbers and background.
    pub const LINE_NUMBER: &str = "LineNumber";
    /// The gutter number of the cursor's line.
    pub const CURRENT_LINE_NUMBER: &str = "CurrentLineNumber";
}

const DEFAULT_SCHEME: &str = include_str!("../resources/default_style.xml");

/// A named collection of text formats.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyntaxStyle {
    name: String,
    formats: HashMap<String, TextFormat>,
}

impl SyntaxStyle {
    /// Create an empty scheme.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            formats: HashMap::new(),
        }
    }

    /// The built-in scheme shipped with the crate.
    pub fn default_style() -> &'static SyntaxStyle {
        static DEFAULT: OnceLock<SyntaxStyle> = OnceLock::new();
        DEFAULT.get_or_init(|| match SyntaxStyle::load(DEFAULT_SCHEME) {
            Ok(style) => style,
            Err(err) => {
                tracing::warn!(target: targets::STYLE, %err, "built-in style scheme failed to parse");
                SyntaxStyle::new("Default")
            }
        })
    }

    /// Parse a scheme from its XML source.
    ///
    /// Unknown elements are ignored. A later `<style>` with the same name
    /// replaces an earlier one.
    pub fn load(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut style = SyntaxStyle::default();
        loop {
            let position = reader.buffer_position() as u64;
            match reader.read_event() {
                Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                    match element.name().as_ref() {
                        b"style-scheme" => {
                            if let Some(name) = attribute(&element, "name")? {
                                style.name = name;
                            }
                        }
                        b"style" => {
                            let (name, format) = parse_style_element(&element)?;
                            style.formats.insert(name, format);
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => return Err(Error::xml(position, err.to_string())),
            }
        }

        tracing::debug!(
            target: targets::STYLE,
            name = %style.name,
            formats = style.formats.len(),
            "loaded style scheme"
        );
        Ok(style)
    }

    /// Read and parse a scheme file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::load(&xml)
    }

    /// The scheme's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a format by name.
    pub fn format(&self, name: &str) -> Option<&TextFormat> {
        self.formats.get(name)
    }

    /// Look up a format by name, falling back to an empty format.
    pub fn format_or_default(&self, name: &str) -> TextFormat {
        self.formats.get(name).copied().unwrap_or_default()
    }

    /// Check if the scheme defines a format.
    pub fn has_format(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Add or replace a format.
    pub fn set_format(&mut self, name: impl Into<String>, format: TextFormat) {
        self.formats.insert(name.into(), format);
    }

    /// Add a format using builder pattern.
    pub fn with_format(mut self, name: impl Into<String>, format: TextFormat) -> Self {
        self.set_format(name, format);
        self
    }

    /// Number of formats defined.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Check if the scheme defines no formats.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

fn parse_style_element(element: &BytesStart<'_>) -> Result<(String, TextFormat)> {
    let name = attribute(element, "name")?.ok_or_else(|| Error::missing_attribute("style", "name"))?;

    let mut format = TextFormat::new();
    if let Some(value) = attribute(element, "foreground")? {
        format.foreground = Some(parse_color("foreground", &value)?);
    }
    if let Some(value) = attribute(element, "background")? {
        format.background = Some(parse_color("background", &value)?);
    }
    if let Some(value) = attribute(element, "bold")? {
        format.bold = parse_bool("bold", &value)?;
    }
    if let Some(value) = attribute(element, "italic")? {
        format.italic = parse_bool("italic", &value)?;
    }
    if let Some(value) = attribute(element, "underline")? {
        format.underline = parse_bool("underline", &value)?;
    }

    Ok((name, format))
}

fn attribute(element: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::xml(0, e.to_string()))?;
        if attr.key.as_ref() == key.as_bytes() {
            return Ok(Some(String::from_utf8_lossy(&attr.value).to_string()));
        }
    }
    Ok(None)
}

fn parse_color(property: &str, value: &str) -> Result<Color> {
    Color::from_hex(value)
        .ok_or_else(|| Error::invalid_value(property, format!("'{value}' is not a #rrggbb color")))
}

fn parse_bool(property: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::invalid_value(
            property,
            format!("expected true or false, got '{other}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_scheme() {
        let style = SyntaxStyle::load(
            r##"<style-scheme version="1.0" name="Dusk">
                <style name="Text" foreground="#d0d0d0" background="#202020"/>
                <style name="Parentheses" foreground="#ff0000" bold="true"/>
            </style-scheme>"##,
        )
        .unwrap();

        assert_eq!(style.name(), "Dusk");
        assert_eq!(style.len(), 2);

        let text = style.format(format_names::TEXT).unwrap();
        assert_eq!(text.foreground, Some(Color::from_rgb8(0xd0, 0xd0, 0xd0)));
        assert_eq!(text.background, Some(Color::from_rgb8(0x20, 0x20, 0x20)));
        assert!(!text.bold);

        let parens = style.format(format_names::PARENTHESES).unwrap();
        assert!(parens.bold);
        assert_eq!(parens.background, None);
    }

    #[test]
    fn test_default_style_has_editor_formats() {
        let style = SyntaxStyle::default_style();
        for name in [
            format_names::TEXT,
            format_names::CURRENT_LINE,
            format_names::PARENTHESES,
            format_names::PARENTHESES_MISMATCH,
            format_names::LINE_NUMBER,
            format_names::CURRENT_LINE_NUMBER,
        ] {
            assert!(style.has_format(name), "missing {name}");
        }
    }

    #[test]
    fn test_missing_format_falls_back_to_empty() {
        let style = SyntaxStyle::new("Empty");
        assert!(style.format_or_default("Keyword").is_empty());
    }

    #[test]
    fn test_style_without_name_is_rejected() {
        let err = SyntaxStyle::load(r##"<style-scheme><style foreground="#000000"/></style-scheme>"##)
            .unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { .. }));
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let err = SyntaxStyle::load(r#"<style-scheme><style name="Text" foreground="red"/></style-scheme>"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref property, .. } if property == "foreground"));
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        let err = SyntaxStyle::load("<style-scheme><style name=\"Text\"></style-scheme>").unwrap_err();
        assert!(matches!(err, Error::Xml { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"<style-scheme name="File"><style name="CurrentLine" background="#101010"/></style-scheme>"##
        )
        .unwrap();

        let style = SyntaxStyle::from_file(file.path()).unwrap();
        assert_eq!(style.name(), "File");
        assert!(style.has_format(format_names::CURRENT_LINE));
    }

    #[test]
    fn test_from_missing_file() {
        let err = SyntaxStyle::from_file("/definitely/not/here.xml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
