use std::{borrow::Cow, io::Write};

use quick_xml::{
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::Result;

/// Streaming writer emitting the intermediate XML form.
///
/// Attribute values and text are escaped with [`escape_value`], which in addition to the
/// five XML entities writes `\r`, `\n` and `\t` as character references. Attributes whose
/// value is `None` are skipped, which is how optional attributes are omitted.
pub struct XmlWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlWriter<W> {
    /// Creates a writer that emits the document on a single line.
    pub fn new(inner: W) -> Self {
        XmlWriter {
            writer: Writer::new(inner),
        }
    }

    /// Creates a writer that indents nested elements by `indent` spaces.
    pub fn with_indent(inner: W, indent: usize) -> Self {
        XmlWriter {
            writer: Writer::new_with_indent(inner, b' ', indent),
        }
    }

    /// Writes `<?xml version="1.0" encoding="utf-8"?>`.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn declaration(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        Ok(())
    }

    /// Opens an element that will receive children or text.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn start(&mut self, name: &str, attributes: &[(&str, Option<&str>)]) -> Result<()> {
        self.writer
            .write_event(Event::Start(Self::element(name, attributes)))?;
        Ok(())
    }

    /// Writes a self-closing element.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn empty(&mut self, name: &str, attributes: &[(&str, Option<&str>)]) -> Result<()> {
        self.writer
            .write_event(Event::Empty(Self::element(name, attributes)))?;
        Ok(())
    }

    /// Closes an element opened with [`XmlWriter::start`].
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes escaped text content.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(escape_value(text))))?;
        Ok(())
    }

    /// Writes text as a CDATA section, or as escaped text if it contains `]]>`.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn cdata(&mut self, text: &str) -> Result<()> {
        if text.contains("]]>") {
            return self.text(text);
        }

        self.writer.write_event(Event::CData(BytesCData::new(text)))?;
        Ok(())
    }

    /// Writes a leaf element holding only text, e.g. `<field>value</field>`.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn text_element(
        &mut self,
        name: &str,
        attributes: &[(&str, Option<&str>)],
        text: &str,
        cdata: bool,
    ) -> Result<()> {
        self.start(name, attributes)?;
        if cdata {
            self.cdata(text)?;
        } else {
            self.text(text)?;
        }
        self.end(name)
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn element<'a>(name: &'a str, attributes: &[(&str, Option<&str>)]) -> BytesStart<'a> {
        let mut element = BytesStart::new(name);
        for (key, value) in attributes {
            if let Some(value) = value {
                let escaped = escape_value(value);
                element.push_attribute((key.as_bytes(), escaped.as_bytes()));
            }
        }
        element
    }
}

/// Escapes a value for use in attributes or text.
///
/// `&`, `<`, `>`, `"` and `'` become entities; `\r`, `\n` and `\t` become character references.
#[must_use]
pub fn escape_value(value: &str) -> Cow<'_, str> {
    let escaped = quick_xml::escape::escape(value);
    if !escaped.contains(['\r', '\n', '\t']) {
        return escaped;
    }

    let mut result = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\r' => result.push_str("&#xD;"),
            '\n' => result.push_str("&#xA;"),
            '\t' => result.push_str("&#x9;"),
            _ => result.push(c),
        }
    }

    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlReader;

    fn render(write: impl FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<()>) -> String {
        let mut writer = XmlWriter::new(Vec::new());
        write(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(escape_value("plain"), "plain");
        assert_eq!(escape_value("a<b & c"), "a&lt;b &amp; c");
        assert_eq!(escape_value("a\r\nb\tc"), "a&#xD;&#xA;b&#x9;c");
    }

    #[test]
    fn test_optional_attributes_are_skipped() {
        let xml = render(|writer| writer.empty("row", &[("op", None), ("sectionId", Some("s1"))]));
        assert_eq!(xml, r#"<row sectionId="s1"/>"#);
    }

    #[test]
    fn test_whitespace_survives_roundtrip() {
        let original = "line1\r\nline2\tend ";
        let xml = render(|writer| writer.text_element("field", &[], original, false));

        let mut reader = XmlReader::from_xml(&xml);
        reader.read_root().unwrap();
        assert_eq!(reader.read_text().unwrap(), original);
    }

    #[test]
    fn test_cdata_falls_back_to_text() {
        let xml = render(|writer| writer.text_element("field", &[], "a]]>b", true));
        assert!(!xml.contains("CDATA"));

        let xml = render(|writer| writer.text_element("field", &[], "<b>", true));
        assert_eq!(xml, "<field><![CDATA[<b>]]></field>");
    }
}
