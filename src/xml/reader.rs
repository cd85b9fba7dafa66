use std::io::BufRead;

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::Result;

/// Setter used by the declarative attribute tables.
///
/// Each element type keeps a static slice of `(attribute name, setter)` pairs; the setter
/// receives the target being populated and the unescaped attribute value.
pub type AttributeSetter<T> = fn(&mut T, &str) -> Result<()>;

/// An owned start tag: local name, namespace declaration and attributes.
///
/// `xmlns` and `xmlns:*` declarations and `xml:*` attributes are not reported as attributes;
/// a default namespace declaration is available through [`XmlElement::namespace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
    empty: bool,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>, empty: bool) -> Result<Self> {
        let name = std::str::from_utf8(start.local_name().as_ref())
            .map_err(|_| malformed_error!("Element name is not valid UTF-8"))?
            .to_string();

        let mut namespace = None;
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = std::str::from_utf8(attribute.key.as_ref())
                .map_err(|_| malformed_error!("Attribute name on '{}' is not valid UTF-8", name))?
                .to_string();
            let value = attribute
                .unescape_value()
                .map_err(|error| {
                    malformed_error!("Invalid value of attribute '{}' on '{}': {}", key, name, error)
                })?
                .into_owned();

            if key == "xmlns" {
                namespace = Some(value);
            } else if !key.starts_with("xmlns:") && !key.starts_with("xml:") {
                attributes.push((key, value));
            }
        }

        Ok(XmlElement {
            name,
            namespace,
            attributes,
            empty,
        })
    }

    /// Local name of the element
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Default namespace declared on this element, if any
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// True for `<element/>`, which has no children and no text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Iterates over the attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the value of a single attribute
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Fails unless the element has the expected local name.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] naming both the expected and the found element.
    pub fn expect_name(&self, expected: &str) -> Result<()> {
        if self.name == expected {
            Ok(())
        } else {
            Err(malformed_error!(
                "Expected element '{}', found '{}'",
                expected,
                self.name
            ))
        }
    }

    /// Fails unless the element declares the expected default namespace.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the namespace is missing or different.
    pub fn expect_namespace(&self, expected: &str) -> Result<()> {
        match self.namespace.as_deref() {
            Some(namespace) if namespace == expected => Ok(()),
            Some(namespace) => Err(malformed_error!(
                "Element '{}' has namespace '{}', expected '{}'",
                self.name,
                namespace,
                expected
            )),
            None => Err(malformed_error!(
                "Element '{}' does not declare namespace '{}'",
                self.name,
                expected
            )),
        }
    }

    /// Feeds every attribute to its setter from `setters`.
    ///
    /// An attribute without a setter is a format error; there is no ignore-unknown mode.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for unknown attributes, or whatever the setter
    /// returns for an invalid value.
    pub fn apply_attributes<T>(
        &self,
        target: &mut T,
        setters: &[(&str, AttributeSetter<T>)],
    ) -> Result<()> {
        for (key, value) in self.attributes() {
            match setters.iter().find(|(name, _)| *name == key) {
                Some((_, setter)) => setter(target, value)?,
                None => {
                    return Err(malformed_error!(
                        "Unexpected attribute '{}' on element '{}'",
                        key,
                        self.name
                    ))
                }
            }
        }

        Ok(())
    }

    /// Returns the value of a mandatory attribute.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the attribute is absent.
    pub fn required_attribute(&self, name: &str) -> Result<&str> {
        self.attribute(name).ok_or_else(|| {
            malformed_error!(
                "Element '{}' is missing required attribute '{}'",
                self.name,
                name
            )
        })
    }
}

enum XmlEvent {
    Start(XmlElement),
    End,
    Text(String),
    Eof,
}

/// Pull reader over a buffered input with strict structural rules.
///
/// The reader walks the document element by element. After an element with children has
/// been returned, its children are consumed with [`XmlReader::next_child`] until it returns
/// `None` (the end tag); leaf text is consumed with [`XmlReader::read_text`].
///
/// # Examples
///
/// ```rust
/// use msidata::xml::XmlReader;
///
/// let mut reader = XmlReader::from_xml("<a x='1'><b/><b/></a>");
/// let root = reader.read_root()?;
/// assert_eq!(root.attribute("x"), Some("1"));
///
/// let mut children = 0;
/// while let Some(child) = reader.next_child()? {
///     child.expect_name("b")?;
///     children += 1;
/// }
/// assert_eq!(children, 2);
/// # Ok::<(), msidata::Error>(())
/// ```
pub struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    /// Wraps a buffered input.
    pub fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = true;
        config.expand_empty_elements = false;

        XmlReader {
            reader,
            buf: Vec::new(),
        }
    }

    /// Byte offset of the reader in the input
    #[must_use]
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn next_event(&mut self) -> Result<XmlEvent> {
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(start) => XmlEvent::Start(XmlElement::from_start(&start, false)?),
                Event::Empty(start) => XmlEvent::Start(XmlElement::from_start(&start, true)?),
                Event::End(_) => XmlEvent::End,
                Event::Text(text) => XmlEvent::Text(
                    text.unescape()
                        .map_err(|error| malformed_error!("Invalid text content: {}", error))?
                        .into_owned(),
                ),
                Event::CData(data) => XmlEvent::Text(
                    std::str::from_utf8(&data)
                        .map_err(|_| malformed_error!("CDATA section is not valid UTF-8"))?
                        .to_string(),
                ),
                Event::Eof => XmlEvent::Eof,
                _ => continue,
            };

            return Ok(event);
        }
    }

    /// Reads up to and including the document element.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the input ends or contains text before the
    /// first element.
    pub fn read_root(&mut self) -> Result<XmlElement> {
        loop {
            match self.next_event()? {
                XmlEvent::Start(element) => return Ok(element),
                XmlEvent::Text(text) if is_whitespace(&text) => {}
                XmlEvent::Text(text) => {
                    return Err(malformed_error!(
                        "Unexpected text '{}' before the document element",
                        text.trim()
                    ))
                }
                XmlEvent::End => return Err(malformed_error!("Unexpected end tag")),
                XmlEvent::Eof => return Err(malformed_error!("The document has no element")),
            }
        }
    }

    /// Returns the next child element of the element currently being read, or `None` once
    /// its end tag has been consumed.
    ///
    /// Must only be called for an element that is not [`XmlElement::is_empty`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for non-whitespace text or a premature end of input.
    pub fn next_child(&mut self) -> Result<Option<XmlElement>> {
        loop {
            match self.next_event()? {
                XmlEvent::Start(element) => return Ok(Some(element)),
                XmlEvent::End => return Ok(None),
                XmlEvent::Text(text) if is_whitespace(&text) => {}
                XmlEvent::Text(text) => {
                    return Err(malformed_error!(
                        "Unexpected text '{}' at position {}",
                        text.trim(),
                        self.position()
                    ))
                }
                XmlEvent::Eof => {
                    return Err(malformed_error!("Unexpected end of document"));
                }
            }
        }
    }

    /// Reads the text content of a leaf element up to and including its end tag.
    ///
    /// Must only be called for an element that is not [`XmlElement::is_empty`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a child element appears or the input ends.
    pub fn read_text(&mut self) -> Result<String> {
        let mut content = String::new();
        loop {
            match self.next_event()? {
                XmlEvent::Text(text) => content.push_str(&text),
                XmlEvent::End => return Ok(content),
                XmlEvent::Start(element) => {
                    return Err(malformed_error!(
                        "Unexpected element '{}' inside text content",
                        element.name()
                    ))
                }
                XmlEvent::Eof => return Err(malformed_error!("Unexpected end of document")),
            }
        }
    }

    /// Fails unless the rest of the input is whitespace, comments or processing instructions.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for any trailing element or text.
    pub fn expect_eof(&mut self) -> Result<()> {
        loop {
            match self.next_event()? {
                XmlEvent::Eof => return Ok(()),
                XmlEvent::Text(text) if is_whitespace(&text) => {}
                _ => return Err(malformed_error!("Unexpected content after the document element")),
            }
        }
    }
}

impl<'a> XmlReader<&'a [u8]> {
    /// Reads from an in-memory document.
    #[must_use]
    pub fn from_xml(xml: &'a str) -> Self {
        XmlReader::new(xml.as_bytes())
    }
}

fn is_whitespace(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_skip_namespace_declarations() {
        let mut reader =
            XmlReader::from_xml("<root xmlns='urn:a' xmlns:x='urn:x' xml:space='preserve' k='v'/>");
        let root = reader.read_root().unwrap();

        assert_eq!(root.name(), "root");
        assert_eq!(root.namespace(), Some("urn:a"));
        assert!(root.is_empty());
        assert_eq!(root.attributes().collect::<Vec<_>>(), vec![("k", "v")]);
        assert!(root.expect_namespace("urn:a").is_ok());
        assert!(root.expect_namespace("urn:b").is_err());
    }

    #[test]
    fn test_text_content_preserves_whitespace() {
        let mut reader = XmlReader::from_xml("<f>  a&#xA;b&#xD;c&amp;<![CDATA[<x>]]> </f>");
        let root = reader.read_root().unwrap();
        assert!(!root.is_empty());
        assert_eq!(reader.read_text().unwrap(), "  a\nb\rc&<x> ");
    }

    #[test]
    fn test_stray_text_is_rejected() {
        let mut reader = XmlReader::from_xml("<a>junk<b/></a>");
        reader.read_root().unwrap();
        assert!(matches!(
            reader.next_child(),
            Err(crate::Error::Malformed { .. })
        ));
    }

    #[test]
    fn test_child_inside_text_is_rejected() {
        let mut reader = XmlReader::from_xml("<f>a<b/></f>");
        reader.read_root().unwrap();
        assert!(reader.read_text().is_err());
    }

    #[test]
    fn test_premature_end() {
        let mut reader = XmlReader::from_xml("<a><b/>");
        reader.read_root().unwrap();
        assert!(reader.next_child().unwrap().is_some());
        assert!(reader.next_child().is_err());
    }

    #[test]
    fn test_apply_attributes() {
        #[derive(Default)]
        struct Target {
            name: String,
        }

        const SETTERS: &[(&str, AttributeSetter<Target>)] = &[("name", |target, value| {
            target.name = value.to_string();
            Ok(())
        })];

        let mut reader = XmlReader::from_xml("<t name='x'/>");
        let element = reader.read_root().unwrap();
        let mut target = Target::default();
        element.apply_attributes(&mut target, SETTERS).unwrap();
        assert_eq!(target.name, "x");

        let mut reader = XmlReader::from_xml("<t name='x' other='y'/>");
        let element = reader.read_root().unwrap();
        assert!(element.apply_attributes(&mut target, SETTERS).is_err());
    }

    #[test]
    fn test_trailing_content() {
        let mut reader = XmlReader::from_xml("<a/>  <!-- c -->  ");
        reader.read_root().unwrap();
        assert!(reader.expect_eof().is_ok());

        let mut reader = XmlReader::from_xml("<a/><b/>");
        reader.read_root().unwrap();
        assert!(reader.expect_eof().is_err());
    }
}
