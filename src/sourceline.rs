//! Source line provenance for rows and diagnostics.
//!
//! A [`SourceLineNumber`] names the authoring file (and optionally the line) a row was
//! produced from. Inclusions form a chain: the innermost location comes first and each
//! `parent` is the location that included it.
//!
//! # Encoded Form
//!
//! The XML intermediate representation stores provenance as a single attribute value:
//! every location is written as `file*line` (or just `file` when the line is unknown), and
//! the chain is joined with `|`, innermost first.
//!
//! ```rust
//! use msidata::SourceLineNumber;
//!
//! let included = SourceLineNumber::with_line("fragment.wxi", 7)
//!     .with_parent(SourceLineNumber::with_line("product.wxs", 21));
//! assert_eq!(included.get_encoded(), "fragment.wxi*7|product.wxs*21");
//!
//! let decoded = SourceLineNumber::from_encoded("fragment.wxi*7|product.wxs*21")?;
//! assert_eq!(decoded, included);
//! # Ok::<(), msidata::Error>(())
//! ```

use std::fmt;

use crate::Result;

const LINE_SEPARATOR: char = '*';
const CHAIN_SEPARATOR: char = '|';

/// A file/line location, optionally included from a parent location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLineNumber {
    file_name: String,
    line_number: Option<u32>,
    parent: Option<Box<SourceLineNumber>>,
}

impl SourceLineNumber {
    /// Creates a location that only knows its file.
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        SourceLineNumber {
            file_name: file_name.into(),
            line_number: None,
            parent: None,
        }
    }

    /// Creates a location for a specific line of a file.
    #[must_use]
    pub fn with_line(file_name: impl Into<String>, line_number: u32) -> Self {
        SourceLineNumber {
            file_name: file_name.into(),
            line_number: Some(line_number),
            parent: None,
        }
    }

    /// Attaches the location that included this one.
    #[must_use]
    pub fn with_parent(mut self, parent: SourceLineNumber) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// The file name of this location
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The line number of this location, if known
    #[must_use]
    pub fn line_number(&self) -> Option<u32> {
        self.line_number
    }

    /// The including location, if any
    #[must_use]
    pub fn parent(&self) -> Option<&SourceLineNumber> {
        self.parent.as_deref()
    }

    /// Encodes the full chain into the single-string form used in XML.
    #[must_use]
    pub fn get_encoded(&self) -> String {
        let mut encoded = String::new();
        let mut current = Some(self);

        while let Some(location) = current {
            if !encoded.is_empty() {
                encoded.push(CHAIN_SEPARATOR);
            }

            encoded.push_str(&location.file_name);
            if let Some(line) = location.line_number {
                encoded.push(LINE_SEPARATOR);
                encoded.push_str(&line.to_string());
            }

            current = location.parent();
        }

        encoded
    }

    /// Decodes a chain produced by [`SourceLineNumber::get_encoded`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the value is empty, a segment has no file name,
    /// or a line number is not a decimal number.
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        if encoded.is_empty() {
            return Err(malformed_error!("Empty source line number"));
        }

        let mut chain: Option<SourceLineNumber> = None;
        for segment in encoded.rsplit(CHAIN_SEPARATOR) {
            let mut location = Self::decode_segment(segment)?;
            location.parent = chain.map(Box::new);
            chain = Some(location);
        }

        chain.ok_or_else(|| malformed_error!("Empty source line number"))
    }

    fn decode_segment(segment: &str) -> Result<Self> {
        let (file_name, line) = match segment.split_once(LINE_SEPARATOR) {
            Some((file_name, line)) => {
                let line = line.parse::<u32>().map_err(|_| {
                    malformed_error!("Invalid line number '{}' in source line number", line)
                })?;
                (file_name, Some(line))
            }
            None => (segment, None),
        };

        if file_name.is_empty() {
            return Err(malformed_error!(
                "Source line number segment '{}' has no file name",
                segment
            ));
        }

        Ok(SourceLineNumber {
            file_name: file_name.to_string(),
            line_number: line,
            parent: None,
        })
    }
}

impl fmt::Display for SourceLineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_number {
            Some(line) => write!(f, "{}({})", self.file_name, line),
            None => write!(f, "{}", self.file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_single() {
        assert_eq!(
            SourceLineNumber::with_line("a.wxs", 3).get_encoded(),
            "a.wxs*3"
        );
        assert_eq!(SourceLineNumber::new("a.wxs").get_encoded(), "a.wxs");
    }

    #[test]
    fn test_chain_roundtrip() {
        let location = SourceLineNumber::with_line("inner.wxi", 2).with_parent(
            SourceLineNumber::new("middle.wxi").with_parent(SourceLineNumber::with_line("outer.wxs", 40)),
        );

        let encoded = location.get_encoded();
        assert_eq!(encoded, "inner.wxi*2|middle.wxi|outer.wxs*40");

        let decoded = SourceLineNumber::from_encoded(&encoded).unwrap();
        assert_eq!(decoded, location);
        assert_eq!(decoded.parent().unwrap().file_name(), "middle.wxi");
        assert_eq!(
            decoded.parent().unwrap().parent().unwrap().line_number(),
            Some(40)
        );
    }

    #[test]
    fn test_decode_errors() {
        assert!(SourceLineNumber::from_encoded("").is_err());
        assert!(SourceLineNumber::from_encoded("a.wxs*x").is_err());
        assert!(SourceLineNumber::from_encoded("*12").is_err());
        assert!(SourceLineNumber::from_encoded("a.wxs*1|").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceLineNumber::with_line("a.wxs", 9).to_string(), "a.wxs(9)");
        assert_eq!(SourceLineNumber::new("a.wxs").to_string(), "a.wxs");
    }
}
