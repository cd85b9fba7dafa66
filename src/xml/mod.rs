//! Strict XML plumbing for the intermediate representation.
//!
//! Everything in this crate that persists itself does so through the two thin wrappers in this
//! module: [`XmlReader`] over any [`std::io::BufRead`] and [`XmlWriter`] over any
//! [`std::io::Write`]. Both sit on top of `quick-xml` and add the rules the intermediate format
//! depends on:
//!
//! - **No lenient mode** - unknown elements and attributes, stray text between elements and
//!   premature end of input are all [`crate::Error::Malformed`]
//! - **Namespace declarations** are the only extra attributes that are tolerated
//! - **Attribute tables** - elements map attribute names to setters through a declarative
//!   `(name, setter)` slice, see [`XmlElement::apply_attributes`]
//! - **Whitespace-safe text** - carriage returns, newlines and tabs are written as character
//!   references so that no XML processor can normalize them away
//!
//! The caller owns the underlying stream; nothing here opens files.

mod reader;
mod writer;

pub use reader::{AttributeSetter, XmlElement, XmlReader};
pub use writer::XmlWriter;

use crate::Result;

/// Namespace of table definition documents (`tableDefinitions`).
pub const TABLES_NAMESPACE: &str = "http://wixtoolset.org/schemas/v4/wi/tables";

/// Namespace of data documents (`windowsInstallerData`, `table`, `row`, `field`).
pub const DATA_NAMESPACE: &str = "http://wixtoolset.org/schemas/v4/windowsinstallerdata";

/// The only accepted spelling of a true boolean attribute.
pub(crate) const YES: &str = "yes";

/// Parses a `yes`/`no` attribute value.
pub(crate) fn parse_yes_no(attribute: &str, value: &str) -> Result<bool> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(malformed_error!(
            "Attribute '{}' must be 'yes' or 'no', found '{}'",
            attribute,
            value
        )),
    }
}

/// Parses a decimal attribute value.
pub(crate) fn parse_number<T: std::str::FromStr>(attribute: &str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        malformed_error!(
            "Attribute '{}' must be a number, found '{}'",
            attribute,
            value
        )
    })
}
