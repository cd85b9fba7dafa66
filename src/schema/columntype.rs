//! Enumerations describing a column: storage type, validation category, modularization
//! behavior and the boolean flag set.
//!
//! The string form of every enum (through `strum`'s `Display`/`EnumString`) is the exact
//! attribute value used by the XML intermediate representation.

use bitflags::bitflags;
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Storage type of a column.
///
/// `Object` columns reference an external stream; `Preserved` columns hold strings that must
/// survive transforms verbatim and are compared like `Object` columns when diffing.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, EnumCount, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum ColumnType {
    /// Type not known, never valid in a built-in definition
    #[default]
    Unknown,
    /// Plain string
    String,
    /// String that may be translated
    Localized,
    /// 16 or 32 bit integer, depending on the column length
    Number,
    /// Reference to a binary stream
    Object,
    /// String kept verbatim across transforms
    Preserved,
}

impl ColumnType {
    /// True for types whose values hold text (`String`, `Localized`, `Preserved`)
    #[must_use]
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            ColumnType::String | ColumnType::Localized | ColumnType::Preserved
        )
    }

    /// True for types compared by reference when diffing (`Object`, `Preserved`)
    #[must_use]
    pub fn is_reference(self) -> bool {
        matches!(self, ColumnType::Object | ColumnType::Preserved)
    }
}

/// Semantic validation category of a column.
///
/// The category determines which content rules apply on top of the storage type, see
/// [`crate::validation`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, EnumCount, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum ColumnCategory {
    /// No category
    #[default]
    Unknown,
    /// Free text
    Text,
    /// Text that must not contain lowercase letters
    UpperCase,
    /// Text that must not contain uppercase letters
    LowerCase,
    /// 16 bit integer
    Integer,
    /// 32 bit integer
    DoubleInteger,
    /// Packed MS-DOS date and time
    TimeDate,
    /// Identifier: letters, digits, underscores and periods, not starting with a digit or period
    Identifier,
    /// Property name, optionally prefixed with `%` for environment variables
    Property,
    /// Short or short|long file name
    Filename,
    /// File name that may contain `?` and `*`
    WildCardFilename,
    /// Path, may contain properties
    Path,
    /// Semicolon-delimited list of paths
    Paths,
    /// Full, relative or UNC path
    AnyPath,
    /// Default directory specification of the Directory table
    DefaultDir,
    /// Registry path
    RegPath,
    /// Text with embedded `[Property]` references
    Formatted,
    /// Formatted security descriptor definition text
    #[strum(serialize = "formattedSddl")]
    FormattedSDDLText,
    /// Formatted text used as a template
    Template,
    /// Conditional expression
    Condition,
    /// Braced, uppercase GUID
    Guid,
    /// Dotted version, up to four parts
    Version,
    /// Comma-separated language ids
    Language,
    /// Binary stream
    Binary,
    /// Source of a custom action
    CustomSource,
    /// Cabinet name, optionally prefixed with `#`
    Cabinet,
    /// Shortcut target
    Shortcut,
}

/// How a column value is rewritten when a merge module is modularized.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, EnumCount, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum ColumnModularizeType {
    /// Value is not modularized
    #[default]
    None,
    /// Whole value is an identifier to modularize
    Column,
    /// Value is a file key or a companion file version
    CompanionFile,
    /// Property references inside a condition
    Condition,
    /// Argument of a control event
    ControlEventArgument,
    /// Property references inside control text
    ControlText,
    /// Icon name, keeps its extension
    Icon,
    /// Property name
    Property,
    /// Semicolon-delimited list of identifiers
    SemicolonDelimited,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Boolean attributes of a column
    pub struct ColumnFlags : u16 {
        /// Column is part of the primary key
        const PRIMARY_KEY = 0x0001;
        /// Column accepts null
        const NULLABLE = 0x0002;
        /// Column is localizable even if its type is not `Localized`
        const LOCALIZABLE = 0x0004;
        /// Column does not exist in the physical table
        const UNREAL = 0x0008;
        /// Values are written as CDATA sections
        const USE_CDATA = 0x0010;
        /// Column was added by a transform
        const ADDED = 0x0020;
        /// Tabs, newlines and carriage returns are escaped in IDT exports
        const ESCAPE_IDT_CHARACTERS = 0x0040;
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::{EnumCount, IntoEnumIterator};

    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(ColumnCategory::COUNT, 27);
        assert_eq!(ColumnCategory::WildCardFilename.to_string(), "wildCardFilename");
        assert_eq!(ColumnCategory::FormattedSDDLText.to_string(), "formattedSddl");
        assert_eq!(
            ColumnCategory::from_str("formattedSddl").unwrap(),
            ColumnCategory::FormattedSDDLText
        );

        for category in ColumnCategory::iter() {
            assert_eq!(
                ColumnCategory::from_str(&category.to_string()).unwrap(),
                category
            );
        }
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ColumnType::Localized.to_string(), "localized");
        assert_eq!(ColumnType::from_str("preserved").unwrap(), ColumnType::Preserved);
        assert!(ColumnType::from_str("String").is_err());
        assert!(ColumnType::Preserved.is_reference());
        assert!(ColumnType::Preserved.is_textual());
        assert!(!ColumnType::Number.is_textual());
    }

    #[test]
    fn test_modularize_names() {
        assert_eq!(
            ColumnModularizeType::SemicolonDelimited.to_string(),
            "semicolonDelimited"
        );
        assert_eq!(
            ColumnModularizeType::from_str("controlEventArgument").unwrap(),
            ColumnModularizeType::ControlEventArgument
        );
    }
}
