use thiserror::Error;

use crate::sourceline::SourceLineNumber;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Errors fall into a small number of families, each of which is fatal for the operation that
/// produced it. Nothing in this crate suppresses or retries an error; callers that want to keep
/// going after a reported problem (for example to collect several diagnostics) do so themselves.
///
/// # Error Categories
///
/// ## Format Errors
/// - [`Error::Malformed`] - Unexpected element, attribute, text or value in the XML form
/// - [`Error::Xml`] - The XML itself is not well-formed
/// - [`Error::FileError`] - The underlying reader or writer failed
///
/// ## Schema Resolution Errors
/// - [`Error::MissingTableDefinition`] - Data references a table whose schema is not loaded
/// - [`Error::DuplicateTableDefinition`] - Two schemas with the same name were registered
///
/// ## Data Integrity Errors
/// - [`Error::DuplicatePrimaryKey`] - Two rows of one table share a primary key
///
/// ## Type Coercion Errors
/// - [`Error::TypeMismatch`] - A value cannot be represented in the column's type
/// - [`Error::NotNullable`] - Null assigned to a non-nullable column
/// - [`Error::ValueOutOfRange`] - A number violates the column's min/max
///
/// # Examples
///
/// ```rust
/// use msidata::{Error, TableDefinitionCollection};
///
/// let definitions = TableDefinitionCollection::new();
/// match definitions.get("Property") {
///     Err(Error::MissingTableDefinition(name)) => assert_eq!(name, "Property"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The XML form is well-formed but does not follow the expected structure.
    ///
    /// Raised for unknown elements and attributes, wrong node types, stray text, missing
    /// required attributes and attribute values that cannot be parsed. The error records the
    /// source location where the malformation was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The XML parser rejected the input.
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error from the underlying reader or writer.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Data referenced a table whose definition is not part of the active collection.
    ///
    /// This usually means the schema contributed by an extension was not loaded.
    #[error("Missing table definition - {0}")]
    MissingTableDefinition(String),

    /// A table definition with the same name is already registered.
    #[error("Duplicate table definition - {0}")]
    DuplicateTableDefinition(String),

    /// Two rows of one table share a primary key.
    ///
    /// `location` points at the row that collided, `original` at the first row that used the
    /// key.
    #[error(
        "{}: duplicate primary key '{key}' in table '{table}' (first defined at {})",
        display_location(.location),
        display_location(.original)
    )]
    DuplicatePrimaryKey {
        /// Name of the table
        table: String,
        /// The colliding primary key
        key: String,
        /// Location of the row that collided
        location: Option<SourceLineNumber>,
        /// Location of the row that first used the key
        original: Option<SourceLineNumber>,
    },

    /// A value cannot be stored in or read from a column as the requested type.
    #[error("Type mismatch in column '{column}' - expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the column
        column: String,
        /// The type that was required
        expected: &'static str,
        /// Description of the offending value
        found: String,
    },

    /// Null was assigned to a column that does not allow it.
    #[error("Column '{column}' does not allow null values")]
    NotNullable {
        /// Name of the column
        column: String,
    },

    /// A numeric value is outside of the inclusive range declared by the column.
    #[error("Value {value} of column '{column}' is outside of the allowed range {}", display_range(.min, .max))]
    ValueOutOfRange {
        /// Name of the column
        column: String,
        /// The rejected value
        value: i64,
        /// Inclusive lower bound
        min: Option<i64>,
        /// Inclusive upper bound
        max: Option<i64>,
    },

    /// A column index does not exist in the table.
    #[error("Column index {index} is out of range for table '{table}' with {count} columns")]
    ColumnOutOfRange {
        /// Name of the table
        table: String,
        /// The requested index
        index: usize,
        /// Number of columns in the table
        count: usize,
    },

    /// Two rows that must share a layout have a different number of fields.
    #[error("Row of table '{table}' has {found} fields, expected {expected}")]
    FieldCountMismatch {
        /// Name of the table
        table: String,
        /// Number of fields required
        expected: usize,
        /// Number of fields found
        found: usize,
    },

    /// A row was handed to a table with a different definition.
    #[error("Row of table '{found}' can not be added to table '{expected}'")]
    TableMismatch {
        /// Name of the receiving table
        expected: String,
        /// Name of the table the row was created for
        found: String,
    },

    /// A required argument was missing or inconsistent at construction time.
    #[error("Invalid argument - {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns the stable numeric identifier of this error kind.
    ///
    /// Identifiers never change between releases, so they can be used to special-case
    /// errors in diagnostics without matching on message text.
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Error::Malformed { .. } => 1,
            Error::Xml(_) => 2,
            Error::FileError(_) => 3,
            Error::MissingTableDefinition(_) => 100,
            Error::DuplicateTableDefinition(_) => 101,
            Error::DuplicatePrimaryKey { .. } => 200,
            Error::TypeMismatch { .. } => 300,
            Error::NotNullable { .. } => 301,
            Error::ValueOutOfRange { .. } => 302,
            Error::ColumnOutOfRange { .. } => 400,
            Error::FieldCountMismatch { .. } => 401,
            Error::TableMismatch { .. } => 402,
            Error::InvalidArgument(_) => 500,
        }
    }
}

fn display_location(location: &Option<SourceLineNumber>) -> String {
    location
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), ToString::to_string)
}

fn display_range(min: &Option<i64>, max: &Option<i64>) -> String {
    let bound = |value: &Option<i64>| value.map_or_else(String::new, |v| v.to_string());
    format!("{}..={}", bound(min), bound(max))
}
