//! Field values and their coercion rules.
//!
//! A [`Field`] is one cell of a [`crate::tables::Row`]: a shared reference to its
//! [`ColumnDefinition`] plus an optional [`FieldValue`]. Values enter a field in one of three
//! ways, each with its own strictness:
//!
//! - **Raw** - through the row indexer, no checks at all
//! - **Validated** - [`Field::set_data`] coerces the value to the column type and fails with a
//!   typed error on null in a non-nullable column, a type mismatch or a range violation
//! - **Best effort** - [`Field::best_effort_set`] applies the same coercion but only reports
//!   success, leaving the field untouched on failure
//!
//! # Coercion
//!
//! | Column type                    | Integer        | String                 | Object      |
//! |--------------------------------|----------------|------------------------|-------------|
//! | `Number`                       | range checked  | parsed, range checked  | mismatch    |
//! | `Number`, localizable          | range checked  | kept                   | mismatch    |
//! | `String`/`Localized`/`Preserved` | formatted    | kept                   | mismatch    |
//! | `Object`                       | mismatch       | becomes a path         | kept        |
//! | `Unknown`                      | kept           | kept                   | kept        |

use std::{
    borrow::Cow,
    fmt,
    io::{BufRead, Write},
};

use crate::{
    schema::{ColumnDefinition, ColumnDefinitionRc, ColumnType},
    xml::{parse_number, parse_yes_no, AttributeSetter, XmlElement, XmlReader, XmlWriter, YES},
    Error, Result,
};

/// Reference to binary data stored outside of the XML form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectReference {
    path: String,
    embedded_index: Option<u32>,
    base_uri: Option<String>,
}

impl ObjectReference {
    /// References a file on disk
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        ObjectReference {
            path: path.into(),
            embedded_index: None,
            base_uri: None,
        }
    }

    /// References a file embedded in a container at `base_uri`
    #[must_use]
    pub fn embedded(path: impl Into<String>, base_uri: impl Into<String>, index: u32) -> Self {
        ObjectReference {
            path: path.into(),
            embedded_index: Some(index),
            base_uri: Some(base_uri.into()),
        }
    }

    /// Path of the referenced data
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Index of the data inside its container
    #[must_use]
    pub fn embedded_index(&self) -> Option<u32> {
        self.embedded_index
    }

    /// Location of the container
    #[must_use]
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }
}

/// The value held by a non-null field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// 16 or 32 bit integer
    Integer(i32),
    /// Text
    String(String),
    /// Binary data reference
    Object(ObjectReference),
}

impl FieldValue {
    /// Short name of the value kind, used in error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "integer",
            FieldValue::String(_) => "string",
            FieldValue::Object(_) => "object",
        }
    }

    fn describe(&self) -> String {
        format!("{} '{}'", self.kind(), self)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::String(value) => f.write_str(value),
            FieldValue::Object(reference) => f.write_str(reference.path()),
        }
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<ObjectReference> for FieldValue {
    fn from(value: ObjectReference) -> Self {
        FieldValue::Object(value)
    }
}

/// One cell of a row.
#[derive(Clone, Debug)]
pub struct Field {
    column: ColumnDefinitionRc,
    data: Option<FieldValue>,
    modified: bool,
    previous_data: Option<String>,
}

impl Field {
    /// Creates a null field for `column`
    #[must_use]
    pub fn new(column: ColumnDefinitionRc) -> Self {
        Field {
            column,
            data: None,
            modified: false,
            previous_data: None,
        }
    }

    /// The column this field belongs to
    #[must_use]
    pub fn column(&self) -> &ColumnDefinitionRc {
        &self.column
    }

    /// The current value, `None` for null
    #[must_use]
    pub fn data(&self) -> Option<&FieldValue> {
        self.data.as_ref()
    }

    pub(crate) fn raw(&self) -> &Option<FieldValue> {
        &self.data
    }

    pub(crate) fn raw_mut(&mut self) -> &mut Option<FieldValue> {
        &mut self.data
    }

    /// True if the value changed in a transform
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Marks the value as changed in a transform
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Value before a transform changed it
    #[must_use]
    pub fn previous_data(&self) -> Option<&str> {
        self.previous_data.as_deref()
    }

    /// Records the value before a transform changed it
    pub fn set_previous_data(&mut self, previous_data: Option<String>) {
        self.previous_data = previous_data;
    }

    /// Stores `value` after coercing it to the column type.
    ///
    /// # Errors
    /// - [`Error::NotNullable`] for `None` in a non-nullable column
    /// - [`Error::TypeMismatch`] if the value can not be coerced
    /// - [`Error::ValueOutOfRange`] if a number violates the column bounds
    ///
    /// The field is unchanged on error.
    pub fn set_data(&mut self, value: Option<FieldValue>) -> Result<()> {
        self.data = coerce(&self.column, value)?;
        Ok(())
    }

    /// Stores `value` if it can be coerced to the column type.
    ///
    /// Returns `false` and leaves the field unchanged otherwise.
    pub fn best_effort_set(&mut self, value: Option<FieldValue>) -> bool {
        match coerce(&self.column, value) {
            Ok(value) => {
                self.data = value;
                true
            }
            Err(_) => false,
        }
    }

    /// Returns the value as an integer.
    ///
    /// Strings are parsed as decimal numbers.
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] for null, objects and non-numeric strings.
    pub fn as_integer(&self) -> Result<i32> {
        match &self.data {
            Some(FieldValue::Integer(value)) => Ok(*value),
            Some(FieldValue::String(text)) => text.parse().map_err(|_| self.mismatch("integer")),
            _ => Err(self.mismatch("integer")),
        }
    }

    /// Returns the value as an integer, or `None` for null.
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] for objects and non-numeric strings.
    pub fn as_nullable_integer(&self) -> Result<Option<i32>> {
        match self.data {
            None => Ok(None),
            Some(_) => self.as_integer().map(Some),
        }
    }

    /// Returns the value as text, or `None` for null.
    ///
    /// Integers are formatted in decimal, objects yield their path.
    #[must_use]
    pub fn as_string(&self) -> Option<Cow<'_, str>> {
        match &self.data {
            None => None,
            Some(FieldValue::String(text)) => Some(Cow::Borrowed(text)),
            Some(FieldValue::Object(reference)) => Some(Cow::Borrowed(reference.path())),
            Some(FieldValue::Integer(value)) => Some(Cow::Owned(value.to_string())),
        }
    }

    /// Returns the object reference, or `None` for null.
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] for integers and strings.
    pub fn as_object(&self) -> Result<Option<&ObjectReference>> {
        match &self.data {
            None => Ok(None),
            Some(FieldValue::Object(reference)) => Ok(Some(reference)),
            Some(_) => Err(self.mismatch("object")),
        }
    }

    /// True if both fields belong to columns with the same name and hold equal values.
    ///
    /// Null equals null; values of different kinds are never equal.
    #[must_use]
    pub fn is_identical(&self, other: &Field) -> bool {
        self.column.name() == other.column.name() && self.data == other.data
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::TypeMismatch {
            column: self.column.name().to_string(),
            expected,
            found: self
                .data
                .as_ref()
                .map_or_else(|| "null".to_string(), FieldValue::describe),
        }
    }

    /// Reads a `field` element whose start tag was already consumed into this field.
    ///
    /// A self-closing element is null. An element with empty content is a zero-length string
    /// on textual columns and null on `Number` and `Object` columns. `Number` columns hold an
    /// integer when the text parses as one and the raw text otherwise; `Object` columns hold a reference built from the
    /// text and the `embeddedIndex`/`baseUri` attributes.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for unknown attributes, object attributes on other
    /// columns, or child elements.
    pub fn read<R: BufRead>(&mut self, reader: &mut XmlReader<R>, element: &XmlElement) -> Result<()> {
        element.expect_name("field")?;

        let mut attributes = FieldAttributes::default();
        element.apply_attributes(&mut attributes, FIELD_ATTRIBUTES)?;

        let is_object = self.column.column_type() == ColumnType::Object;
        if !is_object && (attributes.embedded_index.is_some() || attributes.base_uri.is_some()) {
            return Err(malformed_error!(
                "Attributes 'embeddedIndex' and 'baseUri' are only valid on object column, not on '{}'",
                self.column.name()
            ));
        }

        let text = if element.is_empty() {
            None
        } else {
            Some(reader.read_text()?)
        };

        self.data = match (self.column.column_type(), text) {
            (_, None) => None,
            (ColumnType::Number | ColumnType::Object, Some(text)) if text.is_empty() => None,
            (ColumnType::Number, Some(text)) => Some(match text.parse::<i32>() {
                Ok(value) => FieldValue::Integer(value),
                Err(_) => FieldValue::String(text),
            }),
            (ColumnType::Object, Some(text)) => Some(FieldValue::Object(ObjectReference {
                path: text,
                embedded_index: attributes.embedded_index,
                base_uri: attributes.base_uri,
            })),
            (_, Some(text)) => Some(FieldValue::String(text)),
        };
        self.modified = attributes.modified;
        self.previous_data = attributes.previous_data;

        Ok(())
    }

    /// Writes this field as a `field` element; null becomes a self-closing element.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        let reference = match &self.data {
            Some(FieldValue::Object(reference)) => Some(reference),
            _ => None,
        };
        let embedded_index = reference
            .and_then(ObjectReference::embedded_index)
            .map(|index| index.to_string());

        let attributes = [
            ("modified", self.modified.then_some(YES)),
            ("previousData", self.previous_data.as_deref()),
            ("embeddedIndex", embedded_index.as_deref()),
            ("baseUri", reference.and_then(ObjectReference::base_uri)),
        ];

        match self.as_string() {
            None => writer.empty("field", &attributes),
            Some(text) => writer.text_element("field", &attributes, &text, self.column.use_cdata()),
        }
    }
}

fn coerce(column: &ColumnDefinition, value: Option<FieldValue>) -> Result<Option<FieldValue>> {
    let Some(value) = value else {
        if column.is_nullable() {
            return Ok(None);
        }
        return Err(Error::NotNullable {
            column: column.name().to_string(),
        });
    };

    let mismatch = |expected: &'static str, value: &FieldValue| Error::TypeMismatch {
        column: column.name().to_string(),
        expected,
        found: value.describe(),
    };

    let coerced = match (column.column_type(), value) {
        (ColumnType::Unknown, value) => value,
        (ColumnType::Number, FieldValue::Integer(number)) => {
            check_range(column, number)?;
            FieldValue::Integer(number)
        }
        (ColumnType::Number, FieldValue::String(text)) if column.is_localizable() => {
            FieldValue::String(text)
        }
        (ColumnType::Number, FieldValue::String(text)) => match text.trim().parse::<i32>() {
            Ok(number) => {
                check_range(column, number)?;
                FieldValue::Integer(number)
            }
            Err(_) => return Err(mismatch("integer", &FieldValue::String(text))),
        },
        (ColumnType::Number, value) => return Err(mismatch("integer", &value)),
        (ColumnType::Object, FieldValue::Object(reference)) => FieldValue::Object(reference),
        (ColumnType::Object, FieldValue::String(path)) => {
            FieldValue::Object(ObjectReference::new(path))
        }
        (ColumnType::Object, value) => return Err(mismatch("object", &value)),
        (_, FieldValue::String(text)) => FieldValue::String(text),
        (_, FieldValue::Integer(number)) => FieldValue::String(number.to_string()),
        (_, value) => return Err(mismatch("string", &value)),
    };

    Ok(Some(coerced))
}

fn check_range(column: &ColumnDefinition, value: i32) -> Result<()> {
    let value = i64::from(value);
    let below = column.min_value().is_some_and(|min| value < min);
    let above = column.max_value().is_some_and(|max| value > max);

    if below || above {
        return Err(Error::ValueOutOfRange {
            column: column.name().to_string(),
            value,
            min: column.min_value(),
            max: column.max_value(),
        });
    }

    Ok(())
}

#[derive(Default)]
struct FieldAttributes {
    modified: bool,
    previous_data: Option<String>,
    embedded_index: Option<u32>,
    base_uri: Option<String>,
}

const FIELD_ATTRIBUTES: &[(&str, AttributeSetter<FieldAttributes>)] = &[
    ("modified", |attributes, value| {
        attributes.modified = parse_yes_no("modified", value)?;
        Ok(())
    }),
    ("previousData", |attributes, value| {
        attributes.previous_data = Some(value.to_string());
        Ok(())
    }),
    ("embeddedIndex", |attributes, value| {
        attributes.embedded_index = Some(parse_number("embeddedIndex", value)?);
        Ok(())
    }),
    ("baseUri", |attributes, value| {
        attributes.base_uri = Some(value.to_string());
        Ok(())
    }),
];

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::schema::ColumnBuilder;

    fn number_column() -> ColumnDefinitionRc {
        Arc::new(
            ColumnBuilder::new("Attributes", ColumnType::Number)
                .length(2)
                .nullable()
                .range(0, 100)
                .finish(),
        )
    }

    fn string_column() -> ColumnDefinitionRc {
        Arc::new(ColumnBuilder::new("Value", ColumnType::String).finish())
    }

    fn roundtrip(field: &Field) -> Field {
        let mut writer = XmlWriter::new(Vec::new());
        field.write(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner()).unwrap();

        let mut reader = XmlReader::from_xml(&xml);
        let element = reader.read_root().unwrap();
        let mut read = Field::new(field.column().clone());
        read.read(&mut reader, &element).unwrap();
        read
    }

    #[test]
    fn test_best_effort_set() {
        let mut field = Field::new(number_column());
        assert!(field.best_effort_set(Some(FieldValue::from(7))));

        assert!(!field.best_effort_set(Some("abc".into())));
        assert_eq!(field.as_integer().unwrap(), 7);

        assert!(!field.best_effort_set(Some(FieldValue::from(101))));
        assert_eq!(field.as_integer().unwrap(), 7);

        assert!(field.best_effort_set(Some("42".into())));
        assert_eq!(field.data(), Some(&FieldValue::Integer(42)));
        assert_eq!(field.as_integer().unwrap(), 42);

        assert!(field.best_effort_set(None));
        assert!(field.data().is_none());
    }

    #[test]
    fn test_set_data_errors() {
        let mut field = Field::new(string_column());
        assert!(matches!(field.set_data(None), Err(Error::NotNullable { .. })));
        assert!(matches!(
            field.set_data(Some(ObjectReference::new("a.bin").into())),
            Err(Error::TypeMismatch { .. })
        ));

        field.set_data(Some(FieldValue::from(12))).unwrap();
        assert_eq!(field.data(), Some(&FieldValue::String("12".to_string())));

        let mut number = Field::new(number_column());
        match number.set_data(Some(FieldValue::from(-1))) {
            Err(Error::ValueOutOfRange { value, min, max, .. }) => {
                assert_eq!((value, min, max), (-1, Some(0), Some(100)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_localizable_number_keeps_text() {
        let column = Arc::new(
            ColumnBuilder::new("Width", ColumnType::Number)
                .length(2)
                .localizable()
                .finish(),
        );
        let mut field = Field::new(column);
        field.set_data(Some("!(loc.Width)".into())).unwrap();
        assert_eq!(field.as_string().unwrap(), "!(loc.Width)");
        assert!(field.as_integer().is_err());
    }

    #[test]
    fn test_strict_accessors() {
        let mut field = Field::new(string_column());
        assert!(field.as_integer().is_err());
        assert_eq!(field.as_nullable_integer().unwrap(), None);

        *field.raw_mut() = Some("abc".into());
        assert!(matches!(
            field.as_integer(),
            Err(Error::TypeMismatch { expected: "integer", .. })
        ));
        assert!(field.as_nullable_integer().is_err());
        assert!(field.as_object().is_err());

        *field.raw_mut() = Some("-12".into());
        assert_eq!(field.as_integer().unwrap(), -12);
    }

    #[test]
    fn test_is_identical() {
        let mut a = Field::new(number_column());
        let mut b = Field::new(number_column());
        assert!(a.is_identical(&b));

        a.set_data(Some(1.into())).unwrap();
        assert!(!a.is_identical(&b));

        *b.raw_mut() = Some("1".into());
        assert!(!a.is_identical(&b));

        b.set_data(Some(1.into())).unwrap();
        assert!(a.is_identical(&b));
        assert!(!a.is_identical(&Field::new(string_column())));
    }

    #[test]
    fn test_xml_roundtrip_values() {
        let mut field = Field::new(string_column());
        field
            .set_data(Some("tab\there\r\nnew line & <markup>".into()))
            .unwrap();
        field.set_modified(true);
        field.set_previous_data(Some("old\nvalue".to_string()));

        let read = roundtrip(&field);
        assert!(read.is_identical(&field));
        assert!(read.is_modified());
        assert_eq!(read.previous_data(), Some("old\nvalue"));

        let null = Field::new(number_column());
        assert!(roundtrip(&null).data().is_none());

        let mut number = Field::new(number_column());
        number.set_data(Some(99.into())).unwrap();
        assert_eq!(roundtrip(&number).data(), Some(&FieldValue::Integer(99)));
    }

    #[test]
    fn test_xml_empty_string_is_not_null() {
        let mut field = Field::new(string_column());
        *field.raw_mut() = Some(FieldValue::String(String::new()));

        let mut writer = XmlWriter::new(Vec::new());
        field.write(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(xml, "<field></field>");

        let read = roundtrip(&field);
        assert_eq!(read.data(), Some(&FieldValue::String(String::new())));
        assert!(read.is_identical(&field));

        let mut reader = XmlReader::from_xml("<field></field>");
        let element = reader.read_root().unwrap();
        let mut number = Field::new(number_column());
        number.read(&mut reader, &element).unwrap();
        assert!(number.data().is_none());
    }

    #[test]
    fn test_xml_object_reference() {
        let column = Arc::new(
            ColumnBuilder::new("Data", ColumnType::Object)
                .nullable()
                .finish(),
        );
        let mut field = Field::new(column);
        field
            .set_data(Some(ObjectReference::embedded("icon.ico", "file:///lib.wixlib", 3).into()))
            .unwrap();

        let read = roundtrip(&field);
        let reference = read.as_object().unwrap().unwrap();
        assert_eq!(reference.path(), "icon.ico");
        assert_eq!(reference.embedded_index(), Some(3));
        assert_eq!(reference.base_uri(), Some("file:///lib.wixlib"));
    }

    #[test]
    fn test_xml_rejects_object_attributes_on_text() {
        let mut reader = XmlReader::from_xml(r#"<field embeddedIndex="1">a</field>"#);
        let element = reader.read_root().unwrap();
        let mut field = Field::new(string_column());
        assert!(field.read(&mut reader, &element).is_err());
    }

    #[test]
    fn test_cdata_column() {
        let column = Arc::new(
            ColumnBuilder::new("Script", ColumnType::String)
                .use_cdata()
                .finish(),
        );
        let mut field = Field::new(column);
        field.set_data(Some("if a < b then".into())).unwrap();

        let mut writer = XmlWriter::new(Vec::new());
        field.write(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(xml, "<field><![CDATA[if a < b then]]></field>");
        assert!(roundtrip(&field).is_identical(&field));
    }
}
