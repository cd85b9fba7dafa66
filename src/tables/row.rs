//! Rows: one field per column, a unique number and transform state.
//!
//! # Keys
//!
//! The primary key of a row is the delimiter-joined text of the leading run of primary-key
//! fields, with null fields replaced by a caller-chosen string. A table without primary-key
//! columns has no primary key at all, which [`Row::get_primary_key`] reports as `None`;
//! [`Row::get_key`] then falls back to the row number, which never collides.
//!
//! ```rust
//! use std::sync::Arc;
//! use msidata::{catalog, Row};
//!
//! let definition = catalog::table_definitions().get("Property")?.clone();
//! let mut row = Row::new(definition, None);
//! row.set(0, "ProductName")?;
//! row.set(1, "Example")?;
//!
//! assert_eq!(row.get_primary_key().as_deref(), Some("ProductName"));
//! assert_eq!(row.get_key(), "ProductName");
//! # Ok::<(), msidata::Error>(())
//! ```

use std::{
    borrow::Cow,
    io::{BufRead, Write},
    ops::{Index, IndexMut},
    str::FromStr,
};

use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::trace;

use crate::{
    schema::TableDefinitionRc,
    tables::{Field, FieldValue, ObjectReference, RowNumberAllocator, StrongRow, Table},
    xml::{parse_yes_no, AttributeSetter, XmlElement, XmlReader, XmlWriter, YES},
    Error, Result, SourceLineNumber,
};

/// Role of a row in a transform.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RowOperation {
    /// Row is unchanged
    #[default]
    None,
    /// Row is added
    Add,
    /// Row is deleted
    Delete,
    /// Some fields of the row changed
    Modify,
}

/// A row of a table.
///
/// The field count always equals the column count of the definition; fields are exposed as
/// a slice and addressed by column index or column name.
#[derive(Clone, Debug)]
pub struct Row {
    definition: TableDefinitionRc,
    fields: Vec<Field>,
    number: u64,
    owned: bool,
    operation: RowOperation,
    redundant: bool,
    section_id: Option<String>,
    source_line_numbers: Option<SourceLineNumber>,
}

impl Row {
    /// Creates an ownerless row numbered by the process-wide allocator
    #[must_use]
    pub fn new(
        definition: TableDefinitionRc,
        source_line_numbers: Option<SourceLineNumber>,
    ) -> Self {
        let number = RowNumberAllocator::shared().allocate();
        Self::with_number(definition, source_line_numbers, number, false)
    }

    pub(crate) fn with_number(
        definition: TableDefinitionRc,
        source_line_numbers: Option<SourceLineNumber>,
        number: u64,
        owned: bool,
    ) -> Self {
        let fields = definition
            .columns()
            .iter()
            .map(|column| Field::new(column.clone()))
            .collect();

        Row {
            definition,
            fields,
            number,
            owned,
            operation: RowOperation::None,
            redundant: false,
            section_id: None,
            source_line_numbers,
        }
    }

    /// Definition of the table this row belongs to
    #[must_use]
    pub fn definition(&self) -> &TableDefinitionRc {
        &self.definition
    }

    /// Name of the table this row belongs to
    #[must_use]
    pub fn table_name(&self) -> &str {
        self.definition.name()
    }

    /// All fields, in column order
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// All fields, in column order, for in-place modification
    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    /// Field at `index`
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Field at `index`, mutable
    pub fn field_mut(&mut self, index: usize) -> Option<&mut Field> {
        self.fields.get_mut(index)
    }

    /// Field of the column named `name`
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.definition
            .column_index(name)
            .and_then(|index| self.fields.get(index))
    }

    /// Field of the column named `name`, mutable
    pub fn field_by_name_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.definition
            .column_index(name)
            .and_then(|index| self.fields.get_mut(index))
    }

    /// Unique number of the row
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// True if the row was created by or added to a [`Table`]
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    pub(crate) fn set_owned(&mut self, owned: bool) {
        self.owned = owned;
    }

    /// Transform role
    #[must_use]
    pub fn operation(&self) -> RowOperation {
        self.operation
    }

    /// Sets the transform role
    pub fn set_operation(&mut self, operation: RowOperation) {
        self.operation = operation;
    }

    /// True if the row duplicates another and is dropped on output
    #[must_use]
    pub fn is_redundant(&self) -> bool {
        self.redundant
    }

    /// Marks the row as redundant
    pub fn set_redundant(&mut self, redundant: bool) {
        self.redundant = redundant;
    }

    /// Provenance tag of the section the row came from
    #[must_use]
    pub fn section_id(&self) -> Option<&str> {
        self.section_id.as_deref()
    }

    /// Sets the provenance tag
    pub fn set_section_id(&mut self, section_id: Option<String>) {
        self.section_id = section_id;
    }

    /// Authoring location of the row
    #[must_use]
    pub fn source_line_numbers(&self) -> Option<&SourceLineNumber> {
        self.source_line_numbers.as_ref()
    }

    fn checked_field(&self, index: usize) -> Result<&Field> {
        self.fields.get(index).ok_or_else(|| self.out_of_range(index))
    }

    fn checked_field_mut(&mut self, index: usize) -> Result<&mut Field> {
        if index >= self.fields.len() {
            return Err(self.out_of_range(index));
        }
        Ok(&mut self.fields[index])
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::ColumnOutOfRange {
            table: self.definition.name().to_string(),
            index,
            count: self.fields.len(),
        }
    }

    /// Stores a validated value in the field at `index`.
    ///
    /// # Errors
    /// Returns [`Error::ColumnOutOfRange`] for a bad index and the errors of
    /// [`Field::set_data`].
    pub fn set(&mut self, index: usize, value: impl Into<FieldValue>) -> Result<()> {
        self.checked_field_mut(index)?.set_data(Some(value.into()))
    }

    /// Stores null in the field at `index`.
    ///
    /// # Errors
    /// Returns [`Error::ColumnOutOfRange`] for a bad index and [`Error::NotNullable`] for a
    /// non-nullable column.
    pub fn set_null(&mut self, index: usize) -> Result<()> {
        self.checked_field_mut(index)?.set_data(None)
    }

    /// Stores `value` in the field at `index` if it can be coerced; see
    /// [`Field::best_effort_set`]. Returns `false` for a bad index.
    pub fn best_effort_set_field(&mut self, index: usize, value: Option<FieldValue>) -> bool {
        self.fields
            .get_mut(index)
            .is_some_and(|field| field.best_effort_set(value))
    }

    /// Field at `index` as an integer.
    ///
    /// # Errors
    /// Returns [`Error::ColumnOutOfRange`] or the errors of [`Field::as_integer`].
    pub fn field_as_integer(&self, index: usize) -> Result<i32> {
        self.checked_field(index)?.as_integer()
    }

    /// Field at `index` as an integer or `None`.
    ///
    /// # Errors
    /// Returns [`Error::ColumnOutOfRange`] or the errors of [`Field::as_nullable_integer`].
    pub fn field_as_nullable_integer(&self, index: usize) -> Result<Option<i32>> {
        self.checked_field(index)?.as_nullable_integer()
    }

    /// Field at `index` as text or `None`.
    ///
    /// # Errors
    /// Returns [`Error::ColumnOutOfRange`] for a bad index.
    pub fn field_as_string(&self, index: usize) -> Result<Option<Cow<'_, str>>> {
        Ok(self.checked_field(index)?.as_string())
    }

    /// Field at `index` as an object reference or `None`.
    ///
    /// # Errors
    /// Returns [`Error::ColumnOutOfRange`] or the errors of [`Field::as_object`].
    pub fn field_as_object(&self, index: usize) -> Result<Option<&ObjectReference>> {
        self.checked_field(index)?.as_object()
    }

    /// Primary key joined with `/`, nulls as empty strings; see [`Row::get_primary_key_with`]
    #[must_use]
    pub fn get_primary_key(&self) -> Option<String> {
        self.get_primary_key_with('/', "")
    }

    /// Joins the values of the leading primary-key fields with `delimiter`, replacing null
    /// values with `null_replacement`.
    ///
    /// Returns `None` if the table has no primary-key columns. A key whose fields are all
    /// null is still `Some`.
    #[must_use]
    pub fn get_primary_key_with(&self, delimiter: char, null_replacement: &str) -> Option<String> {
        let mut key: Option<String> = None;

        for field in &self.fields {
            if !field.column().is_primary_key() {
                break;
            }

            let value = field.as_string();
            let value = value.as_deref().unwrap_or(null_replacement);
            match key.as_mut() {
                Some(key) => {
                    key.push(delimiter);
                    key.push_str(value);
                }
                None => key = Some(value.to_string()),
            }
        }

        key
    }

    /// The primary key, or the row number in decimal if the table has no primary-key columns
    #[must_use]
    pub fn get_key(&self) -> String {
        self.get_primary_key()
            .unwrap_or_else(|| self.number.to_string())
    }

    /// True if the field at `index` is null.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn is_column_null(&self, index: usize) -> bool {
        self.fields[index].data().is_none()
    }

    /// True if the field at `index` is null or a zero-length string.
    ///
    /// Numbers and object references are never empty.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn is_column_empty(&self, index: usize) -> bool {
        match self.fields[index].data() {
            None => true,
            Some(FieldValue::String(text)) => text.is_empty(),
            Some(_) => false,
        }
    }

    /// True if both rows belong to tables of the same name and all fields are identical
    #[must_use]
    pub fn is_identical(&self, other: &Row) -> bool {
        self.definition.name() == other.definition.name()
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(field, other)| field.is_identical(other))
    }

    /// Copies every field value into `target` by position.
    ///
    /// Operation, redundancy, section and source location are not copied.
    ///
    /// # Errors
    /// Returns [`Error::FieldCountMismatch`] if the rows have different field counts.
    pub fn copy_to(&self, target: &mut Row) -> Result<()> {
        if self.fields.len() != target.fields.len() {
            return Err(Error::FieldCountMismatch {
                table: target.definition.name().to_string(),
                expected: target.fields.len(),
                found: self.fields.len(),
            });
        }

        for (source, destination) in self.fields.iter().zip(target.fields.iter_mut()) {
            destination.raw_mut().clone_from(source.raw());
        }

        Ok(())
    }

    /// Typed view of the row, if its table carries a strong row type
    #[must_use]
    pub fn strong(&self) -> Option<StrongRow<'_>> {
        StrongRow::from_row(self)
    }

    /// Reads a `row` element whose start tag was already consumed, appending the row to
    /// `table`.
    ///
    /// Missing trailing `field` elements leave the fields null.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for unknown attributes, unknown child elements or more
    /// `field` elements than the table has columns.
    pub fn read<'t, R: BufRead>(
        reader: &mut XmlReader<R>,
        element: &XmlElement,
        table: &'t mut Table,
    ) -> Result<&'t mut Row> {
        element.expect_name("row")?;

        let mut attributes = RowAttributes::default();
        element.apply_attributes(&mut attributes, ROW_ATTRIBUTES)?;

        let row = table.create_row(attributes.source_line_numbers);
        row.operation = attributes.operation;
        row.redundant = attributes.redundant;
        row.section_id = attributes.section_id;

        if !element.is_empty() {
            let definition = row.definition.clone();
            let mut index = 0;
            while let Some(child) = reader.next_child()? {
                if child.name() != "field" {
                    return Err(malformed_error!(
                        "Unexpected element '{}' in row of table '{}'",
                        child.name(),
                        definition.name()
                    ));
                }

                let count = row.fields.len();
                let field = row.fields.get_mut(index).ok_or_else(|| {
                    malformed_error!(
                        "Row of table '{}' has more than {} fields",
                        definition.name(),
                        count
                    )
                })?;
                field.read(reader, &child)?;
                index += 1;
            }
        }

        trace!(table = row.definition.name(), number = row.number, "read row");
        Ok(row)
    }

    /// Writes a `row` element with one `field` child per field.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        let source_line_numbers = self
            .source_line_numbers
            .as_ref()
            .map(SourceLineNumber::get_encoded);
        let operation =
            (self.operation != RowOperation::None).then(|| <&'static str>::from(self.operation));

        writer.start(
            "row",
            &[
                ("op", operation),
                ("redundant", self.redundant.then_some(YES)),
                ("sectionId", self.section_id.as_deref()),
                ("sourceLineNumber", source_line_numbers.as_deref()),
            ],
        )?;
        for field in &self.fields {
            field.write(writer)?;
        }
        writer.end("row")
    }
}

impl Index<usize> for Row {
    type Output = Option<FieldValue>;

    fn index(&self, index: usize) -> &Self::Output {
        self.fields[index].raw()
    }
}

impl IndexMut<usize> for Row {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.fields[index].raw_mut()
    }
}

#[derive(Default)]
struct RowAttributes {
    operation: RowOperation,
    redundant: bool,
    section_id: Option<String>,
    source_line_numbers: Option<SourceLineNumber>,
}

const ROW_ATTRIBUTES: &[(&str, AttributeSetter<RowAttributes>)] = &[
    ("op", |attributes, value| {
        attributes.operation = RowOperation::from_str(value)
            .map_err(|_| malformed_error!("Invalid row operation '{}'", value))?;
        Ok(())
    }),
    ("redundant", |attributes, value| {
        attributes.redundant = parse_yes_no("redundant", value)?;
        Ok(())
    }),
    ("sectionId", |attributes, value| {
        attributes.section_id = Some(value.to_string());
        Ok(())
    }),
    ("sourceLineNumber", |attributes, value| {
        attributes.source_line_numbers = Some(SourceLineNumber::from_encoded(value)?);
        Ok(())
    }),
];

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        schema::{ColumnBuilder, ColumnType, TableDefinition},
        test::factories::{keyless_definition, two_key_definition},
    };

    #[test]
    fn test_primary_key_derivation() {
        let definition = two_key_definition();
        let mut row = Row::new(definition, None);

        assert_eq!(row.get_primary_key().as_deref(), Some("/"));
        assert_eq!(row.get_primary_key_with('.', "~").as_deref(), Some("~.~"));

        row.set(0, "Dialog1").unwrap();
        row.set(1, "OK").unwrap();
        row.set(2, 3).unwrap();
        assert_eq!(row.get_primary_key().as_deref(), Some("Dialog1/OK"));
        assert_eq!(row.get_key(), "Dialog1/OK");
    }

    #[test]
    fn test_key_of_last_resort() {
        let definition = keyless_definition();
        let first = Row::new(definition.clone(), None);
        let second = Row::new(definition, None);

        assert!(first.get_primary_key().is_none());
        assert_eq!(first.get_key(), first.number().to_string());
        assert_ne!(first.get_key(), second.get_key());
    }

    #[test]
    fn test_single_key_column_ignores_later_keys() {
        let definition = Arc::new(TableDefinition::from_parts(
            "Odd",
            None,
            vec![
                ColumnBuilder::new("A", ColumnType::String).primary_key().finish(),
                ColumnBuilder::new("B", ColumnType::String).finish(),
                ColumnBuilder::new("C", ColumnType::String).primary_key().finish(),
            ],
            None,
            false,
            false,
        ));
        let mut row = Row::new(definition, None);
        row[0] = Some("a".into());
        row[2] = Some("c".into());
        assert_eq!(row.get_primary_key().as_deref(), Some("a"));
    }

    #[test]
    fn test_indexer_is_raw() {
        let mut row = Row::new(two_key_definition(), None);
        row[2] = Some("not a number".into());
        assert_eq!(row[2], Some(FieldValue::String("not a number".to_string())));
        assert!(row.field_as_integer(2).is_err());
        assert!(row.set(2, "nope").is_err());
    }

    #[test]
    #[should_panic]
    fn test_indexer_out_of_range_panics() {
        let row = Row::new(two_key_definition(), None);
        let _ = &row[3];
    }

    #[test]
    fn test_checked_accessors() {
        let mut row = Row::new(two_key_definition(), None);
        assert!(matches!(
            row.field_as_integer(9),
            Err(Error::ColumnOutOfRange { index: 9, count: 3, .. })
        ));
        assert!(!row.best_effort_set_field(9, Some(1.into())));
        assert!(row.best_effort_set_field(2, Some("5".into())));
        assert_eq!(row.field_as_nullable_integer(2).unwrap(), Some(5));
        assert_eq!(row.field_as_string(2).unwrap().as_deref(), Some("5"));
        assert_eq!(
            row.field_by_name("Attributes").unwrap().as_integer().unwrap(),
            5
        );
    }

    #[test]
    fn test_is_column_empty() {
        let mut row = Row::new(two_key_definition(), None);
        assert!(row.is_column_null(0));
        assert!(row.is_column_empty(0));

        row[0] = Some("".into());
        assert!(!row.is_column_null(0));
        assert!(row.is_column_empty(0));

        row[2] = Some(0.into());
        assert!(!row.is_column_empty(2));
    }

    #[test]
    fn test_identity_and_copy() {
        let definition = two_key_definition();
        let mut source = Row::new(definition.clone(), None);
        source.set(0, "D").unwrap();
        source.set(1, "C").unwrap();
        source.set_operation(RowOperation::Add);
        source.set_section_id(Some("s".to_string()));

        let mut target = Row::new(definition, None);
        assert!(!source.is_identical(&target));

        source.copy_to(&mut target).unwrap();
        assert!(source.is_identical(&target));
        assert_eq!(target.operation(), RowOperation::None);
        assert!(target.section_id().is_none());

        let mut other = Row::new(keyless_definition(), None);
        assert!(matches!(
            source.copy_to(&mut other),
            Err(Error::FieldCountMismatch { .. })
        ));
        assert!(!source.is_identical(&other));
    }

    #[test]
    fn test_row_operation_names() {
        assert_eq!(RowOperation::Modify.to_string(), "modify");
        assert_eq!(RowOperation::from_str("Delete").unwrap(), RowOperation::Delete);
        assert_eq!(RowOperation::from_str("ADD").unwrap(), RowOperation::Add);
        assert!(RowOperation::from_str("change").is_err());
    }
}
