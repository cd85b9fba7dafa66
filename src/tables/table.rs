//! Tables: ordered rows bound to one definition.

use std::{
    collections::HashMap,
    io::{BufRead, Write},
    str::FromStr,
    sync::Arc,
};

use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use crate::{
    schema::{TableDefinitionCollection, TableDefinitionRc},
    tables::{Row, RowNumberAllocator},
    xml::{AttributeSetter, XmlElement, XmlReader, XmlWriter},
    Error, Result, SourceLineNumber,
};

/// Role of a table in a transform.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum TableOperation {
    /// Table exists on both sides
    #[default]
    None,
    /// Table is added
    Add,
    /// Table is dropped
    Drop,
}

/// Rows of one table in insertion order.
///
/// Primary-key uniqueness is not enforced while rows are added; call
/// [`Table::validate_rows`] once the table is populated.
///
/// # Examples
///
/// ```rust
/// use msidata::{catalog, Table};
///
/// let mut table = Table::new(catalog::table_definitions().get("Property")?.clone());
/// table.create_row(None).set(0, "ALLUSERS")?;
/// table.create_row(None).set(0, "ALLUSERS")?;
///
/// assert!(table.validate_rows().is_err());
/// # Ok::<(), msidata::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Table {
    definition: TableDefinitionRc,
    rows: Vec<Row>,
    operation: TableOperation,
    allocator: Arc<RowNumberAllocator>,
}

impl Table {
    /// Creates an empty table numbering its rows with the process-wide allocator
    #[must_use]
    pub fn new(definition: TableDefinitionRc) -> Self {
        Self::with_allocator(definition, RowNumberAllocator::shared())
    }

    /// Creates an empty table numbering its rows with `allocator`
    #[must_use]
    pub fn with_allocator(definition: TableDefinitionRc, allocator: Arc<RowNumberAllocator>) -> Self {
        Table {
            definition,
            rows: Vec::new(),
            operation: TableOperation::None,
            allocator,
        }
    }

    /// Name of the table
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Definition of the table
    #[must_use]
    pub fn definition(&self) -> &TableDefinitionRc {
        &self.definition
    }

    /// Transform role
    #[must_use]
    pub fn operation(&self) -> TableOperation {
        self.operation
    }

    /// Sets the transform role
    pub fn set_operation(&mut self, operation: TableOperation) {
        self.operation = operation;
    }

    /// Rows in insertion order
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows in insertion order, for in-place modification
    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Iterates over the rows
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a new row with null fields and returns it
    pub fn create_row(&mut self, source_line_numbers: Option<SourceLineNumber>) -> &mut Row {
        let row = Row::with_number(
            self.definition.clone(),
            source_line_numbers,
            self.allocator.allocate(),
            true,
        );

        let index = self.rows.len();
        self.rows.push(row);
        &mut self.rows[index]
    }

    /// Appends an existing row, which becomes owned by this table.
    ///
    /// # Errors
    /// Returns [`Error::TableMismatch`] if the row belongs to another table.
    pub fn push_row(&mut self, mut row: Row) -> Result<()> {
        if row.table_name() != self.name() {
            return Err(Error::TableMismatch {
                expected: self.name().to_string(),
                found: row.table_name().to_string(),
            });
        }

        row.set_owned(true);
        self.rows.push(row);
        Ok(())
    }

    /// Removes and returns the row at `index`
    pub fn remove_row(&mut self, index: usize) -> Option<Row> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Keeps only the rows for which `keep` returns true
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(keep);
    }

    /// Fails on the first row whose key was already used by an earlier row.
    ///
    /// Null key columns take part as empty strings, so two rows with null keys collide.
    /// Tables without primary-key columns always pass, since their rows are keyed by their
    /// unique numbers.
    ///
    /// # Errors
    /// Returns [`Error::DuplicatePrimaryKey`] with the table name, the key and the locations
    /// of both rows.
    pub fn validate_rows(&self) -> Result<()> {
        let mut seen: HashMap<String, &Row> = HashMap::with_capacity(self.rows.len());

        for row in &self.rows {
            let key = row.get_key();
            if let Some(original) = seen.get(&key) {
                return Err(Error::DuplicatePrimaryKey {
                    table: self.name().to_string(),
                    key,
                    location: row.source_line_numbers().cloned(),
                    original: original.source_line_numbers().cloned(),
                });
            }

            seen.insert(key, row);
        }

        Ok(())
    }

    /// Reads a `table` element whose start tag was already consumed.
    ///
    /// The definition is resolved by the `name` attribute through `definitions`.
    ///
    /// # Errors
    /// Returns [`Error::MissingTableDefinition`] for an unknown table name and
    /// [`Error::Malformed`] for unknown attributes or child elements.
    pub fn read<R: BufRead>(
        reader: &mut XmlReader<R>,
        element: &XmlElement,
        definitions: &TableDefinitionCollection,
    ) -> Result<Table> {
        element.expect_name("table")?;

        let mut attributes = TableAttributes::default();
        element.apply_attributes(&mut attributes, TABLE_ATTRIBUTES)?;
        let name = element.required_attribute("name")?;

        let mut table = Table::new(definitions.get(name)?.clone());
        table.operation = attributes.operation;

        if !element.is_empty() {
            while let Some(child) = reader.next_child()? {
                if child.name() != "row" {
                    return Err(malformed_error!(
                        "Unexpected element '{}' in table '{}'",
                        child.name(),
                        name
                    ));
                }
                Row::read(reader, &child, &mut table)?;
            }
        }

        debug!(table = name, rows = table.len(), "read table");
        Ok(table)
    }

    /// Writes a `table` element with one `row` child per row.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        let operation =
            (self.operation != TableOperation::None).then(|| <&'static str>::from(self.operation));
        let attributes = [("name", Some(self.name())), ("op", operation)];

        if self.rows.is_empty() {
            writer.empty("table", &attributes)?;
        } else {
            writer.start("table", &attributes)?;
            for row in &self.rows {
                row.write(writer)?;
            }
            writer.end("table")?;
        }

        debug!(table = self.name(), rows = self.len(), "wrote table");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Default)]
struct TableAttributes {
    operation: TableOperation,
}

const TABLE_ATTRIBUTES: &[(&str, AttributeSetter<TableAttributes>)] = &[
    ("name", |_, _| Ok(())),
    ("op", |attributes, value| {
        attributes.operation = TableOperation::from_str(value)
            .map_err(|_| malformed_error!("Invalid table operation '{}'", value))?;
        Ok(())
    }),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        schema::{ColumnBuilder, ColumnType, TableDefinition},
        tables::{FieldValue, RowOperation},
        test::factories::{keyless_definition, two_key_definition},
    };

    fn definitions() -> TableDefinitionCollection {
        TableDefinitionCollection::from_definitions([two_key_definition(), keyless_definition()])
            .unwrap()
    }

    fn roundtrip(table: &Table) -> Table {
        let mut writer = XmlWriter::new(Vec::new());
        table.write(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner()).unwrap();

        let mut reader = XmlReader::from_xml(&xml);
        let element = reader.read_root().unwrap();
        Table::read(&mut reader, &element, &definitions()).unwrap()
    }

    #[test]
    fn test_create_row_is_owned_and_numbered() {
        let allocator = Arc::new(RowNumberAllocator::new());
        let mut table = Table::with_allocator(two_key_definition(), allocator);

        assert_eq!(table.create_row(None).number(), 1);
        assert_eq!(table.create_row(None).number(), 2);
        assert!(table.rows().iter().all(Row::is_owned));
    }

    #[test]
    fn test_push_row_rejects_other_tables() {
        let mut table = Table::new(two_key_definition());
        let foreign = Row::new(keyless_definition(), None);
        assert!(matches!(
            table.push_row(foreign),
            Err(Error::TableMismatch { .. })
        ));

        table.push_row(Row::new(two_key_definition(), None)).unwrap();
        assert!(table.rows()[0].is_owned());
    }

    #[test]
    fn test_validate_rows() {
        let mut table = Table::new(two_key_definition());
        table.validate_rows().unwrap();

        let row = table.create_row(Some(SourceLineNumber::with_line("a.wxs", 1)));
        row.set(0, "D").unwrap();
        row.set(1, "C").unwrap();
        let row = table.create_row(Some(SourceLineNumber::with_line("a.wxs", 2)));
        row.set(0, "D").unwrap();
        row.set(1, "Other").unwrap();
        table.validate_rows().unwrap();

        let row = table.create_row(Some(SourceLineNumber::with_line("b.wxs", 9)));
        row.set(0, "D").unwrap();
        row.set(1, "C").unwrap();

        match table.validate_rows() {
            Err(Error::DuplicatePrimaryKey {
                table,
                key,
                location,
                original,
            }) => {
                assert_eq!(table, "Control");
                assert_eq!(key, "D/C");
                assert_eq!(location, Some(SourceLineNumber::with_line("b.wxs", 9)));
                assert_eq!(original, Some(SourceLineNumber::with_line("a.wxs", 1)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_validate_rows_null_keys_collide() {
        let definition = Arc::new(
            TableDefinition::with_columns(
                "Nullable",
                vec![
                    ColumnBuilder::new("Id", ColumnType::String)
                        .length(72)
                        .primary_key()
                        .nullable()
                        .build()
                        .unwrap(),
                    ColumnBuilder::new("Value", ColumnType::String)
                        .nullable()
                        .build()
                        .unwrap(),
                ],
            )
            .unwrap(),
        );
        let mut table = Table::new(definition);
        table.create_row(None);
        table.validate_rows().unwrap();

        table.create_row(None);
        assert_eq!(table.rows()[1].get_primary_key().as_deref(), Some(""));
        match table.validate_rows() {
            Err(Error::DuplicatePrimaryKey { table, key, .. }) => {
                assert_eq!(table, "Nullable");
                assert_eq!(key, "");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_validate_rows_keyless() {
        let mut table = Table::new(keyless_definition());
        for _ in 0..3 {
            table.create_row(None).set(0, "same").unwrap();
        }
        table.validate_rows().unwrap();
    }

    #[test]
    fn test_empty_table_roundtrip() {
        let mut table = Table::new(two_key_definition());
        table.set_operation(TableOperation::Drop);

        let mut writer = XmlWriter::new(Vec::new());
        table.write(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(xml, r#"<table name="Control" op="drop"/>"#);

        let read = roundtrip(&table);
        assert!(read.is_empty());
        assert_eq!(read.operation(), TableOperation::Drop);
    }

    #[test]
    fn test_rows_roundtrip() {
        let mut table = Table::new(two_key_definition());
        let row = table.create_row(Some(
            SourceLineNumber::with_line("inner.wxi", 3).with_parent(SourceLineNumber::new("outer.wxs")),
        ));
        row.set(0, "Dialog").unwrap();
        row.set(1, "Next\tButton").unwrap();
        row.set(2, 3).unwrap();
        row.set_operation(RowOperation::Modify);
        row.set_redundant(true);
        row.set_section_id(Some("section1".to_string()));
        table.create_row(None).set(0, "Only").unwrap();

        let read = roundtrip(&table);
        assert_eq!(read.len(), 2);
        for (original, read) in table.iter().zip(&read) {
            assert!(original.is_identical(read));
            assert_eq!(original.operation(), read.operation());
            assert_eq!(original.is_redundant(), read.is_redundant());
            assert_eq!(original.section_id(), read.section_id());
            assert_eq!(original.source_line_numbers(), read.source_line_numbers());
        }
        assert_eq!(read.rows()[1][2], None::<FieldValue>);
    }

    #[test]
    fn test_read_errors() {
        let cases = [
            (r#"<table name="Nope"/>"#, 100),
            (r#"<table name="Control" op="alter"/>"#, 1),
            (r#"<table name="Control" extra="1"/>"#, 1),
            (r#"<table name="Control"><field/></table>"#, 1),
            (
                r#"<table name="Control"><row><field>a</field><field>b</field><field>1</field><field/></row></table>"#,
                1,
            ),
            (r#"<table name="Control"><row op="bogus"/></table>"#, 1),
        ];

        for (xml, code) in cases {
            let mut reader = XmlReader::from_xml(xml);
            let element = reader.read_root().unwrap();
            let error = Table::read(&mut reader, &element, &definitions()).unwrap_err();
            assert_eq!(error.code(), code, "{xml}");
        }
    }

    #[test]
    fn test_short_field_list_leaves_nulls() {
        let xml = r#"<table name="Control"><row op="ADD"><field>a</field></row></table>"#;
        let mut reader = XmlReader::from_xml(xml);
        let element = reader.read_root().unwrap();
        let table = Table::read(&mut reader, &element, &definitions()).unwrap();

        let row = &table.rows()[0];
        assert_eq!(row.operation(), RowOperation::Add);
        assert_eq!(row[0], Some(FieldValue::String("a".to_string())));
        assert!(row.is_column_null(1));
        assert!(row.is_column_null(2));
    }

    #[test]
    fn test_remove_and_retain() {
        let mut table = Table::new(keyless_definition());
        for value in ["a", "b", "c"] {
            table.create_row(None).set(0, value).unwrap();
        }

        assert!(table.remove_row(7).is_none());
        assert_eq!(
            table.remove_row(0).unwrap()[0],
            Some(FieldValue::String("a".to_string()))
        );

        table.retain(|row| row[0] != Some(FieldValue::String("b".to_string())));
        assert_eq!(table.len(), 1);
    }
}
