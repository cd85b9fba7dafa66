//! Table definitions.
//!
//! A [`TableDefinition`] is the immutable schema of one table: its name, the ordered list of
//! columns (primary-key columns first), the optional symbol link and the optional
//! [`StrongRowType`] tag that selects a typed row view.
//!
//! # Primary Key Layout
//!
//! Primary-key columns must form a contiguous run at the start of the column list. Key
//! derivation in [`crate::tables::Row::get_primary_key`] walks the fields from the start and
//! stops at the first non-key column, so a definition violating this layout is rejected by
//! [`TableDefinition::new`].

use std::{io::BufRead, io::Write, str::FromStr, sync::Arc};

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::{
    schema::{ColumnDefinition, ColumnDefinitionRc},
    tables::{Row, RowNumberAllocator},
    xml::{parse_yes_no, AttributeSetter, XmlElement, XmlReader, XmlWriter, YES},
    Error, Result, SourceLineNumber,
};

/// A reference to a `TableDefinition`
pub type TableDefinitionRc = Arc<TableDefinition>;

/// Tag selecting the typed view returned by [`crate::tables::Row::strong`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum StrongRowType {
    /// `Component` table rows
    Component,
    /// `File` table rows
    File,
    /// `Media` table rows
    Media,
    /// `Property` table rows
    Property,
    /// `Upgrade` table rows
    Upgrade,
    /// `Control` table rows
    Control,
}

/// The schema of one table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDefinition {
    name: String,
    symbol_definition: Option<String>,
    columns: Vec<ColumnDefinitionRc>,
    strong_row_type: Option<StrongRowType>,
    unreal: bool,
    symbol_id_is_primary_key: bool,
}

impl TableDefinition {
    /// Creates a validated table definition.
    ///
    /// ## Arguments
    /// * 'name'                     - Name of the table
    /// * 'symbol_definition'        - Name of the symbol type rows of this table map to
    /// * 'columns'                  - Ordered columns, primary-key columns first
    /// * 'strong_row_type'          - Typed row view for this table
    /// * 'unreal'                   - The table does not exist in the physical database
    /// * 'symbol_id_is_primary_key' - The symbol identifier is the logical identity
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the name is empty, there are no columns, a
    /// column name repeats, a column is invalid or the primary-key columns are not a
    /// leading contiguous run.
    pub fn new(
        name: impl Into<String>,
        symbol_definition: Option<String>,
        columns: Vec<ColumnDefinition>,
        strong_row_type: Option<StrongRowType>,
        unreal: bool,
        symbol_id_is_primary_key: bool,
    ) -> Result<Self> {
        let definition = Self::from_parts(
            name,
            symbol_definition,
            columns,
            strong_row_type,
            unreal,
            symbol_id_is_primary_key,
        );
        definition.validate()?;
        Ok(definition)
    }

    /// Creates a table definition with only a name and columns.
    ///
    /// # Errors
    /// See [`TableDefinition::new`].
    pub fn with_columns(name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Result<Self> {
        Self::new(name, None, columns, None, false, false)
    }

    pub(crate) fn from_parts(
        name: impl Into<String>,
        symbol_definition: Option<String>,
        columns: Vec<ColumnDefinition>,
        strong_row_type: Option<StrongRowType>,
        unreal: bool,
        symbol_id_is_primary_key: bool,
    ) -> Self {
        TableDefinition {
            name: name.into(),
            symbol_definition,
            columns: columns.into_iter().map(Arc::new).collect(),
            strong_row_type,
            unreal,
            symbol_id_is_primary_key,
        }
    }

    /// Checks name, column uniqueness, column consistency and the primary key layout.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidArgument(
                "table name must not be empty".to_string(),
            ));
        }

        if self.columns.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "table '{}' has no columns",
                self.name
            )));
        }

        let mut in_primary_key = true;
        for (index, column) in self.columns.iter().enumerate() {
            column.validate()?;

            if self.columns[..index]
                .iter()
                .any(|previous| previous.name() == column.name())
            {
                return Err(Error::InvalidArgument(format!(
                    "table '{}' defines column '{}' more than once",
                    self.name,
                    column.name()
                )));
            }

            if column.is_primary_key() && !in_primary_key {
                return Err(Error::InvalidArgument(format!(
                    "primary key column '{}' of table '{}' follows a non-key column",
                    column.name(),
                    self.name
                )));
            }
            in_primary_key &= column.is_primary_key();
        }

        Ok(())
    }

    /// Name of the table
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the symbol type rows of this table correspond to
    #[must_use]
    pub fn symbol_definition(&self) -> Option<&str> {
        self.symbol_definition.as_deref()
    }

    /// Ordered columns
    #[must_use]
    pub fn columns(&self) -> &[ColumnDefinitionRc] {
        &self.columns
    }

    /// Column at `index`
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&ColumnDefinitionRc> {
        self.columns.get(index)
    }

    /// Index of the column named `name`
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name() == name)
    }

    /// Number of leading primary-key columns
    #[must_use]
    pub fn primary_key_count(&self) -> usize {
        self.columns
            .iter()
            .take_while(|column| column.is_primary_key())
            .count()
    }

    /// Typed row view tag
    #[must_use]
    pub fn strong_row_type(&self) -> Option<StrongRowType> {
        self.strong_row_type
    }

    /// True if the table does not exist in the physical database
    #[must_use]
    pub fn is_unreal(&self) -> bool {
        self.unreal
    }

    /// True if the symbol identifier is the logical identity of a row
    #[must_use]
    pub fn symbol_id_is_primary_key(&self) -> bool {
        self.symbol_id_is_primary_key
    }

    /// Creates an ownerless row numbered by the process-wide allocator.
    ///
    /// Every field is created null, one per column.
    #[must_use]
    pub fn create_row(
        definition: &TableDefinitionRc,
        source_line_numbers: Option<SourceLineNumber>,
    ) -> Row {
        Row::new(definition.clone(), source_line_numbers)
    }

    /// Creates an ownerless row numbered by `allocator`.
    #[must_use]
    pub fn create_row_with(
        definition: &TableDefinitionRc,
        source_line_numbers: Option<SourceLineNumber>,
        allocator: &RowNumberAllocator,
    ) -> Row {
        Row::with_number(definition.clone(), source_line_numbers, allocator.allocate(), false)
    }

    /// Reads a `tableDefinition` element whose start tag was already consumed.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for unknown attributes or child elements and
    /// [`Error::InvalidArgument`] if the resulting definition is inconsistent.
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>, element: &XmlElement) -> Result<Self> {
        element.expect_name("tableDefinition")?;
        element.required_attribute("name")?;

        let mut definition = TableDefinition::from_parts("", None, Vec::new(), None, false, false);
        element.apply_attributes(&mut definition, TABLE_DEFINITION_ATTRIBUTES)?;

        if !element.is_empty() {
            while let Some(child) = reader.next_child()? {
                match child.name() {
                    "column" => definition
                        .columns
                        .push(Arc::new(ColumnDefinition::read(reader, &child)?)),
                    other => {
                        return Err(malformed_error!(
                            "Unexpected element '{}' in table definition '{}'",
                            other,
                            definition.name
                        ))
                    }
                }
            }
        }

        definition.validate()?;
        Ok(definition)
    }

    /// Writes a `tableDefinition` element with one `column` child per column.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        let attributes = [
            ("name", Some(self.name.as_str())),
            ("symbolDefinition", self.symbol_definition.as_deref()),
            (
                "strongRowType",
                self.strong_row_type.map(<&'static str>::from),
            ),
            ("unreal", self.unreal.then_some(YES)),
            (
                "symbolIdIsPrimaryKey",
                self.symbol_id_is_primary_key.then_some(YES),
            ),
        ];

        writer.start("tableDefinition", &attributes)?;
        for column in &self.columns {
            column.write(writer)?;
        }
        writer.end("tableDefinition")
    }
}

const TABLE_DEFINITION_ATTRIBUTES: &[(&str, AttributeSetter<TableDefinition>)] = &[
    ("name", |definition, value| {
        definition.name = value.to_string();
        Ok(())
    }),
    ("symbolDefinition", |definition, value| {
        definition.symbol_definition = Some(value.to_string());
        Ok(())
    }),
    ("strongRowType", |definition, value| {
        definition.strong_row_type = Some(StrongRowType::from_str(value).map_err(|_| {
            malformed_error!("Invalid value '{}' of attribute 'strongRowType'", value)
        })?);
        Ok(())
    }),
    ("unreal", |definition, value| {
        definition.unreal = parse_yes_no("unreal", value)?;
        Ok(())
    }),
    ("symbolIdIsPrimaryKey", |definition, value| {
        definition.symbol_id_is_primary_key = parse_yes_no("symbolIdIsPrimaryKey", value)?;
        Ok(())
    }),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnBuilder, ColumnType};

    fn string_column(name: &str) -> ColumnBuilder {
        ColumnBuilder::new(name, ColumnType::String).length(72)
    }

    #[test]
    fn test_new_validates_layout() {
        assert!(TableDefinition::with_columns("", vec![string_column("A").finish()]).is_err());
        assert!(TableDefinition::with_columns("T", Vec::new()).is_err());
        assert!(TableDefinition::with_columns(
            "T",
            vec![string_column("A").finish(), string_column("A").finish()]
        )
        .is_err());
        assert!(TableDefinition::with_columns(
            "T",
            vec![
                string_column("A").finish(),
                string_column("B").primary_key().finish()
            ]
        )
        .is_err());

        let definition = TableDefinition::with_columns(
            "T",
            vec![
                string_column("A").primary_key().finish(),
                string_column("B").primary_key().finish(),
                string_column("C").finish(),
            ],
        )
        .unwrap();
        assert_eq!(definition.primary_key_count(), 2);
        assert_eq!(definition.column_index("C"), Some(2));
        assert_eq!(definition.column(1).unwrap().name(), "B");
        assert!(definition.column(3).is_none());
    }

    #[test]
    fn test_create_row_sizes_fields() {
        let definition = Arc::new(
            TableDefinition::with_columns(
                "T",
                vec![string_column("A").finish(), string_column("B").nullable().finish()],
            )
            .unwrap(),
        );
        let allocator = RowNumberAllocator::new();

        let first = TableDefinition::create_row_with(&definition, None, &allocator);
        let second = TableDefinition::create_row_with(&definition, None, &allocator);
        assert_eq!(first.fields().len(), 2);
        assert!(first.fields().iter().all(|field| field.data().is_none()));
        assert_eq!(first.number() + 1, second.number());
        assert!(!first.is_owned());
    }

    #[test]
    fn test_xml_roundtrip() {
        let definition = TableDefinition::new(
            "Component",
            Some("Component".to_string()),
            vec![
                string_column("Component").primary_key().finish(),
                ColumnBuilder::new("Attributes", ColumnType::Number)
                    .length(2)
                    .finish(),
            ],
            Some(StrongRowType::Component),
            true,
            true,
        )
        .unwrap();

        let mut writer = XmlWriter::new(Vec::new());
        definition.write(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner()).unwrap();
        assert!(xml.starts_with(
            r#"<tableDefinition name="Component" symbolDefinition="Component" strongRowType="Component" unreal="yes" symbolIdIsPrimaryKey="yes">"#
        ));

        let mut reader = XmlReader::from_xml(&xml);
        let element = reader.read_root().unwrap();
        assert_eq!(TableDefinition::read(&mut reader, &element).unwrap(), definition);
    }

    #[test]
    fn test_xml_rejects_unknown_content() {
        for xml in [
            r#"<tableDefinition name="T" other="x"><column name="A" type="string"/></tableDefinition>"#,
            r#"<tableDefinition name="T"><row/></tableDefinition>"#,
            r#"<tableDefinition name="T"/>"#,
            r#"<tableDefinition name="T" strongRowType="Nope"><column name="A" type="string"/></tableDefinition>"#,
        ] {
            let mut reader = XmlReader::from_xml(xml);
            let element = reader.read_root().unwrap();
            assert!(TableDefinition::read(&mut reader, &element).is_err(), "{xml}");
        }
    }
}
