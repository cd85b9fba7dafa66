//! The `windowsInstallerData` document: the table data of one build output.
//!
//! A data document carries the output type, an optional codepage, the definitions of the
//! tables it contains and the tables themselves:
//!
//! ```text
//! <windowsInstallerData xmlns="http://wixtoolset.org/schemas/v4/windowsinstallerdata" type="Product">
//!   <tableDefinitions xmlns="http://wixtoolset.org/schemas/v4/wi/tables">...</tableDefinitions>
//!   <table name="Property">
//!     <row><field>ProductCode</field><field>{...}</field></row>
//!   </table>
//! </windowsInstallerData>
//! ```
//!
//! Inline definitions take precedence while reading; tables they do not define resolve
//! through a fallback collection, by default [`crate::catalog::table_definitions`].

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use crate::{
    catalog,
    schema::TableDefinitionCollection,
    tables::{Table, TableIndexedCollection},
    xml::{AttributeSetter, XmlElement, XmlReader, XmlWriter, DATA_NAMESPACE},
    Result,
};

/// Kind of build output a data document describes
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
pub enum OutputType {
    /// Merge module (`.msm`)
    Module,
    /// Patch (`.msp`)
    Patch,
    /// Patch creation properties (`.pcp`)
    PatchCreation,
    /// Installer package (`.msi`)
    #[default]
    Product,
    /// Transform (`.mst`)
    Transform,
}

/// Table data of one output.
///
/// # Examples
///
/// ```rust
/// use msidata::output::{OutputType, WindowsInstallerData};
///
/// let mut data = WindowsInstallerData::new(OutputType::Product);
/// data.set_codepage(Some(1252));
///
/// let row = data.ensure_table("Property")?.create_row(None);
/// row.set(0, "ProductName")?;
/// row.set(1, "Example")?;
///
/// let xml = data.to_xml()?;
/// let loaded = WindowsInstallerData::from_xml(&xml)?;
/// assert_eq!(loaded.codepage(), Some(1252));
/// assert_eq!(loaded.tables().get("Property").map(|t| t.len()), Some(1));
/// # Ok::<(), msidata::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowsInstallerData {
    output_type: OutputType,
    codepage: Option<u32>,
    tables: TableIndexedCollection,
}

impl WindowsInstallerData {
    /// Creates an empty document of the given type
    #[must_use]
    pub fn new(output_type: OutputType) -> Self {
        WindowsInstallerData {
            output_type,
            codepage: None,
            tables: TableIndexedCollection::new(),
        }
    }

    /// Kind of output
    #[must_use]
    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    /// Codepage of the output, if one was set
    #[must_use]
    pub fn codepage(&self) -> Option<u32> {
        self.codepage
    }

    /// Sets or clears the codepage
    pub fn set_codepage(&mut self, codepage: Option<u32>) {
        self.codepage = codepage;
    }

    /// Tables of the output
    #[must_use]
    pub fn tables(&self) -> &TableIndexedCollection {
        &self.tables
    }

    /// Tables of the output, mutable
    pub fn tables_mut(&mut self) -> &mut TableIndexedCollection {
        &mut self.tables
    }

    /// Returns the table `name`, creating it from the catalog definition if needed.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingTableDefinition`] if the table is neither present nor part of
    /// the catalog.
    pub fn ensure_table(&mut self, name: &str) -> Result<&mut Table> {
        let definition = match self.tables.get(name) {
            Some(table) => table.definition().clone(),
            None => catalog::table_definitions().get(name)?.clone(),
        };

        Ok(self.tables.ensure_table(&definition))
    }

    /// Reads a data document, resolving tables through the catalog when the document does
    /// not define them.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for structural problems and
    /// [`crate::Error::MissingTableDefinition`] for tables that can not be resolved.
    pub fn load<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        Self::load_with_definitions(reader, catalog::table_definitions())
    }

    /// Reads a data document, resolving tables the document does not define through
    /// `fallback`.
    ///
    /// # Errors
    /// See [`WindowsInstallerData::load`].
    pub fn load_with_definitions<R: BufRead>(
        reader: &mut XmlReader<R>,
        fallback: &TableDefinitionCollection,
    ) -> Result<Self> {
        let root = reader.read_root()?;
        let data = Self::read(reader, &root, fallback)?;
        reader.expect_eof()?;
        Ok(data)
    }

    /// Reads a `windowsInstallerData` element whose start tag was already consumed.
    ///
    /// ## Arguments
    /// * 'reader'   - Reader positioned after the start tag
    /// * 'element'  - The start tag
    /// * 'fallback' - Definitions of tables the document does not define inline
    ///
    /// # Errors
    /// See [`WindowsInstallerData::load`]. A second `tableDefinitions` element or one that
    /// follows a `table` is malformed.
    pub fn read<R: BufRead>(
        reader: &mut XmlReader<R>,
        element: &XmlElement,
        fallback: &TableDefinitionCollection,
    ) -> Result<Self> {
        element.expect_name("windowsInstallerData")?;
        element.expect_namespace(DATA_NAMESPACE)?;

        let mut attributes = DataAttributes::default();
        element.apply_attributes(&mut attributes, DATA_ATTRIBUTES)?;
        let output_type = attributes
            .output_type
            .ok_or_else(|| malformed_error!("windowsInstallerData is missing attribute 'type'"))?;

        let mut data = WindowsInstallerData::new(output_type);
        data.codepage = attributes.codepage;

        let mut inline: Option<TableDefinitionCollection> = None;
        if !element.is_empty() {
            while let Some(child) = reader.next_child()? {
                match child.name() {
                    "tableDefinitions" => {
                        if inline.is_some() || !data.tables.is_empty() {
                            return Err(malformed_error!(
                                "tableDefinitions must appear once, before any table"
                            ));
                        }
                        inline = Some(TableDefinitionCollection::read(reader, &child)?);
                    }
                    "table" => {
                        let name = child.required_attribute("name")?;
                        let definitions = match &inline {
                            Some(inline) if inline.contains(name) => inline,
                            _ => fallback,
                        };
                        let table = Table::read(reader, &child, definitions)?;
                        data.tables.insert(table).map_err(|_| {
                            malformed_error!("Table '{}' appears more than once", name)
                        })?;
                    }
                    other => {
                        return Err(malformed_error!(
                            "Unexpected element '{}' in windowsInstallerData",
                            other
                        ))
                    }
                }
            }
        }

        debug!(
            output_type = %data.output_type,
            tables = data.tables.len(),
            inline_definitions = inline.as_ref().map_or(0, TableDefinitionCollection::len),
            "read windows installer data"
        );
        Ok(data)
    }

    /// Writes the document: the definitions of every contained table, then the tables in
    /// name order.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        let codepage = self.codepage.map(|codepage| codepage.to_string());
        writer.start(
            "windowsInstallerData",
            &[
                ("xmlns", Some(DATA_NAMESPACE)),
                ("type", Some(self.output_type.into())),
                ("codepage", codepage.as_deref()),
            ],
        )?;

        let definitions = TableDefinitionCollection::from_definitions(
            self.tables.iter().map(|table| table.definition().clone()),
        )?;
        definitions.write(writer)?;

        for table in &self.tables {
            table.write(writer)?;
        }
        writer.end("windowsInstallerData")?;

        debug!(
            output_type = %self.output_type,
            tables = self.tables.len(),
            "wrote windows installer data"
        );
        Ok(())
    }

    /// Reads a complete document from a buffered input.
    ///
    /// # Errors
    /// See [`WindowsInstallerData::load`].
    pub fn from_reader<R: BufRead>(input: R) -> Result<Self> {
        Self::load(&mut XmlReader::new(input))
    }

    /// Reads a complete document from a string.
    ///
    /// # Errors
    /// See [`WindowsInstallerData::load`].
    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::load(&mut XmlReader::from_xml(xml))
    }

    /// Writes the document with an XML declaration and two-space indentation.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn to_writer<W: Write>(&self, output: W) -> Result<W> {
        let mut writer = XmlWriter::with_indent(output, 2);
        writer.declaration()?;
        self.write(&mut writer)?;
        Ok(writer.into_inner())
    }

    /// Writes the document to a string, see [`WindowsInstallerData::to_writer`].
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_xml(&self) -> Result<String> {
        let bytes = self.to_writer(Vec::new())?;
        String::from_utf8(bytes).map_err(|_| malformed_error!("Written document is not UTF-8"))
    }
}

#[derive(Default)]
struct DataAttributes {
    output_type: Option<OutputType>,
    codepage: Option<u32>,
}

const DATA_ATTRIBUTES: &[(&str, AttributeSetter<DataAttributes>)] = &[
    ("type", |attributes, value| {
        attributes.output_type = Some(
            OutputType::from_str(value)
                .map_err(|_| malformed_error!("Invalid output type '{}'", value))?,
        );
        Ok(())
    }),
    ("codepage", |attributes, value| {
        attributes.codepage = Some(crate::xml::parse_number("codepage", value)?);
        Ok(())
    }),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::factories::two_key_definition, Error};

    fn product() -> WindowsInstallerData {
        let mut data = WindowsInstallerData::new(OutputType::Product);
        data.set_codepage(Some(65001));

        let property = data.ensure_table("Property").unwrap();
        for (name, value) in [("ProductName", "Example"), ("Manufacturer", "Contoso")] {
            let row = property.create_row(None);
            row.set(0, name).unwrap();
            row.set(1, value).unwrap();
        }

        let media = data.ensure_table("Media").unwrap();
        let row = media.create_row(None);
        row.set(0, 1).unwrap();
        row.set(1, 3).unwrap();
        data
    }

    #[test]
    fn test_roundtrip() {
        let data = product();
        let xml = data.to_xml().unwrap();
        let loaded = WindowsInstallerData::from_xml(&xml).unwrap();

        assert_eq!(loaded.output_type(), OutputType::Product);
        assert_eq!(loaded.codepage(), Some(65001));
        assert_eq!(loaded.tables().len(), 2);

        let property = loaded.tables().get("Property").unwrap();
        let keys: Vec<_> = property.iter().map(|row| row.get_key()).collect();
        assert_eq!(keys, ["ProductName", "Manufacturer"]);

        let media = loaded.tables().get("Media").unwrap();
        assert_eq!(media.rows()[0].field_as_integer(1).unwrap(), 3);

        assert_eq!(loaded.to_xml().unwrap(), xml);
    }

    #[test]
    fn test_empty_table_survives() {
        let mut data = WindowsInstallerData::new(OutputType::Module);
        data.ensure_table("File").unwrap();

        let loaded = WindowsInstallerData::from_xml(&data.to_xml().unwrap()).unwrap();
        assert_eq!(loaded.output_type(), OutputType::Module);
        assert_eq!(loaded.codepage(), None);
        assert!(loaded.tables().get("File").unwrap().is_empty());
    }

    #[test]
    fn test_inline_definitions_take_precedence() {
        let mut data = WindowsInstallerData::new(OutputType::Product);
        let row = data
            .tables_mut()
            .ensure_table(&two_key_definition())
            .create_row(None);
        row.set(0, "Dialog").unwrap();
        row.set(1, "Ok").unwrap();

        let xml = data.to_xml().unwrap();
        let loaded = WindowsInstallerData::from_xml(&xml).unwrap();

        let control = loaded.tables().get("Control").unwrap();
        assert_eq!(control.definition().columns().len(), 3);
        assert_eq!(control.rows()[0].get_key(), "Dialog/Ok");
    }

    #[test]
    fn test_catalog_fallback() {
        let xml = format!(
            r#"<windowsInstallerData xmlns="{DATA_NAMESPACE}" type="Patch">
                 <table name="Property"><row><field>A</field><field>1</field></row></table>
               </windowsInstallerData>"#
        );

        let loaded = WindowsInstallerData::from_xml(&xml).unwrap();
        assert_eq!(loaded.output_type(), OutputType::Patch);
        assert_eq!(loaded.tables().get("Property").unwrap().len(), 1);
    }

    #[test]
    fn test_strict_structure() {
        let missing_namespace = r#"<windowsInstallerData type="Product"/>"#;
        assert!(matches!(
            WindowsInstallerData::from_xml(missing_namespace),
            Err(Error::Malformed { .. })
        ));

        let missing_type = format!(r#"<windowsInstallerData xmlns="{DATA_NAMESPACE}"/>"#);
        assert!(WindowsInstallerData::from_xml(&missing_type).is_err());

        let bad_type = format!(r#"<windowsInstallerData xmlns="{DATA_NAMESPACE}" type="Msi"/>"#);
        assert!(WindowsInstallerData::from_xml(&bad_type).is_err());

        let unknown_child = format!(
            r#"<windowsInstallerData xmlns="{DATA_NAMESPACE}" type="Product"><extra/></windowsInstallerData>"#
        );
        assert!(matches!(
            WindowsInstallerData::from_xml(&unknown_child),
            Err(Error::Malformed { .. })
        ));

        let unknown_table = format!(
            r#"<windowsInstallerData xmlns="{DATA_NAMESPACE}" type="Product"><table name="NoSuchTable"/></windowsInstallerData>"#
        );
        assert!(matches!(
            WindowsInstallerData::from_xml(&unknown_table),
            Err(Error::MissingTableDefinition(name)) if name == "NoSuchTable"
        ));

        let late_definitions = format!(
            r#"<windowsInstallerData xmlns="{DATA_NAMESPACE}" type="Product"><table name="Property"/><tableDefinitions xmlns="http://wixtoolset.org/schemas/v4/wi/tables"/></windowsInstallerData>"#
        );
        assert!(WindowsInstallerData::from_xml(&late_definitions).is_err());
    }
}
