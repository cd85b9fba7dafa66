//! Name-indexed registry of table definitions.
//!
//! [`TableDefinitionCollection`] resolves table names to [`TableDefinitionRc`]s when data is
//! read, and is itself persisted as a `tableDefinitions` document. Definitions are shared
//! through `Arc`, so cloning a collection is a shallow copy.
//!
//! Two lookup styles are offered because callers differ in whether an unknown name is
//! expected: [`TableDefinitionCollection::get`] returns the distinguished
//! [`Error::MissingTableDefinition`], [`TableDefinitionCollection::try_get`] returns `None`.

use std::{
    collections::BTreeMap,
    io::{BufRead, Write},
    sync::Arc,
};

use tracing::debug;

use crate::{
    schema::{TableDefinition, TableDefinitionRc},
    xml::{XmlElement, XmlReader, XmlWriter, TABLES_NAMESPACE},
    Error, Result,
};

/// A set of table definitions with unique names.
///
/// # Examples
///
/// ```rust
/// use msidata::{catalog, TableDefinitionCollection};
///
/// let mut definitions = TableDefinitionCollection::new();
/// let property = catalog::table_definitions().get("Property")?.clone();
/// definitions.add(property.clone())?;
///
/// assert!(definitions.contains("Property"));
/// assert!(definitions.add(property).is_err());
/// assert!(definitions.try_get("Nope").is_none());
/// # Ok::<(), msidata::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableDefinitionCollection {
    definitions: BTreeMap<String, TableDefinitionRc>,
}

impl TableDefinitionCollection {
    /// Creates an empty collection
    #[must_use]
    pub fn new() -> Self {
        TableDefinitionCollection {
            definitions: BTreeMap::new(),
        }
    }

    /// Builds a collection from a sequence of definitions.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateTableDefinition`] if two definitions share a name.
    pub fn from_definitions<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = TableDefinitionRc>,
    {
        let mut collection = TableDefinitionCollection::new();
        for definition in definitions {
            collection.add(definition)?;
        }
        Ok(collection)
    }

    /// Adds a definition.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateTableDefinition`] if the name is already registered; the
    /// existing definition is kept.
    pub fn add(&mut self, definition: TableDefinitionRc) -> Result<()> {
        if self.definitions.contains_key(definition.name()) {
            return Err(Error::DuplicateTableDefinition(
                definition.name().to_string(),
            ));
        }

        self.definitions
            .insert(definition.name().to_string(), definition);
        Ok(())
    }

    /// Adds a built-in definition, replacing any definition of the same name
    pub(crate) fn insert_builtin(&mut self, definition: TableDefinitionRc) {
        self.definitions
            .insert(definition.name().to_string(), definition);
    }

    /// Removes and returns the definition named `name`
    pub fn remove(&mut self, name: &str) -> Option<TableDefinitionRc> {
        self.definitions.remove(name)
    }

    /// True if a definition named `name` is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Number of definitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True if there are no definitions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Returns the definition named `name`.
    ///
    /// # Errors
    /// Returns [`Error::MissingTableDefinition`] carrying `name` if it is not registered.
    pub fn get(&self, name: &str) -> Result<&TableDefinitionRc> {
        self.definitions
            .get(name)
            .ok_or_else(|| Error::MissingTableDefinition(name.to_string()))
    }

    /// Returns the definition named `name`, or `None`
    #[must_use]
    pub fn try_get(&self, name: &str) -> Option<&TableDefinitionRc> {
        self.definitions.get(name)
    }

    /// Iterates over the definitions in name order
    pub fn iter(&self) -> impl Iterator<Item = &TableDefinitionRc> {
        self.definitions.values()
    }

    /// Reads a `tableDefinitions` document.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for a wrong root element or namespace, unknown content or
    /// invalid definitions, and [`Error::DuplicateTableDefinition`] for repeated names.
    pub fn load<R: BufRead>(reader: &mut XmlReader<R>) -> Result<Self> {
        let root = reader.read_root()?;
        let collection = Self::read(reader, &root)?;
        reader.expect_eof()?;
        Ok(collection)
    }

    /// Reads a `tableDefinitions` element whose start tag was already consumed.
    ///
    /// The element must declare the table definitions namespace.
    ///
    /// # Errors
    /// See [`TableDefinitionCollection::load`].
    pub fn read<R: BufRead>(reader: &mut XmlReader<R>, element: &XmlElement) -> Result<Self> {
        element.expect_name("tableDefinitions")?;
        element.expect_namespace(TABLES_NAMESPACE)?;
        element.apply_attributes(&mut (), &[])?;

        let mut collection = TableDefinitionCollection::new();
        if !element.is_empty() {
            while let Some(child) = reader.next_child()? {
                match child.name() {
                    "tableDefinition" => {
                        collection.add(Arc::new(TableDefinition::read(reader, &child)?))?;
                    }
                    other => {
                        return Err(malformed_error!(
                            "Unexpected element '{}' in tableDefinitions",
                            other
                        ))
                    }
                }
            }
        }

        debug!(count = collection.len(), "read table definitions");
        Ok(collection)
    }

    /// Writes the collection as a `tableDefinitions` element in name-sorted order.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.start("tableDefinitions", &[("xmlns", Some(TABLES_NAMESPACE))])?;
        for definition in self.definitions.values() {
            definition.write(writer)?;
        }
        writer.end("tableDefinitions")?;

        debug!(count = self.len(), "wrote table definitions");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TableDefinitionCollection {
    type Item = &'a TableDefinitionRc;
    type IntoIter = std::collections::btree_map::Values<'a, String, TableDefinitionRc>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnBuilder, ColumnType};

    fn definition(name: &str) -> TableDefinitionRc {
        Arc::new(
            TableDefinition::with_columns(
                name,
                vec![ColumnBuilder::new("Id", ColumnType::String)
                    .primary_key()
                    .finish()],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_duplicate_add_fails_and_keeps_first() {
        let mut collection = TableDefinitionCollection::new();
        let first = definition("A");
        collection.add(first.clone()).unwrap();

        match collection.add(definition("A")) {
            Err(Error::DuplicateTableDefinition(name)) => assert_eq!(name, "A"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(Arc::ptr_eq(collection.get("A").unwrap(), &first));
    }

    #[test]
    fn test_lookup_styles() {
        let collection =
            TableDefinitionCollection::from_definitions([definition("A"), definition("B")])
                .unwrap();

        assert_eq!(collection.len(), 2);
        assert!(collection.try_get("C").is_none());
        assert!(matches!(
            collection.get("C"),
            Err(Error::MissingTableDefinition(name)) if name == "C"
        ));
        assert!(
            TableDefinitionCollection::from_definitions([definition("A"), definition("A")])
                .is_err()
        );
    }

    #[test]
    fn test_clone_is_shallow() {
        let mut original = TableDefinitionCollection::new();
        original.add(definition("A")).unwrap();

        let mut copy = original.clone();
        copy.add(definition("B")).unwrap();
        copy.remove("A");

        assert!(original.contains("A"));
        assert!(!original.contains("B"));
        assert!(copy.contains("B"));
    }

    #[test]
    fn test_xml_sorted_roundtrip() {
        let collection =
            TableDefinitionCollection::from_definitions([definition("Zeta"), definition("Alpha")])
                .unwrap();

        let mut writer = XmlWriter::new(Vec::new());
        collection.write(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner()).unwrap();
        assert!(xml.find("Alpha").unwrap() < xml.find("Zeta").unwrap());

        let mut reader = XmlReader::from_xml(&xml);
        assert_eq!(TableDefinitionCollection::load(&mut reader).unwrap(), collection);
    }

    #[test]
    fn test_xml_requires_namespace() {
        let mut reader = XmlReader::from_xml("<tableDefinitions/>");
        assert!(TableDefinitionCollection::load(&mut reader).is_err());

        let xml = format!(r#"<tableDefinitions xmlns="{TABLES_NAMESPACE}"><table/></tableDefinitions>"#);
        let mut reader = XmlReader::from_xml(&xml);
        assert!(TableDefinitionCollection::load(&mut reader).is_err());
    }
}
