//! Name-indexed set of tables.

use std::collections::{btree_map, BTreeMap};

use crate::{
    schema::TableDefinitionRc,
    tables::Table,
    Error, Result,
};

/// The tables of one output, at most one per name, iterated in name order.
#[derive(Clone, Debug, Default)]
pub struct TableIndexedCollection {
    tables: BTreeMap<String, Table>,
}

impl TableIndexedCollection {
    /// Creates an empty collection
    #[must_use]
    pub fn new() -> Self {
        TableIndexedCollection {
            tables: BTreeMap::new(),
        }
    }

    /// Adds a table.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if a table with the same name is already present.
    pub fn insert(&mut self, table: Table) -> Result<()> {
        match self.tables.entry(table.name().to_string()) {
            btree_map::Entry::Occupied(entry) => Err(Error::InvalidArgument(format!(
                "table '{}' is already part of the collection",
                entry.key()
            ))),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(table);
                Ok(())
            }
        }
    }

    /// Returns the table for `definition`, creating an empty one if needed
    pub fn ensure_table(&mut self, definition: &TableDefinitionRc) -> &mut Table {
        self.tables
            .entry(definition.name().to_string())
            .or_insert_with(|| Table::new(definition.clone()))
    }

    /// Table named `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Table named `name`, mutable
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    /// Removes and returns the table named `name`
    pub fn remove(&mut self, name: &str) -> Option<Table> {
        self.tables.remove(name)
    }

    /// True if a table named `name` is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Number of tables
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True if there are no tables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterates over the tables in name order
    pub fn iter(&self) -> btree_map::Values<'_, String, Table> {
        self.tables.values()
    }

    /// Iterates mutably over the tables in name order
    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, String, Table> {
        self.tables.values_mut()
    }
}

impl<'a> IntoIterator for &'a TableIndexedCollection {
    type Item = &'a Table;
    type IntoIter = btree_map::Values<'a, String, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.values()
    }
}

impl IntoIterator for TableIndexedCollection {
    type Item = Table;
    type IntoIter = btree_map::IntoValues<String, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::factories::{keyless_definition, two_key_definition};

    #[test]
    fn test_insert_and_ensure() {
        let mut tables = TableIndexedCollection::new();
        tables.insert(Table::new(two_key_definition())).unwrap();
        assert!(tables.insert(Table::new(two_key_definition())).is_err());

        tables.ensure_table(&two_key_definition()).create_row(None);
        tables.ensure_table(&keyless_definition());

        assert_eq!(tables.len(), 2);
        assert_eq!(tables.get("Control").unwrap().len(), 1);
        assert!(tables.get("Missing").is_none());

        let names: Vec<_> = tables.iter().map(Table::name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);

        assert!(tables.remove("Control").is_some());
        assert!(!tables.contains("Control"));
    }
}
