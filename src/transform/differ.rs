//! Row and table comparison producing transform tables.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use tracing::{debug, trace};

use crate::{
    tables::{
        FieldValue, Row, RowNumberAllocator, RowOperation, Table, TableIndexedCollection,
        TableOperation,
    },
    Error, Result,
};

/// Computes the transform that turns a target table set into an updated one.
///
/// The result holds only what changed:
/// - tables present only in the updated set, marked [`TableOperation::Add`] with all their
///   rows marked [`RowOperation::Add`]
/// - tables present only in the target set, marked [`TableOperation::Drop`] without rows
/// - for tables on both sides, rows whose key exists only in the updated table
///   ([`RowOperation::Add`]), only in the target table ([`RowOperation::Delete`]), or on
///   both sides with different values ([`RowOperation::Modify`])
///
/// Rows are matched by primary key. Rows of tables without primary-key columns are matched
/// by the values of all their columns, so such rows are only ever added or deleted.
///
/// In a modified row every field carries the updated value; changed fields are flagged
/// [`crate::tables::Field::is_modified`] and, unless the column holds a binary reference,
/// record the target value as [`crate::tables::Field::previous_data`].
#[derive(Debug, Clone)]
pub struct Differ {
    allocator: Arc<RowNumberAllocator>,
    keep_unchanged_rows: bool,
}

impl Default for Differ {
    fn default() -> Self {
        Self::new()
    }
}

impl Differ {
    /// Creates a differ numbering transform rows with the shared allocator
    #[must_use]
    pub fn new() -> Self {
        Differ {
            allocator: RowNumberAllocator::shared(),
            keep_unchanged_rows: false,
        }
    }

    /// Creates a differ numbering transform rows with `allocator`
    #[must_use]
    pub fn with_allocator(allocator: Arc<RowNumberAllocator>) -> Self {
        Differ {
            allocator,
            keep_unchanged_rows: false,
        }
    }

    /// Also emit rows that did not change, with [`RowOperation::None`]
    #[must_use]
    pub fn keep_unchanged_rows(mut self, keep: bool) -> Self {
        self.keep_unchanged_rows = keep;
        self
    }

    /// Diffs two table sets.
    ///
    /// ## Arguments
    /// * 'target'  - Tables of the database the transform applies to
    /// * 'updated' - Tables of the database the transform produces
    ///
    /// # Errors
    /// Returns [`Error::DuplicatePrimaryKey`] if a table on either side has duplicate keys,
    /// and [`Error::FieldCountMismatch`] if the two sides define a table with different
    /// column counts.
    pub fn diff(
        &self,
        target: &TableIndexedCollection,
        updated: &TableIndexedCollection,
    ) -> Result<TableIndexedCollection> {
        let mut transform = TableIndexedCollection::new();

        for updated_table in updated {
            let target_table = target.get(updated_table.name());
            if let Some(table) = self.diff_table(target_table, Some(updated_table))? {
                transform.insert(table)?;
            }
        }

        for target_table in target {
            if !updated.contains(target_table.name()) {
                if let Some(table) = self.diff_table(Some(target_table), None)? {
                    transform.insert(table)?;
                }
            }
        }

        debug!(tables = transform.len(), "computed transform");
        Ok(transform)
    }

    /// Diffs two versions of one table.
    ///
    /// Returns `None` if nothing changed or both sides are absent.
    ///
    /// # Errors
    /// See [`Differ::diff`]; additionally [`Error::TableMismatch`] if the two tables have
    /// different names.
    pub fn diff_table(
        &self,
        target: Option<&Table>,
        updated: Option<&Table>,
    ) -> Result<Option<Table>> {
        match (target, updated) {
            (None, None) => Ok(None),
            (None, Some(updated)) => {
                let mut table = self.new_table(updated);
                table.set_operation(TableOperation::Add);
                for row in updated {
                    self.push_copy(&mut table, row, RowOperation::Add)?;
                }

                debug!(table = table.name(), rows = table.len(), "added table");
                Ok(Some(table))
            }
            (Some(target), None) => {
                let mut table = self.new_table(target);
                table.set_operation(TableOperation::Drop);

                debug!(table = table.name(), "dropped table");
                Ok(Some(table))
            }
            (Some(target), Some(updated)) => self.diff_rows(target, updated),
        }
    }

    fn diff_rows(&self, target: &Table, updated: &Table) -> Result<Option<Table>> {
        if target.name() != updated.name() {
            return Err(Error::TableMismatch {
                expected: target.name().to_string(),
                found: updated.name().to_string(),
            });
        }

        let expected = target.definition().columns().len();
        let found = updated.definition().columns().len();
        if expected != found {
            return Err(Error::FieldCountMismatch {
                table: target.name().to_string(),
                expected,
                found,
            });
        }

        target.validate_rows()?;
        updated.validate_rows()?;

        // Keyless tables may hold equal rows; each target row matches at most one update.
        let mut remaining: HashMap<String, VecDeque<&Row>> = HashMap::new();
        for row in target {
            remaining.entry(match_key(row)).or_default().push_back(row);
        }
        let mut table = self.new_table(updated);

        for row in updated {
            let original = remaining
                .get_mut(&match_key(row))
                .and_then(VecDeque::pop_front);
            match original {
                None => self.push_copy(&mut table, row, RowOperation::Add)?,
                Some(original) => {
                    let (transform_row, modified) = self.compare(original, row)?;
                    if modified || self.keep_unchanged_rows {
                        table.push_row(transform_row)?;
                    }
                }
            }
        }

        for row in target {
            let Some(unmatched) = remaining.get_mut(&match_key(row)) else {
                continue;
            };
            if unmatched.front().is_some_and(|front| std::ptr::eq(*front, row)) {
                unmatched.pop_front();
                self.push_copy(&mut table, row, RowOperation::Delete)?;
            }
        }

        debug!(table = table.name(), rows = table.len(), "diffed table");
        Ok((!table.is_empty()).then_some(table))
    }

    /// Builds the transform row for a matched pair; true if any field changed
    fn compare(&self, original: &Row, updated: &Row) -> Result<(Row, bool)> {
        let mut row = self.copy(updated, RowOperation::None)?;
        let mut modified = false;

        for (field, previous) in row.fields_mut().iter_mut().zip(original.fields()) {
            if field.data() == previous.data() {
                continue;
            }

            modified = true;
            field.set_modified(true);
            if !field.column().column_type().is_reference() {
                field.set_previous_data(previous.data().map(FieldValue::to_string));
            }
        }

        if modified {
            trace!(table = row.table_name(), key = %row.get_key(), "modified row");
            row.set_operation(RowOperation::Modify);
        }

        Ok((row, modified))
    }

    fn new_table(&self, like: &Table) -> Table {
        Table::with_allocator(like.definition().clone(), self.allocator.clone())
    }

    fn copy(&self, source: &Row, operation: RowOperation) -> Result<Row> {
        let mut row = Row::with_number(
            source.definition().clone(),
            source.source_line_numbers().cloned(),
            self.allocator.allocate(),
            false,
        );
        source.copy_to(&mut row)?;
        row.set_operation(operation);
        row.set_section_id(source.section_id().map(str::to_string));
        Ok(row)
    }

    fn push_copy(&self, table: &mut Table, source: &Row, operation: RowOperation) -> Result<()> {
        trace!(table = table.name(), key = %source.get_key(), %operation, "transform row");
        let row = self.copy(source, operation)?;
        table.push_row(row)
    }
}

fn match_key(row: &Row) -> String {
    match row.get_primary_key() {
        Some(key) => key,
        None => row
            .fields()
            .iter()
            .map(|field| field.data().map(FieldValue::to_string).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\u{0}"),
    }
}
