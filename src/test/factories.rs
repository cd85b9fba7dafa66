//! Small table definitions used across the unit tests.

use std::sync::Arc;

use crate::schema::{ColumnBuilder, ColumnCategory, ColumnType, TableDefinition, TableDefinitionRc};

/// A `Control`-like table keyed by `Dialog_` and `Control`, with a nullable `Attributes`
/// number. Carries no strong row type.
pub(crate) fn two_key_definition() -> TableDefinitionRc {
    Arc::new(TableDefinition::from_parts(
        "Control",
        Some("Control".to_string()),
        vec![
            ColumnBuilder::new("Dialog_", ColumnType::String)
                .length(72)
                .primary_key()
                .category(ColumnCategory::Identifier)
                .finish(),
            ColumnBuilder::new("Control", ColumnType::String)
                .length(50)
                .primary_key()
                .category(ColumnCategory::Identifier)
                .finish(),
            ColumnBuilder::new("Attributes", ColumnType::Number)
                .length(4)
                .nullable()
                .finish(),
        ],
        None,
        false,
        false,
    ))
}

/// A two-column table without primary-key columns.
pub(crate) fn keyless_definition() -> TableDefinitionRc {
    Arc::new(TableDefinition::from_parts(
        "Values",
        None,
        vec![
            ColumnBuilder::new("Value", ColumnType::String)
                .length(255)
                .nullable()
                .finish(),
            ColumnBuilder::new("Comment", ColumnType::String)
                .length(255)
                .nullable()
                .finish(),
        ],
        None,
        false,
        false,
    ))
}
