//! Table schemas: column descriptors, table definitions and the definition registry.
//!
//! This module holds the read-only metadata every other part of the crate works against.
//!
//! # Architecture
//!
//! ```text
//! TableDefinitionCollection ──1:*──> TableDefinition ──1:*──> ColumnDefinition
//!            (by name)                 (Arc, shared)            (Arc, shared)
//! ```
//!
//! - [`ColumnDefinition`] describes one column; built with [`ColumnBuilder`]
//! - [`TableDefinition`] orders the columns, primary-key columns first
//! - [`TableDefinitionCollection`] resolves table names while data is read
//!
//! All three persist themselves to the `tableDefinitions` XML form in the
//! [`crate::xml::TABLES_NAMESPACE`] namespace. The built-in definitions of the Windows
//! Installer tables live in [`crate::catalog`].

mod collection;
mod column;
mod columntype;
mod definition;

pub use collection::TableDefinitionCollection;
pub use column::{ColumnBuilder, ColumnDefinition, ColumnDefinitionRc, MAX_KEY_COLUMN};
pub use columntype::{ColumnCategory, ColumnFlags, ColumnModularizeType, ColumnType};
pub use definition::{StrongRowType, TableDefinition, TableDefinitionRc};
