// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # msidata
//!
//! A typed, in-memory model of Windows Installer database tables, together with the strict
//! XML intermediate form used to persist table schemas and table data between the stages of
//! an installer build.
//!
//! ## Features
//!
//! - **📐 Typed schemas** - Column and table definitions with types, widths, ranges,
//!   possibility sets, categories and foreign-key metadata
//! - **🧾 Typed data** - Fields coerce values to their column type, rows derive primary keys,
//!   tables detect duplicate keys
//! - **📚 Built-in catalog** - The standard Windows Installer tables, standard actions,
//!   directories and properties
//! - **🔁 Strict round-trip** - Reading what was written yields identical definitions and
//!   data; anything unexpected in the input is an error
//! - **🩺 Validation** - Column rules and foreign keys checked over whole table sets
//! - **🧮 Transforms** - Row and table diffs between two table sets
//!
//! ## Quick Start
//!
//! ```rust
//! use msidata::prelude::*;
//!
//! let mut data = WindowsInstallerData::new(OutputType::Product);
//! let row = data.ensure_table("Property")?.create_row(None);
//! row.set(0, "ProductName")?;
//! row.set(1, "Example")?;
//!
//! let xml = data.to_xml()?;
//! let loaded = WindowsInstallerData::from_xml(&xml)?;
//! assert_eq!(loaded.tables().get("Property").map(Table::len), Some(1));
//! # Ok::<(), msidata::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`schema`] - Column and table definitions and the definition registry
//! - [`tables`] - Fields, rows, tables and table sets
//! - [`catalog`] - Built-in definitions and well-known names
//! - [`output`] - The `windowsInstallerData` document
//! - [`validation`] - Column-rule and foreign-key checks
//! - [`transform`] - Diffs between table sets
//! - [`xml`] - The strict reader and writer every persistent type goes through
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` per document and table, `trace` per row, `warn`
//! for validation findings) and never installs a subscriber.

#[macro_use]
pub(crate) mod error;
mod sourceline;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use msidata::prelude::*;
///
/// let definition = catalog::table_definition("Property").unwrap();
/// let table = Table::new(definition.clone());
/// assert!(table.is_empty());
/// ```
pub mod prelude;

/// Strict XML reader and writer of the intermediate form
pub mod xml;

/// Column and table schemas.
///
/// # Key Types
///
/// - [`schema::ColumnDefinition`] - One column, built with [`schema::ColumnBuilder`]
/// - [`schema::TableDefinition`] - Ordered columns of one table
/// - [`schema::TableDefinitionCollection`] - Definitions by table name
pub mod schema;

/// Table data.
///
/// # Key Types
///
/// - [`tables::Field`] - One value checked against its column
/// - [`tables::Row`] - One field per column, primary keys and transform state
/// - [`tables::Table`] - Rows in insertion order
/// - [`tables::TableIndexedCollection`] - Tables of one output by name
pub mod tables;

/// Built-in Windows Installer schema catalog
pub mod catalog;

/// The `windowsInstallerData` output document
pub mod output;

/// Validation of table data against column rules
pub mod validation;

/// Transform computation between two table sets
pub mod transform;

/// `msidata` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `msidata` Error type
///
/// Every fallible operation reports one of its variants; see the variant docs for the
/// error families.
pub use error::Error;

/// Location in a source file, with optional parent chain
pub use sourceline::SourceLineNumber;

pub use output::{OutputType, WindowsInstallerData};
pub use schema::{
    ColumnBuilder, ColumnCategory, ColumnDefinition, ColumnType, TableDefinition,
    TableDefinitionCollection,
};
pub use tables::{Field, FieldValue, Row, RowOperation, Table, TableIndexedCollection, TableOperation};
pub use validation::{ValidationConfig, Validator};
