//! Table data: fields, rows, tables and table sets.
//!
//! # Architecture
//!
//! ```text
//! TableIndexedCollection ──1:*──> Table ──1:*──> Row ──1:*──> Field
//!                                   │             │             │
//!                                   └─────────────┴─────────────┴──> schema (Arc)
//! ```
//!
//! - [`Field`] holds one value and applies the column's coercion rules
//! - [`Row`] holds one field per column, derives keys and carries transform state
//! - [`Table`] owns rows in insertion order and checks primary-key uniqueness on demand
//! - [`TableIndexedCollection`] holds the tables of one output by name
//! - [`StrongRow`] gives typed access to rows of tagged tables
//! - [`RowNumberAllocator`] numbers rows
//!
//! Tables, rows and fields persist themselves as the `table`/`row`/`field` elements of the
//! data document, see [`crate::output::WindowsInstallerData`].

mod field;
mod indexed;
mod row;
mod rownumber;
mod strong;
mod table;

pub use field::{Field, FieldValue, ObjectReference};
pub use indexed::TableIndexedCollection;
pub use row::{Row, RowOperation};
pub use rownumber::RowNumberAllocator;
pub use strong::{
    ComponentRow, ControlRow, FileRow, MediaRow, PropertyRow, StrongRow, UpgradeRow,
};
pub use table::{Table, TableOperation};
