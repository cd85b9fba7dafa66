//! # msidata Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the msidata
//! library. Import this module to get quick access to the essential types for reading,
//! building and writing installer table data.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all msidata operations
pub use crate::Error;

/// The result type used throughout msidata
pub use crate::Result;

/// Source locations attached to rows
pub use crate::SourceLineNumber;

// ================================================================================================
// Schema
// ================================================================================================

/// Column descriptors and their building blocks
pub use crate::schema::{
    ColumnBuilder, ColumnCategory, ColumnDefinition, ColumnDefinitionRc, ColumnFlags,
    ColumnModularizeType, ColumnType,
};

/// Table descriptors and the definition registry
pub use crate::schema::{
    StrongRowType, TableDefinition, TableDefinitionCollection, TableDefinitionRc,
};

// ================================================================================================
// Table Data
// ================================================================================================

/// Fields, rows and tables
pub use crate::tables::{
    Field, FieldValue, ObjectReference, Row, RowNumberAllocator, RowOperation, Table,
    TableIndexedCollection, TableOperation,
};

/// Typed row views
pub use crate::tables::StrongRow;

/// The output document
pub use crate::output::{OutputType, WindowsInstallerData};

// ================================================================================================
// Catalog, Validation and Transforms
// ================================================================================================

/// The built-in catalog
pub use crate::catalog;

/// Validation of table data
pub use crate::validation::{
    IssueKind, ValidationConfig, ValidationIssue, ValidationReport, Validator,
};

/// Transform computation
pub use crate::transform::Differ;

// ================================================================================================
// XML
// ================================================================================================

/// Reader and writer of the intermediate form
pub use crate::xml::{XmlReader, XmlWriter};
