//! The built-in Windows Installer catalog.
//!
//! Everything in this module is fixed at build time and constructed once on first use:
//!
//! - [`table_definitions`] - the standard table schemas, including the merge module, patch
//!   creation and system tables
//! - [`standard_action`] / [`standard_action_in`] - the standard actions of the five
//!   sequence tables with their default sequence numbers and conditions
//! - [`platform_specific_directory_id`] / [`is_standard_directory`] - standard directories
//! - [`is_standard_property`] - well-known property names
//!
//! All returned data is immutable and shared, so concurrent readers need no coordination.
//!
//! # Examples
//!
//! ```rust
//! use msidata::catalog::{self, Platform};
//!
//! let file = catalog::table_definitions().get("File")?;
//! assert_eq!(file.primary_key_count(), 1);
//!
//! assert_eq!(
//!     catalog::platform_specific_directory_id("ProgramFiles6432Folder", Platform::X86),
//!     "ProgramFilesFolder"
//! );
//! assert!(catalog::is_standard_property("ProductCode"));
//! # Ok::<(), msidata::Error>(())
//! ```

mod actions;
mod directories;
mod properties;
mod tables;

use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::schema::{TableDefinitionCollection, TableDefinitionRc};

pub use actions::{
    is_standard_action, standard_action, standard_action_in, standard_actions, SequenceTable,
    StandardAction,
};
pub use directories::{
    is_standard_directory, platform_specific_directory_id, standard_directories, Platform,
};
pub use properties::{is_standard_property, standard_properties};

/// The standard table definitions, indexed by name
pub fn table_definitions() -> &'static TableDefinitionCollection {
    static DEFINITIONS: OnceLock<TableDefinitionCollection> = OnceLock::new();

    DEFINITIONS.get_or_init(|| {
        let mut collection = TableDefinitionCollection::new();
        for definition in tables::standard_tables() {
            collection.insert_builtin(Arc::new(definition));
        }

        debug!(count = collection.len(), "built standard table definitions");
        collection
    })
}

/// The standard definition of the table named `name`, or `None`
#[must_use]
pub fn table_definition(name: &str) -> Option<&'static TableDefinitionRc> {
    table_definitions().try_get(name)
}
