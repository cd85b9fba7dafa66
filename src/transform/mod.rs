//! Transform generation.
//!
//! A transform is a table set whose tables and rows carry operations: a
//! [`crate::tables::TableOperation`] per table and a [`crate::tables::RowOperation`] per row,
//! with modified fields flagged and their previous values recorded. Applying it to the
//! target database yields the updated database. [`Differ`] computes it by comparing the two
//! table sets.

mod differ;

pub use differ::Differ;
