//! Column-rule validation of table data
//!
//! [`Validator`] walks tables and checks every field against the rules of its column:
//! nullability, value kind, width, numeric range, possibility set, category and foreign
//! keys, plus primary-key uniqueness per table. Unlike the strict accessors of
//! [`crate::tables::Field`], validation never fails; it collects [`ValidationIssue`]s into a
//! [`ValidationReport`] so callers can present every problem at once.
//!
//! Which rules run is controlled by [`ValidationConfig`].
//!
//! # Examples
//!
//! ```rust
//! use msidata::{catalog, Table};
//! use msidata::validation::{IssueKind, ValidationConfig, Validator};
//!
//! let mut table = Table::new(catalog::table_definitions().get("Property")?.clone());
//! table.create_row(None)[0] = Some("1 invalid".into());
//!
//! let report = Validator::new(ValidationConfig::default()).validate_table(&table);
//! assert!(report.issues().iter().any(|issue| issue.kind() == IssueKind::Category));
//! assert!(report.issues().iter().any(|issue| issue.kind() == IssueKind::Null));
//! # Ok::<(), msidata::Error>(())
//! ```

mod category;
mod config;

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};
use tracing::{debug, warn};

use crate::{
    schema::{ColumnCategory, ColumnDefinition, ColumnType},
    tables::{Field, FieldValue, Row, Table, TableIndexedCollection},
    SourceLineNumber,
};

pub use config::ValidationConfig;

/// The rule a [`ValidationIssue`] violates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum IssueKind {
    /// Null in a non-nullable column
    Null,
    /// Value kind does not match the column type
    Type,
    /// String longer than the column width
    Length,
    /// Number outside of the column range
    Range,
    /// Value outside of the possibility set
    Set,
    /// String violates the column category
    Category,
    /// Foreign key does not resolve
    ForeignKey,
    /// Primary key shared with an earlier row
    DuplicateKey,
}

/// One rule violation, located by table, row key and column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    kind: IssueKind,
    table: String,
    column: Option<String>,
    row_key: String,
    source_line_numbers: Option<SourceLineNumber>,
    message: String,
}

impl ValidationIssue {
    fn new(row: &Row, column: Option<&ColumnDefinition>, kind: IssueKind, message: String) -> Self {
        ValidationIssue {
            kind,
            table: row.table_name().to_string(),
            column: column.map(|column| column.name().to_string()),
            row_key: row.get_key(),
            source_line_numbers: row.source_line_numbers().cloned(),
            message,
        }
    }

    /// Violated rule
    #[must_use]
    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    /// Table of the offending row
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Offending column, `None` for row-level issues
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Key of the offending row
    #[must_use]
    pub fn row_key(&self) -> &str {
        &self.row_key
    }

    /// Source of the offending row
    #[must_use]
    pub fn source_line_numbers(&self) -> Option<&SourceLineNumber> {
        self.source_line_numbers.as_ref()
    }

    /// Description of the violation
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source_line_numbers {
            write!(f, "{source}: ")?;
        }
        write!(f, "{}", self.table)?;
        if let Some(column) = &self.column {
            write!(f, ".{column}")?;
        }
        write!(f, " [{}]: {}", self.row_key, self.message)
    }
}

/// Issues collected by one validation run.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
    truncated: bool,
}

impl ValidationReport {
    /// True if no issue was found
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Collected issues, in table and row order
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// True if collection stopped at [`ValidationConfig::max_issues`]
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Issues of the given kind
    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }
}

/// Values of one key column, by key table name and 0-based column index.
type KeyIndex<'a> = HashMap<(&'a str, usize), HashSet<String>>;

/// Checks table data against the rules of its columns.
#[derive(Clone, Copy, Debug, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Creates a validator with the given rule selection
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Validator { config }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates every table of `tables`. Foreign keys are resolved against the same set.
    #[must_use]
    pub fn validate(&self, tables: &TableIndexedCollection) -> ValidationReport {
        let mut report = ValidationReport::default();
        if !self.config.is_enabled() {
            return report;
        }

        let index = if self.config.enable_foreign_key_validation {
            Some(build_key_index(tables))
        } else {
            None
        };

        for table in tables {
            if !self.check_table(table, index.as_ref(), &mut report) {
                break;
            }
        }

        finish(&report);
        report
    }

    /// Validates a single table. Foreign keys are not checked, since the referenced tables
    /// are unknown.
    #[must_use]
    pub fn validate_table(&self, table: &Table) -> ValidationReport {
        let mut report = ValidationReport::default();
        if self.config.is_enabled() {
            self.check_table(table, None, &mut report);
        }

        finish(&report);
        report
    }

    /// Validates a single row without foreign-key or uniqueness checks
    #[must_use]
    pub fn validate_row(&self, row: &Row) -> ValidationReport {
        let mut report = ValidationReport::default();
        if self.config.is_enabled() {
            self.check_row(row, None, &mut report);
        }
        report
    }

    /// Returns false once the issue limit is reached
    fn check_table(
        &self,
        table: &Table,
        index: Option<&KeyIndex<'_>>,
        report: &mut ValidationReport,
    ) -> bool {
        debug!(table = table.name(), rows = table.len(), "validating table");

        let mut seen: HashSet<String> = HashSet::new();
        for row in table {
            if !self.check_row(row, index, report) {
                return false;
            }

            if self.config.enable_primary_key_validation {
                if let Some(key) = row.get_primary_key() {
                    if !seen.insert(key.clone()) {
                        let message = format!("primary key '{key}' is not unique");
                        let issue = ValidationIssue::new(row, None, IssueKind::DuplicateKey, message);
                        if !self.push(report, issue) {
                            return false;
                        }
                    }
                }
            }
        }

        true
    }

    fn check_row(
        &self,
        row: &Row,
        index: Option<&KeyIndex<'_>>,
        report: &mut ValidationReport,
    ) -> bool {
        for field in row.fields() {
            let column: &ColumnDefinition = field.column();
            for (kind, message) in self.check_field(field) {
                if !self.push(report, ValidationIssue::new(row, Some(column), kind, message)) {
                    return false;
                }
            }

            if let (Some(index), Some(value)) = (index, field.data()) {
                if let Some(message) = check_foreign_key(column, value, index) {
                    let issue = ValidationIssue::new(row, Some(column), IssueKind::ForeignKey, message);
                    if !self.push(report, issue) {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn check_field(&self, field: &Field) -> Vec<(IssueKind, String)> {
        let column = field.column();
        let mut issues = Vec::new();

        let Some(value) = field.data() else {
            if self.config.enable_nullability_validation && !column.is_nullable() {
                issues.push((IssueKind::Null, "null value in a non-nullable column".to_string()));
            }
            return issues;
        };

        if self.config.enable_type_validation {
            if let Some(message) = check_type(column, value) {
                issues.push((IssueKind::Type, message));
                return issues;
            }
        }

        match value {
            FieldValue::Integer(number) => {
                let number = i64::from(*number);
                if self.config.enable_range_validation && !in_range(column, number) {
                    issues.push((IssueKind::Range, format!("value {number} is out of range")));
                }
            }
            FieldValue::String(text) => {
                let width = column.length() as usize;
                if self.config.enable_length_validation
                    && width > 0
                    && column.column_type().is_textual()
                    && text.chars().count() > width
                {
                    issues.push((
                        IssueKind::Length,
                        format!("value of {} characters exceeds width {width}", text.chars().count()),
                    ));
                }

                if self.config.enable_category_validation && column.column_type().is_textual() {
                    if let Some(reason) = category::check(column.category(), text) {
                        issues.push((IssueKind::Category, format!("'{text}' is {reason}")));
                    }
                }
            }
            FieldValue::Object(_) => {}
        }

        if self.config.enable_set_validation && !column.is_possible(&value.to_string()) {
            issues.push((IssueKind::Set, format!("'{value}' is not one of the allowed values")));
        }

        issues
    }

    fn push(&self, report: &mut ValidationReport, issue: ValidationIssue) -> bool {
        if report.issues.len() >= self.config.max_issues {
            report.truncated = true;
            return false;
        }

        report.issues.push(issue);
        true
    }
}

fn finish(report: &ValidationReport) {
    if !report.is_valid() {
        warn!(
            issues = report.issues.len(),
            truncated = report.truncated,
            "validation found issues"
        );
    }
}

fn check_type(column: &ColumnDefinition, value: &FieldValue) -> Option<String> {
    let valid = match (column.column_type(), value) {
        (ColumnType::Unknown, _) => true,
        (ColumnType::Number, FieldValue::Integer(_)) => true,
        (ColumnType::Number, FieldValue::String(text)) => {
            column.is_localizable() || text.parse::<i32>().is_ok()
        }
        (ColumnType::Object, FieldValue::Object(_) | FieldValue::String(_)) => true,
        (
            ColumnType::String | ColumnType::Localized | ColumnType::Preserved,
            FieldValue::String(_),
        ) => true,
        _ => false,
    };

    (!valid).then(|| {
        format!(
            "{} value in a {} column",
            value.kind(),
            <&'static str>::from(column.column_type())
        )
    })
}

fn in_range(column: &ColumnDefinition, value: i64) -> bool {
    column.min_value().map_or(true, |min| value >= min)
        && column.max_value().map_or(true, |max| value <= max)
}

fn build_key_index(tables: &TableIndexedCollection) -> KeyIndex<'_> {
    let mut index = KeyIndex::new();

    for table in tables {
        for row in table {
            for (position, field) in row.fields().iter().enumerate() {
                if let Some(value) = field.data() {
                    index
                        .entry((table.name(), position))
                        .or_default()
                        .insert(value.to_string());
                }
            }
        }
    }

    index
}

fn check_foreign_key(
    column: &ColumnDefinition,
    value: &FieldValue,
    index: &KeyIndex<'_>,
) -> Option<String> {
    let key_column = column.key_column()? as usize;
    if column.key_table().is_none() || key_column == 0 {
        return None;
    }

    let value = value.to_string();
    // version columns hold either a companion file key or a version
    if column.category() == ColumnCategory::Version
        && category::check(ColumnCategory::Version, &value).is_none()
    {
        return None;
    }

    let resolved = column.key_tables().any(|table| {
        index
            .get(&(table, key_column - 1))
            .is_some_and(|values| values.contains(&value))
    });

    (!resolved).then(|| {
        format!(
            "'{value}' does not match column {key_column} of {}",
            column.key_table().unwrap_or_default()
        )
    })
}
