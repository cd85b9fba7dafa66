//! Column definitions and their builder.
//!
//! A [`ColumnDefinition`] is an immutable descriptor of one column: storage type, width,
//! flags, validation category and constraints. Definitions are created through
//! [`ColumnBuilder`], which rejects inconsistent combinations at construction time, and are
//! shared between a table definition and every field created for it through
//! [`ColumnDefinitionRc`].
//!
//! # Examples
//!
//! ```rust
//! use msidata::schema::{ColumnBuilder, ColumnCategory, ColumnType};
//!
//! let column = ColumnBuilder::new("Attributes", ColumnType::Number)
//!     .length(2)
//!     .nullable()
//!     .range(0, 1)
//!     .category(ColumnCategory::Integer)
//!     .build()?;
//!
//! assert!(column.is_nullable());
//! assert_eq!(column.max_value(), Some(1));
//! # Ok::<(), msidata::Error>(())
//! ```

use std::{io::Write, str::FromStr, sync::Arc};

use crate::{
    schema::{ColumnCategory, ColumnFlags, ColumnModularizeType, ColumnType},
    xml::{parse_number, parse_yes_no, AttributeSetter, XmlElement, XmlReader, XmlWriter, YES},
    Error, Result,
};

/// A reference to a `ColumnDefinition`
pub type ColumnDefinitionRc = Arc<ColumnDefinition>;

/// Largest 1-based column index a foreign key may reference
pub const MAX_KEY_COLUMN: u32 = 32;

/// Describes one column of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDefinition {
    name: String,
    column_type: ColumnType,
    length: u32,
    flags: ColumnFlags,
    category: ColumnCategory,
    key_table: Option<String>,
    key_column: Option<u32>,
    min_value: Option<i64>,
    max_value: Option<i64>,
    possibilities: Option<String>,
    description: Option<String>,
    modularize: ColumnModularizeType,
}

impl ColumnDefinition {
    /// Name of the column
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage type of the column
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Width in bytes for numbers, in characters for strings; `0` means unbounded
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// All boolean attributes
    #[must_use]
    pub fn flags(&self) -> ColumnFlags {
        self.flags
    }

    /// True if the column is part of the primary key
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.flags.contains(ColumnFlags::PRIMARY_KEY)
    }

    /// True if the column accepts null
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.flags.contains(ColumnFlags::NULLABLE)
    }

    /// True if localizability was forced on a non-`Localized` column
    #[must_use]
    pub fn force_localizable(&self) -> bool {
        self.flags.contains(ColumnFlags::LOCALIZABLE)
    }

    /// True if values of this column may be translated
    #[must_use]
    pub fn is_localizable(&self) -> bool {
        self.force_localizable() || self.column_type == ColumnType::Localized
    }

    /// True if the column does not exist in the physical table
    #[must_use]
    pub fn is_unreal(&self) -> bool {
        self.flags.contains(ColumnFlags::UNREAL)
    }

    /// True if values are written as CDATA sections
    #[must_use]
    pub fn use_cdata(&self) -> bool {
        self.flags.contains(ColumnFlags::USE_CDATA)
    }

    /// True if the column was added by a transform
    #[must_use]
    pub fn is_added(&self) -> bool {
        self.flags.contains(ColumnFlags::ADDED)
    }

    /// True if IDT exports escape control characters in this column
    #[must_use]
    pub fn escape_idt_characters(&self) -> bool {
        self.flags.contains(ColumnFlags::ESCAPE_IDT_CHARACTERS)
    }

    /// Validation category
    #[must_use]
    pub fn category(&self) -> ColumnCategory {
        self.category
    }

    /// Referenced table names, semicolon-delimited as stored
    #[must_use]
    pub fn key_table(&self) -> Option<&str> {
        self.key_table.as_deref()
    }

    /// Iterates over the alternative referenced tables
    pub fn key_tables(&self) -> impl Iterator<Item = &str> {
        self.key_table
            .as_deref()
            .into_iter()
            .flat_map(|tables| tables.split(';'))
            .filter(|table| !table.is_empty())
    }

    /// 1-based index of the referenced column
    #[must_use]
    pub fn key_column(&self) -> Option<u32> {
        self.key_column
    }

    /// Inclusive lower bound of numeric values
    #[must_use]
    pub fn min_value(&self) -> Option<i64> {
        self.min_value
    }

    /// Inclusive upper bound of numeric values
    #[must_use]
    pub fn max_value(&self) -> Option<i64> {
        self.max_value
    }

    /// Allowed literal values, semicolon-delimited as stored
    #[must_use]
    pub fn possibilities(&self) -> Option<&str> {
        self.possibilities.as_deref()
    }

    /// Returns true if `value` is one of the allowed literals, or if there is no restriction
    #[must_use]
    pub fn is_possible(&self, value: &str) -> bool {
        match &self.possibilities {
            Some(set) => set.split(';').any(|candidate| candidate == value),
            None => true,
        }
    }

    /// Human readable description
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Modularization behavior
    #[must_use]
    pub fn modularize(&self) -> ColumnModularizeType {
        self.modularize
    }

    /// Checks the internal consistency of the definition.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] for an empty name, a key column without a key
    /// table, a key column outside of `1..=32` or a minimum above the maximum.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidArgument(
                "column name must not be empty".to_string(),
            ));
        }

        if let Some(key_column) = self.key_column {
            if self.key_table.is_none() {
                return Err(Error::InvalidArgument(format!(
                    "column '{}' has a keyColumn but no keyTable",
                    self.name
                )));
            }

            if !(1..=MAX_KEY_COLUMN).contains(&key_column) {
                return Err(Error::InvalidArgument(format!(
                    "keyColumn {} of column '{}' is outside of 1..={}",
                    key_column, self.name, MAX_KEY_COLUMN
                )));
            }
        }

        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(Error::InvalidArgument(format!(
                    "minValue {} of column '{}' is greater than maxValue {}",
                    min, self.name, max
                )));
            }
        }

        Ok(())
    }

    /// Reads a `column` element whose start tag was already consumed.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for unknown attributes, missing `name`/`type`, invalid
    /// values or child content, and [`Error::InvalidArgument`] if the definition is
    /// inconsistent.
    pub fn read<R: std::io::BufRead>(
        reader: &mut XmlReader<R>,
        element: &XmlElement,
    ) -> Result<Self> {
        element.expect_name("column")?;
        element.required_attribute("name")?;
        element.required_attribute("type")?;

        let mut builder = ColumnBuilder::new("", ColumnType::Unknown);
        element.apply_attributes(&mut builder, COLUMN_ATTRIBUTES)?;

        if !element.is_empty() {
            if let Some(child) = reader.next_child()? {
                return Err(malformed_error!(
                    "Unexpected element '{}' in column '{}'",
                    child.name(),
                    builder.definition.name
                ));
            }
        }

        builder.build()
    }

    /// Writes this definition as a `column` element.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        let length = (self.length > 0).then(|| self.length.to_string());
        let min_value = self.min_value.map(|value| value.to_string());
        let max_value = self.max_value.map(|value| value.to_string());
        let key_column = self.key_column.map(|value| value.to_string());
        let category = (self.category != ColumnCategory::Unknown)
            .then(|| <&'static str>::from(self.category));
        let modularize = (self.modularize != ColumnModularizeType::None)
            .then(|| <&'static str>::from(self.modularize));
        let yes = |flag: ColumnFlags| self.flags.contains(flag).then_some(YES);

        writer.empty(
            "column",
            &[
                ("name", Some(self.name.as_str())),
                ("type", Some(<&'static str>::from(self.column_type))),
                ("length", length.as_deref()),
                ("primaryKey", yes(ColumnFlags::PRIMARY_KEY)),
                ("nullable", yes(ColumnFlags::NULLABLE)),
                ("localizable", yes(ColumnFlags::LOCALIZABLE)),
                ("added", yes(ColumnFlags::ADDED)),
                ("minValue", min_value.as_deref()),
                ("maxValue", max_value.as_deref()),
                ("keyTable", self.key_table.as_deref()),
                ("keyColumn", key_column.as_deref()),
                ("category", category),
                ("set", self.possibilities.as_deref()),
                ("description", self.description.as_deref()),
                ("escapeIdtCharacters", yes(ColumnFlags::ESCAPE_IDT_CHARACTERS)),
                ("modularize", modularize),
                ("unreal", yes(ColumnFlags::UNREAL)),
                ("useCData", yes(ColumnFlags::USE_CDATA)),
            ],
        )
    }
}

fn set_flag(builder: &mut ColumnBuilder, flag: ColumnFlags, name: &str, value: &str) -> Result<()> {
    builder
        .definition
        .flags
        .set(flag, parse_yes_no(name, value)?);
    Ok(())
}

fn parse_enum<T: FromStr>(attribute: &str, value: &str) -> Result<T> {
    T::from_str(value)
        .map_err(|_| malformed_error!("Invalid value '{}' of attribute '{}'", value, attribute))
}

const COLUMN_ATTRIBUTES: &[(&str, AttributeSetter<ColumnBuilder>)] = &[
    ("name", |builder, value| {
        builder.definition.name = value.to_string();
        Ok(())
    }),
    ("type", |builder, value| {
        builder.definition.column_type = parse_enum("type", value)?;
        Ok(())
    }),
    ("length", |builder, value| {
        builder.definition.length = parse_number("length", value)?;
        Ok(())
    }),
    ("primaryKey", |builder, value| {
        set_flag(builder, ColumnFlags::PRIMARY_KEY, "primaryKey", value)
    }),
    ("nullable", |builder, value| {
        set_flag(builder, ColumnFlags::NULLABLE, "nullable", value)
    }),
    ("localizable", |builder, value| {
        set_flag(builder, ColumnFlags::LOCALIZABLE, "localizable", value)
    }),
    ("added", |builder, value| {
        set_flag(builder, ColumnFlags::ADDED, "added", value)
    }),
    ("minValue", |builder, value| {
        builder.definition.min_value = Some(parse_number("minValue", value)?);
        Ok(())
    }),
    ("maxValue", |builder, value| {
        builder.definition.max_value = Some(parse_number("maxValue", value)?);
        Ok(())
    }),
    ("keyTable", |builder, value| {
        builder.definition.key_table = Some(value.to_string());
        Ok(())
    }),
    ("keyColumn", |builder, value| {
        builder.definition.key_column = Some(parse_number("keyColumn", value)?);
        Ok(())
    }),
    ("category", |builder, value| {
        builder.definition.category = parse_enum("category", value)?;
        Ok(())
    }),
    ("set", |builder, value| {
        builder.definition.possibilities = Some(value.to_string());
        Ok(())
    }),
    ("description", |builder, value| {
        builder.definition.description = Some(value.to_string());
        Ok(())
    }),
    ("escapeIdtCharacters", |builder, value| {
        set_flag(
            builder,
            ColumnFlags::ESCAPE_IDT_CHARACTERS,
            "escapeIdtCharacters",
            value,
        )
    }),
    ("modularize", |builder, value| {
        builder.definition.modularize = parse_enum("modularize", value)?;
        Ok(())
    }),
    ("unreal", |builder, value| {
        set_flag(builder, ColumnFlags::UNREAL, "unreal", value)
    }),
    ("useCData", |builder, value| {
        set_flag(builder, ColumnFlags::USE_CDATA, "useCData", value)
    }),
];

/// Builder for [`ColumnDefinition`].
///
/// Every setter consumes and returns the builder; [`ColumnBuilder::build`] validates the
/// result.
#[derive(Clone, Debug)]
pub struct ColumnBuilder {
    definition: ColumnDefinition,
}

impl ColumnBuilder {
    /// Starts a column with the given name and type and no other attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        ColumnBuilder {
            definition: ColumnDefinition {
                name: name.into(),
                column_type,
                length: 0,
                flags: ColumnFlags::empty(),
                category: ColumnCategory::Unknown,
                key_table: None,
                key_column: None,
                min_value: None,
                max_value: None,
                possibilities: None,
                description: None,
                modularize: ColumnModularizeType::None,
            },
        }
    }

    /// Sets the width
    #[must_use]
    pub fn length(mut self, length: u32) -> Self {
        self.definition.length = length;
        self
    }

    /// Adds the given flags
    #[must_use]
    pub fn flags(mut self, flags: ColumnFlags) -> Self {
        self.definition.flags |= flags;
        self
    }

    /// Marks the column as part of the primary key
    #[must_use]
    pub fn primary_key(self) -> Self {
        self.flags(ColumnFlags::PRIMARY_KEY)
    }

    /// Allows null values
    #[must_use]
    pub fn nullable(self) -> Self {
        self.flags(ColumnFlags::NULLABLE)
    }

    /// Forces the column to be localizable
    #[must_use]
    pub fn localizable(self) -> Self {
        self.flags(ColumnFlags::LOCALIZABLE)
    }

    /// Marks the column as virtual
    #[must_use]
    pub fn unreal(self) -> Self {
        self.flags(ColumnFlags::UNREAL)
    }

    /// Writes values as CDATA
    #[must_use]
    pub fn use_cdata(self) -> Self {
        self.flags(ColumnFlags::USE_CDATA)
    }

    /// Sets the validation category
    #[must_use]
    pub fn category(mut self, category: ColumnCategory) -> Self {
        self.definition.category = category;
        self
    }

    /// Sets a foreign key to column `column` (1-based) of `table`
    #[must_use]
    pub fn key(mut self, table: impl Into<String>, column: u32) -> Self {
        self.definition.key_table = Some(table.into());
        self.definition.key_column = Some(column);
        self
    }

    /// Sets the referenced tables without a column
    #[must_use]
    pub fn key_table(mut self, table: impl Into<String>) -> Self {
        self.definition.key_table = Some(table.into());
        self
    }

    /// Sets the inclusive numeric range
    #[must_use]
    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.definition.min_value = Some(min);
        self.definition.max_value = Some(max);
        self
    }

    /// Sets the inclusive lower bound
    #[must_use]
    pub fn min_value(mut self, min: i64) -> Self {
        self.definition.min_value = Some(min);
        self
    }

    /// Sets the inclusive upper bound
    #[must_use]
    pub fn max_value(mut self, max: i64) -> Self {
        self.definition.max_value = Some(max);
        self
    }

    /// Restricts the values to a semicolon-delimited set
    #[must_use]
    pub fn possibilities(mut self, possibilities: impl Into<String>) -> Self {
        self.definition.possibilities = Some(possibilities.into());
        self
    }

    /// Sets the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.definition.description = Some(description.into());
        self
    }

    /// Sets the modularization behavior
    #[must_use]
    pub fn modularize(mut self, modularize: ColumnModularizeType) -> Self {
        self.definition.modularize = modularize;
        self
    }

    /// Validates and returns the definition.
    ///
    /// # Errors
    /// See [`ColumnDefinition::validate`].
    pub fn build(self) -> Result<ColumnDefinition> {
        self.definition.validate()?;
        Ok(self.definition)
    }

    /// Returns the definition without validation, for the built-in catalog whose
    /// definitions are covered by tests. Debug builds still assert validity.
    pub(crate) fn finish(self) -> ColumnDefinition {
        debug_assert!(
            self.definition.validate().is_ok(),
            "invalid column definition '{}'",
            self.definition.name
        );
        self.definition
    }
}
