//! Typed views over rows of frequently used tables.
//!
//! A [`TableDefinition`](crate::schema::TableDefinition) may carry a
//! [`StrongRowType`] tag; [`StrongRow::from_row`] maps the tag to the matching view. Views
//! borrow the row and address its fields by the fixed column positions of the standard
//! table layouts, so they are only meaningful for rows of the built-in definitions (or
//! definitions with the same leading columns).
//!
//! ```rust
//! use msidata::{catalog, tables::StrongRow, Row};
//!
//! let mut row = Row::new(catalog::table_definitions().get("Component")?.clone(), None);
//! row.set(0, "MainComponent")?;
//! row.set(2, "INSTALLFOLDER")?;
//! row.set(3, 256)?;
//!
//! match row.strong() {
//!     Some(StrongRow::Component(component)) => {
//!         assert_eq!(component.component(), Some("MainComponent"));
//!         assert!(component.is_64bit()?);
//!     }
//!     _ => unreachable!(),
//! }
//! # Ok::<(), msidata::Error>(())
//! ```

use crate::{
    schema::StrongRowType,
    tables::{FieldValue, Row},
    Result,
};

/// A row viewed through the type its table definition names.
#[derive(Clone, Copy, Debug)]
pub enum StrongRow<'a> {
    /// Row of the `Component` table
    Component(ComponentRow<'a>),
    /// Row of the `File` table
    File(FileRow<'a>),
    /// Row of the `Media` table
    Media(MediaRow<'a>),
    /// Row of the `Property` table
    Property(PropertyRow<'a>),
    /// Row of the `Upgrade` table
    Upgrade(UpgradeRow<'a>),
    /// Row of the `Control` table
    Control(ControlRow<'a>),
}

impl<'a> StrongRow<'a> {
    /// Returns the view selected by the row's definition, if any
    #[must_use]
    pub fn from_row(row: &'a Row) -> Option<Self> {
        let view = match row.definition().strong_row_type()? {
            StrongRowType::Component => StrongRow::Component(ComponentRow { row }),
            StrongRowType::File => StrongRow::File(FileRow { row }),
            StrongRowType::Media => StrongRow::Media(MediaRow { row }),
            StrongRowType::Property => StrongRow::Property(PropertyRow { row }),
            StrongRowType::Upgrade => StrongRow::Upgrade(UpgradeRow { row }),
            StrongRowType::Control => StrongRow::Control(ControlRow { row }),
        };
        Some(view)
    }

    /// The underlying row
    #[must_use]
    pub fn row(&self) -> &'a Row {
        match self {
            StrongRow::Component(view) => view.row,
            StrongRow::File(view) => view.row,
            StrongRow::Media(view) => view.row,
            StrongRow::Property(view) => view.row,
            StrongRow::Upgrade(view) => view.row,
            StrongRow::Control(view) => view.row,
        }
    }
}

fn text(row: &Row, index: usize) -> Option<&str> {
    match row.field(index)?.data()? {
        FieldValue::String(text) => Some(text),
        FieldValue::Object(reference) => Some(reference.path()),
        FieldValue::Integer(_) => None,
    }
}

fn has_bits(row: &Row, index: usize, bits: i32) -> Result<bool> {
    Ok((row.field_as_nullable_integer(index)?.unwrap_or(0) & bits) == bits)
}

/// `Component` table: Component, ComponentId, Directory_, Attributes, Condition, KeyPath
#[derive(Clone, Copy, Debug)]
pub struct ComponentRow<'a> {
    row: &'a Row,
}

impl<'a> ComponentRow<'a> {
    /// Component attribute: runs from source
    pub const SOURCE_ONLY: i32 = 0x0001;
    /// Component attribute: key path is a registry value
    pub const REGISTRY_KEY_PATH: i32 = 0x0004;
    /// Component attribute: 64-bit component
    pub const SIXTY_FOUR_BIT: i32 = 0x0100;

    /// Component identifier
    #[must_use]
    pub fn component(&self) -> Option<&'a str> {
        text(self.row, 0)
    }

    /// Component GUID
    #[must_use]
    pub fn component_id(&self) -> Option<&'a str> {
        text(self.row, 1)
    }

    /// Directory the component installs into
    #[must_use]
    pub fn directory(&self) -> Option<&'a str> {
        text(self.row, 2)
    }

    /// Attribute bits
    ///
    /// # Errors
    /// Returns an error if the field is null or not a number.
    pub fn attributes(&self) -> Result<i32> {
        self.row.field_as_integer(3)
    }

    /// Install condition
    #[must_use]
    pub fn condition(&self) -> Option<&'a str> {
        text(self.row, 4)
    }

    /// Key path file, registry or ODBC data source
    #[must_use]
    pub fn key_path(&self) -> Option<&'a str> {
        text(self.row, 5)
    }

    /// True for 64-bit components
    ///
    /// # Errors
    /// Returns an error if the attributes are not a number.
    pub fn is_64bit(&self) -> Result<bool> {
        has_bits(self.row, 3, Self::SIXTY_FOUR_BIT)
    }

    /// True if the key path is a registry value
    ///
    /// # Errors
    /// Returns an error if the attributes are not a number.
    pub fn is_registry_key_path(&self) -> Result<bool> {
        has_bits(self.row, 3, Self::REGISTRY_KEY_PATH)
    }
}

/// `File` table: File, Component_, FileName, FileSize, Version, Language, Attributes, Sequence
#[derive(Clone, Copy, Debug)]
pub struct FileRow<'a> {
    row: &'a Row,
}

impl<'a> FileRow<'a> {
    /// File attribute: not compressed
    pub const NONCOMPRESSED: i32 = 0x2000;
    /// File attribute: compressed
    pub const COMPRESSED: i32 = 0x4000;

    /// File identifier
    #[must_use]
    pub fn file(&self) -> Option<&'a str> {
        text(self.row, 0)
    }

    /// Owning component
    #[must_use]
    pub fn component(&self) -> Option<&'a str> {
        text(self.row, 1)
    }

    /// `short|long` file name as stored
    #[must_use]
    pub fn file_name(&self) -> Option<&'a str> {
        text(self.row, 2)
    }

    /// Short file name part
    #[must_use]
    pub fn short_name(&self) -> Option<&'a str> {
        self.file_name()
            .map(|name| name.split_once('|').map_or(name, |(short, _)| short))
    }

    /// Long file name part, the short name if there is no long one
    #[must_use]
    pub fn long_name(&self) -> Option<&'a str> {
        self.file_name()
            .map(|name| name.split_once('|').map_or(name, |(_, long)| long))
    }

    /// Size in bytes
    ///
    /// # Errors
    /// Returns an error if the field is null or not a number.
    pub fn file_size(&self) -> Result<i32> {
        self.row.field_as_integer(3)
    }

    /// Version or companion file
    #[must_use]
    pub fn version(&self) -> Option<&'a str> {
        text(self.row, 4)
    }

    /// Language ids
    #[must_use]
    pub fn language(&self) -> Option<&'a str> {
        text(self.row, 5)
    }

    /// Attribute bits, if set
    ///
    /// # Errors
    /// Returns an error if the field is not a number.
    pub fn attributes(&self) -> Result<Option<i32>> {
        self.row.field_as_nullable_integer(6)
    }

    /// Sequence in the media layout
    ///
    /// # Errors
    /// Returns an error if the field is null or not a number.
    pub fn sequence(&self) -> Result<i32> {
        self.row.field_as_integer(7)
    }

    /// True if the file is explicitly compressed
    ///
    /// # Errors
    /// Returns an error if the attributes are not a number.
    pub fn is_compressed(&self) -> Result<bool> {
        has_bits(self.row, 6, Self::COMPRESSED)
    }

    /// True if the file is explicitly uncompressed
    ///
    /// # Errors
    /// Returns an error if the attributes are not a number.
    pub fn is_uncompressed(&self) -> Result<bool> {
        has_bits(self.row, 6, Self::NONCOMPRESSED)
    }
}

/// `Media` table: DiskId, LastSequence, DiskPrompt, Cabinet, VolumeLabel, Source
#[derive(Clone, Copy, Debug)]
pub struct MediaRow<'a> {
    row: &'a Row,
}

impl<'a> MediaRow<'a> {
    /// Disk number
    ///
    /// # Errors
    /// Returns an error if the field is null or not a number.
    pub fn disk_id(&self) -> Result<i32> {
        self.row.field_as_integer(0)
    }

    /// Sequence of the last file on this disk
    ///
    /// # Errors
    /// Returns an error if the field is null or not a number.
    pub fn last_sequence(&self) -> Result<i32> {
        self.row.field_as_integer(1)
    }

    /// Prompt shown to insert the disk
    #[must_use]
    pub fn disk_prompt(&self) -> Option<&'a str> {
        text(self.row, 2)
    }

    /// Cabinet name, `#` prefixed when embedded
    #[must_use]
    pub fn cabinet(&self) -> Option<&'a str> {
        text(self.row, 3)
    }

    /// True if the cabinet is a stream of the package
    #[must_use]
    pub fn is_embedded_cabinet(&self) -> bool {
        self.cabinet().is_some_and(|cabinet| cabinet.starts_with('#'))
    }

    /// Volume label
    #[must_use]
    pub fn volume_label(&self) -> Option<&'a str> {
        text(self.row, 4)
    }

    /// Source for patching
    #[must_use]
    pub fn source(&self) -> Option<&'a str> {
        text(self.row, 5)
    }
}

/// `Property` table: Property, Value
#[derive(Clone, Copy, Debug)]
pub struct PropertyRow<'a> {
    row: &'a Row,
}

impl<'a> PropertyRow<'a> {
    /// Property name
    #[must_use]
    pub fn property(&self) -> Option<&'a str> {
        text(self.row, 0)
    }

    /// Property value
    #[must_use]
    pub fn value(&self) -> Option<&'a str> {
        text(self.row, 1)
    }
}

/// `Upgrade` table: UpgradeCode, VersionMin, VersionMax, Language, Attributes, Remove,
/// ActionProperty
#[derive(Clone, Copy, Debug)]
pub struct UpgradeRow<'a> {
    row: &'a Row,
}

impl<'a> UpgradeRow<'a> {
    /// Upgrade attribute: detect only, never remove
    pub const ONLY_DETECT: i32 = 0x0002;

    /// Upgrade code GUID
    #[must_use]
    pub fn upgrade_code(&self) -> Option<&'a str> {
        text(self.row, 0)
    }

    /// Lower version bound
    #[must_use]
    pub fn version_min(&self) -> Option<&'a str> {
        text(self.row, 1)
    }

    /// Upper version bound
    #[must_use]
    pub fn version_max(&self) -> Option<&'a str> {
        text(self.row, 2)
    }

    /// Language ids
    #[must_use]
    pub fn language(&self) -> Option<&'a str> {
        text(self.row, 3)
    }

    /// Attribute bits
    ///
    /// # Errors
    /// Returns an error if the field is null or not a number.
    pub fn attributes(&self) -> Result<i32> {
        self.row.field_as_integer(4)
    }

    /// Features to remove
    #[must_use]
    pub fn remove(&self) -> Option<&'a str> {
        text(self.row, 5)
    }

    /// Property receiving the detected product codes
    #[must_use]
    pub fn action_property(&self) -> Option<&'a str> {
        text(self.row, 6)
    }

    /// True if detected products are not removed
    ///
    /// # Errors
    /// Returns an error if the attributes are not a number.
    pub fn only_detect(&self) -> Result<bool> {
        has_bits(self.row, 4, Self::ONLY_DETECT)
    }
}

/// `Control` table: Dialog_, Control, Type, X, Y, Width, Height, Attributes, Property, Text,
/// Control_Next, Help
#[derive(Clone, Copy, Debug)]
pub struct ControlRow<'a> {
    row: &'a Row,
}

impl<'a> ControlRow<'a> {
    /// Owning dialog
    #[must_use]
    pub fn dialog(&self) -> Option<&'a str> {
        text(self.row, 0)
    }

    /// Control identifier
    #[must_use]
    pub fn control(&self) -> Option<&'a str> {
        text(self.row, 1)
    }

    /// Control type, e.g. `PushButton`
    #[must_use]
    pub fn control_type(&self) -> Option<&'a str> {
        text(self.row, 2)
    }

    /// Position and size as `(x, y, width, height)`
    ///
    /// # Errors
    /// Returns an error if a coordinate is null or not a number.
    pub fn bounds(&self) -> Result<(i32, i32, i32, i32)> {
        Ok((
            self.row.field_as_integer(3)?,
            self.row.field_as_integer(4)?,
            self.row.field_as_integer(5)?,
            self.row.field_as_integer(6)?,
        ))
    }

    /// Attribute bits, if set
    ///
    /// # Errors
    /// Returns an error if the field is not a number.
    pub fn attributes(&self) -> Result<Option<i32>> {
        self.row.field_as_nullable_integer(7)
    }

    /// Property bound to the control
    #[must_use]
    pub fn property(&self) -> Option<&'a str> {
        text(self.row, 8)
    }

    /// Control text
    #[must_use]
    pub fn text(&self) -> Option<&'a str> {
        text(self.row, 9)
    }

    /// Next control in tab order
    #[must_use]
    pub fn next(&self) -> Option<&'a str> {
        text(self.row, 10)
    }

    /// Tooltip and help text
    #[must_use]
    pub fn help(&self) -> Option<&'a str> {
        text(self.row, 11)
    }
}
