//! Validation configuration for table data
//!
//! Reading a document already enforces the structural rules (known tables, field counts,
//! well-formed values). The switches here select the column rules that are checked on top
//! of that by [`crate::validation::Validator`].

/// Configuration for column-rule validation of table data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidationConfig {
    /// Report null values in non-nullable columns
    pub enable_nullability_validation: bool,

    /// Report values whose kind disagrees with the column type (text in a number column,
    /// numbers in an object column, ...)
    pub enable_type_validation: bool,

    /// Report strings longer than the column width
    pub enable_length_validation: bool,

    /// Report numbers outside of the column's `minValue`/`maxValue`
    pub enable_range_validation: bool,

    /// Report values outside of the column's possibility set
    pub enable_set_validation: bool,

    /// Check string values against their column category (GUID, identifier, version, ...)
    pub enable_category_validation: bool,

    /// Resolve foreign keys against the other tables of the validated set
    pub enable_foreign_key_validation: bool,

    /// Report rows that share a primary key
    pub enable_primary_key_validation: bool,

    /// Stop collecting after this many issues (default: 1000)
    pub max_issues: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enable_nullability_validation: true,
            enable_type_validation: true,
            enable_length_validation: true,
            enable_range_validation: true,
            enable_set_validation: true,
            enable_category_validation: true,
            enable_foreign_key_validation: true,
            enable_primary_key_validation: true,
            max_issues: 1000,
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration that checks nothing
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enable_nullability_validation: false,
            enable_type_validation: false,
            enable_length_validation: false,
            enable_range_validation: false,
            enable_set_validation: false,
            enable_category_validation: false,
            enable_foreign_key_validation: false,
            enable_primary_key_validation: false,
            max_issues: 0,
        }
    }

    /// Creates a minimal configuration
    ///
    /// Only checks the rules that the binder would fail on: nullability, types and
    /// primary-key uniqueness.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            enable_nullability_validation: true,
            enable_type_validation: true,
            enable_length_validation: false,
            enable_range_validation: false,
            enable_set_validation: false,
            enable_category_validation: false,
            enable_foreign_key_validation: false,
            enable_primary_key_validation: true,
            max_issues: 1000,
        }
    }

    /// Creates a configuration with every check enabled and no issue limit
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_issues: usize::MAX,
            ..Self::default()
        }
    }

    /// True if at least one check is enabled
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.max_issues > 0
            && (self.enable_nullability_validation
                || self.enable_type_validation
                || self.enable_length_validation
                || self.enable_range_validation
                || self.enable_set_validation
                || self.enable_category_validation
                || self.enable_foreign_key_validation
                || self.enable_primary_key_validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_config_presets() {
        let disabled = ValidationConfig::disabled();
        assert!(!disabled.enable_nullability_validation);
        assert!(!disabled.enable_type_validation);
        assert!(!disabled.enable_category_validation);
        assert!(!disabled.enable_foreign_key_validation);
        assert!(!disabled.enable_primary_key_validation);
        assert_eq!(disabled.max_issues, 0);
        assert!(!disabled.is_enabled());

        let minimal = ValidationConfig::minimal();
        assert!(minimal.enable_nullability_validation);
        assert!(minimal.enable_type_validation);
        assert!(!minimal.enable_length_validation);
        assert!(!minimal.enable_category_validation);
        assert!(!minimal.enable_foreign_key_validation);
        assert!(minimal.enable_primary_key_validation);
        assert!(minimal.is_enabled());

        let strict = ValidationConfig::strict();
        assert!(strict.enable_set_validation);
        assert!(strict.enable_foreign_key_validation);
        assert_eq!(strict.max_issues, usize::MAX);
    }

    #[test]
    fn test_default_config() {
        let default = ValidationConfig::default();
        assert!(default.is_enabled());
        assert_eq!(
            ValidationConfig {
                max_issues: usize::MAX,
                ..default
            },
            ValidationConfig::strict()
        );
    }
}
