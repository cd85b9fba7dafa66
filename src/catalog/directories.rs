//! Standard directory identifiers and their platform-specific resolution.

use std::{collections::HashSet, sync::OnceLock};

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Target platform of a package.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    /// 32-bit x86
    #[default]
    X86,
    /// x64
    X64,
    /// ARM64
    Arm64,
}

impl Platform {
    /// True for the 64-bit platforms
    #[must_use]
    pub fn is_64bit(self) -> bool {
        !matches!(self, Platform::X86)
    }
}

/// Dual-mode directories with their X86 and 64-bit concrete ids.
const DUAL_MODE_DIRECTORIES: &[(&str, &str, &str)] = &[
    ("CommonFiles6432Folder", "CommonFilesFolder", "CommonFiles64Folder"),
    ("ProgramFiles6432Folder", "ProgramFilesFolder", "ProgramFiles64Folder"),
    ("System6432Folder", "SystemFolder", "System64Folder"),
];

const STANDARD_DIRECTORIES: &[&str] = &[
    "AdminToolsFolder",
    "AppDataFolder",
    "CommonAppDataFolder",
    "CommonFiles64Folder",
    "CommonFiles6432Folder",
    "CommonFilesFolder",
    "DesktopFolder",
    "FavoritesFolder",
    "FontsFolder",
    "LocalAppDataFolder",
    "MyPicturesFolder",
    "NetHoodFolder",
    "PersonalFolder",
    "PrintHoodFolder",
    "ProgramFiles64Folder",
    "ProgramFiles6432Folder",
    "ProgramFilesFolder",
    "ProgramMenuFolder",
    "RecentFolder",
    "SendToFolder",
    "StartMenuFolder",
    "StartupFolder",
    "System16Folder",
    "System64Folder",
    "System6432Folder",
    "SystemFolder",
    "TARGETDIR",
    "TempFolder",
    "TemplateFolder",
    "WindowsFolder",
    "WindowsVolume",
];

/// All standard directory ids in ordinal order
#[must_use]
pub fn standard_directories() -> &'static [&'static str] {
    STANDARD_DIRECTORIES
}

/// True if `id` names a standard directory
#[must_use]
pub fn is_standard_directory(id: &str) -> bool {
    static DIRECTORIES: OnceLock<HashSet<&'static str>> = OnceLock::new();

    DIRECTORIES
        .get_or_init(|| STANDARD_DIRECTORIES.iter().copied().collect())
        .contains(id)
}

/// Resolves a dual-mode `6432` directory id to the concrete id for `platform`.
///
/// `ProgramFiles6432Folder`, `CommonFiles6432Folder` and `System6432Folder` map to their
/// 32-bit folder on [`Platform::X86`] and to their `64` folder otherwise. Every other id
/// is returned unchanged.
///
/// ## Arguments
/// * 'id'       - Directory id to resolve
/// * 'platform' - Target platform
#[must_use]
pub fn platform_specific_directory_id(id: &str, platform: Platform) -> &str {
    match DUAL_MODE_DIRECTORIES
        .iter()
        .find(|(dual_mode, _, _)| *dual_mode == id)
    {
        Some((_, x86, _)) if !platform.is_64bit() => *x86,
        Some((_, _, x64)) => *x64,
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_dual_mode_resolution() {
        assert_eq!(
            platform_specific_directory_id("ProgramFiles6432Folder", Platform::X86),
            "ProgramFilesFolder"
        );
        assert_eq!(
            platform_specific_directory_id("ProgramFiles6432Folder", Platform::X64),
            "ProgramFiles64Folder"
        );
        assert_eq!(
            platform_specific_directory_id("ProgramFiles6432Folder", Platform::Arm64),
            "ProgramFiles64Folder"
        );
        assert_eq!(
            platform_specific_directory_id("CommonFiles6432Folder", Platform::X86),
            "CommonFilesFolder"
        );
        assert_eq!(
            platform_specific_directory_id("System6432Folder", Platform::Arm64),
            "System64Folder"
        );
    }

    #[test]
    fn test_pass_through() {
        for platform in Platform::iter() {
            assert_eq!(platform_specific_directory_id("TARGETDIR", platform), "TARGETDIR");
            assert_eq!(platform_specific_directory_id("INSTALLDIR", platform), "INSTALLDIR");
        }
    }

    #[test]
    fn test_resolved_ids_are_standard() {
        for (dual_mode, x86, x64) in DUAL_MODE_DIRECTORIES {
            assert!(is_standard_directory(dual_mode));
            assert!(is_standard_directory(x86));
            assert!(is_standard_directory(x64));
        }
        assert!(!is_standard_directory("INSTALLDIR"));
    }

    #[test]
    fn test_platform_names() {
        assert_eq!("ARM64".parse::<Platform>().unwrap(), Platform::Arm64);
        assert_eq!(Platform::X64.to_string(), "x64");
    }
}
