//! Well-known Windows Installer property names.

use std::{collections::HashSet, sync::OnceLock};

const STANDARD_PROPERTIES: &[&str] = &[
    "ACTION",
    "ADDDEFAULT",
    "ADDLOCAL",
    "ADDSOURCE",
    "AdminProperties",
    "AdminToolsFolder",
    "AdminUser",
    "ADVERTISE",
    "AFTERREBOOT",
    "AllowProductCodeMismatches",
    "AllowProductVersionMajorMismatches",
    "ALLUSERS",
    "Alpha",
    "ApiPatchingSymbolFlags",
    "AppDataFolder",
    "ARPAUTHORIZEDCDFPREFIX",
    "ARPCOMMENTS",
    "ARPCONTACT",
    "ARPHELPLINK",
    "ARPHELPTELEPHONE",
    "ARPINSTALLLOCATION",
    "ARPNOMODIFY",
    "ARPNOREMOVE",
    "ARPNOREPAIR",
    "ARPPRODUCTICON",
    "ARPREADME",
    "ARPSIZE",
    "ARPSYSTEMCOMPONENT",
    "ARPURLINFOABOUT",
    "ARPURLUPDATEINFO",
    "AVAILABLEFREEREG",
    "BorderSide",
    "BorderTop",
    "CaptionHeight",
    "CCP_DRIVE",
    "ColorBits",
    "COMPADDLOCAL",
    "COMPADDSOURCE",
    "COMPANYNAME",
    "ComputerName",
    "CostingComplete",
    "Date",
    "DefaultUIFont",
    "DESKTOP",
    "DisableAdvtShortcuts",
    "DISABLEADVTSHORTCUTS",
    "DISABLEMEDIA",
    "DISABLEROLLBACK",
    "DiskPrompt",
    "DontRemoveTempFolderWhenFinished",
    "EnableUserControl",
    "EXECUTEACTION",
    "EXECUTEMODE",
    "FASTOEM",
    "FILEADDDEFAULT",
    "FILEADDLOCAL",
    "FILEADDSOURCE",
    "IncludeWholeFilesOnly",
    "Installed",
    "INSTALLLEVEL",
    "Intel",
    "Intel64",
    "IsAdminPackage",
    "LeftUnit",
    "LIMITUI",
    "ListOfPatchGUIDsToReplace",
    "ListOfTargetProductCode",
    "LOGACTION",
    "LogonUser",
    "Manufacturer",
    "MEDIAPACKAGEPATH",
    "MediaSourceDir",
    "MinimumRequiredMsiVersion",
    "MsiAMD64",
    "MSIAPRSETTINGSIDENTIFIER",
    "MSICHECKCRCS",
    "MSIDISABLERMRESTART",
    "MSIENFORCEUPGRADECOMPONENTRULES",
    "MSIFASTINSTALL",
    "MsiFileToUseToCreatePatchTables",
    "MsiHiddenProperties",
    "MSIINSTALLPERUSER",
    "MSIINSTANCEGUID",
    "MsiLogFileLocation",
    "MsiLogging",
    "MsiNetAssemblySupport",
    "MSINEWINSTANCE",
    "MSINODISABLEMEDIA",
    "MsiNTProductType",
    "MsiNTSuiteBackOffice",
    "MsiNTSuiteDataCenter",
    "MsiNTSuiteEnterprise",
    "MsiNTSuitePersonal",
    "MsiNTSuiteSmallBusiness",
    "MsiNTSuiteSmallBusinessRestricted",
    "MsiNTSuiteWebServer",
    "MsiPackageDownloadLocalCopy",
    "MSIPATCHDOWNLOADLOCALCOPY",
    "MSIPATCHREMOVE",
    "MsiPatchRemovalList",
    "MSIRESTARTMANAGERCONTROL",
    "MsiRestartManagerSessionKey",
    "MSIRMSHUTDOWN",
    "MsiRunningElevated",
    "MsiSystemRebootPending",
    "MsiTabletPC",
    "MsiUIHideCancel",
    "MsiUIProgressOnly",
    "MsiUISourceResOnly",
    "MSIUNINSTALLSUPERSEDEDCOMPONENTS",
    "MSIUSEREALADMINDETECTION",
    "MsiWin32AssemblySupport",
    "MsiX64",
    "MyPicturesFolder",
    "NetHoodFolder",
    "NOCOMPANYNAME",
    "NOUSERNAME",
    "OLEAdvtSupport",
    "OptimizePatchSizeForLargeFiles",
    "OriginalDatabase",
    "OutOfDiskSpace",
    "OutOfNoRbDiskSpace",
    "ParentOriginalDatabase",
    "ParentProductCode",
    "PATCH",
    "PATCH_CACHE_DIR",
    "PATCH_CACHE_ENABLED",
    "PatchGUID",
    "PATCHNEWPACKAGECODE",
    "PATCHNEWSUMMARYCOMMENTS",
    "PATCHNEWSUMMARYSUBJECT",
    "PatchOutputPath",
    "PatchSourceList",
    "PhysicalMemory",
    "PIDKEY",
    "PIDTemplate",
    "Preselected",
    "PRIMARYFOLDER",
    "PrimaryVolumePath",
    "PrimaryVolumeSpaceAvailable",
    "PrimaryVolumeSpaceRemaining",
    "PrimaryVolumeSpaceRequired",
    "PrintHoodFolder",
    "Privileged",
    "ProductCode",
    "ProductID",
    "ProductLanguage",
    "ProductName",
    "ProductState",
    "ProductToBeRegistered",
    "ProductVersion",
    "PROMPTROLLBACKCOST",
    "REBOOT",
    "REBOOTPROMPT",
    "RecentFolder",
    "RedirectedDllSupport",
    "REINSTALL",
    "REINSTALLMODE",
    "RemoveAdminTS",
    "REMOVE",
    "ReplacedInUseFiles",
    "RestrictedUserControl",
    "RESUME",
    "RollbackDisabled",
    "ROOTDRIVE",
    "ScreenX",
    "ScreenY",
    "SecureCustomProperties",
    "SEQUENCE",
    "ServicePackLevel",
    "ServicePackLevelMinor",
    "SharedWindows",
    "ShellAdvtSupport",
    "SHORTFILENAMES",
    "SourceDir",
    "SOURCELIST",
    "SystemLanguageID",
    "TARGETDIR",
    "TerminalServer",
    "TextHeight",
    "Time",
    "TRANSFORMS",
    "TRANSFORMSATSOURCE",
    "TRANSFORMSSECURE",
    "TTCSupport",
    "UILevel",
    "UpdateStarted",
    "UpgradeCode",
    "UPGRADINGPRODUCTCODE",
    "UserLanguageID",
    "USERNAME",
    "UserSID",
    "Version9X",
    "VersionDatabase",
    "VersionMsi",
    "VersionNT",
    "VersionNT64",
    "VirtualMemory",
    "WindowsBuild",
    "WindowsVolume",
];

/// All well-known property names
#[must_use]
pub fn standard_properties() -> &'static [&'static str] {
    STANDARD_PROPERTIES
}

/// True if `name` is a well-known Windows Installer property. The comparison is
/// case-sensitive, as property names are.
#[must_use]
pub fn is_standard_property(name: &str) -> bool {
    static PROPERTIES: OnceLock<HashSet<&'static str>> = OnceLock::new();

    PROPERTIES
        .get_or_init(|| STANDARD_PROPERTIES.iter().copied().collect())
        .contains(name)
}
