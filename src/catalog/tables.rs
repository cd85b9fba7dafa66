//! Column layouts of the standard Windows Installer tables.
//!
//! Layouts follow the Windows Installer database schema, including the merge module tables,
//! the patch creation tables and the `_Streams`, `_SummaryInformation`, `_TransformView`
//! and `_Validation` system tables.

use crate::schema::{
    ColumnBuilder, ColumnCategory as Category, ColumnModularizeType as Modularize, ColumnType,
    StrongRowType, TableDefinition,
};

const MAX_I2: i64 = 32767;
const MAX_I4: i64 = 2_147_483_647;

fn string(name: &str, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::String).length(length)
}

fn localized(name: &str, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Localized).length(length)
}

fn number(name: &str, length: u32) -> ColumnBuilder {
    let category = if length == 2 {
        Category::Integer
    } else {
        Category::DoubleInteger
    };
    ColumnBuilder::new(name, ColumnType::Number)
        .length(length)
        .category(category)
}

fn object(name: &str) -> ColumnBuilder {
    ColumnBuilder::new(name, ColumnType::Object).category(Category::Binary)
}

fn identifier(name: &str, length: u32) -> ColumnBuilder {
    string(name, length)
        .category(Category::Identifier)
        .modularize(Modularize::Column)
}

fn foreign(name: &str, length: u32, table: &str, column: u32) -> ColumnBuilder {
    identifier(name, length).key(table, column)
}

fn component(name: &str) -> ColumnBuilder {
    foreign(name, 72, "Component", 1)
}

fn feature(name: &str) -> ColumnBuilder {
    foreign(name, 38, "Feature", 1).modularize(Modularize::None)
}

fn file(name: &str) -> ColumnBuilder {
    foreign(name, 72, "File", 1)
}

fn directory(name: &str) -> ColumnBuilder {
    foreign(name, 72, "Directory", 1)
}

fn condition(name: &str) -> ColumnBuilder {
    string(name, 255)
        .nullable()
        .category(Category::Condition)
        .modularize(Modularize::Condition)
}

fn formatted(name: &str, length: u32) -> ColumnBuilder {
    string(name, length)
        .category(Category::Formatted)
        .modularize(Modularize::Property)
}

fn text(name: &str, length: u32) -> ColumnBuilder {
    localized(name, length).category(Category::Text)
}

fn coordinate(name: &str) -> ColumnBuilder {
    number(name, 2).range(0, MAX_I2)
}

fn build(
    name: &str,
    strong_row_type: Option<StrongRowType>,
    unreal: bool,
    columns: Vec<ColumnBuilder>,
) -> TableDefinition {
    let columns: Vec<_> = columns.into_iter().map(ColumnBuilder::finish).collect();
    let single_key = columns.iter().filter(|column| column.is_primary_key()).count() == 1;

    TableDefinition::from_parts(
        name,
        Some(name.to_string()),
        columns,
        strong_row_type,
        unreal,
        single_key,
    )
}

fn table(name: &str, columns: Vec<ColumnBuilder>) -> TableDefinition {
    build(name, None, false, columns)
}

fn strong(name: &str, strong_row_type: StrongRowType, columns: Vec<ColumnBuilder>) -> TableDefinition {
    build(name, Some(strong_row_type), false, columns)
}

fn sequence(name: &str) -> TableDefinition {
    table(
        name,
        vec![
            identifier("Action", 72).primary_key(),
            condition("Condition"),
            number("Sequence", 2).nullable().range(-4, MAX_I2),
        ],
    )
}

fn module_sequence(name: &str) -> TableDefinition {
    table(
        name,
        vec![
            identifier("Action", 64).primary_key(),
            number("Sequence", 2).nullable().range(-4, MAX_I2),
            foreign("BaseAction", 64, name, 1).nullable(),
            number("After", 2).nullable().range(0, 1),
            condition("Condition"),
        ],
    )
}

fn locator_key() -> ColumnBuilder {
    identifier("Signature_", 72).primary_key()
}

#[allow(clippy::too_many_lines)]
pub(crate) fn standard_tables() -> Vec<TableDefinition> {
    vec![
        table(
            "ActionText",
            vec![
                identifier("Action", 72).primary_key(),
                text("Description", 0).nullable(),
                localized("Template", 0).nullable().category(Category::Template),
            ],
        ),
        sequence("AdminExecuteSequence"),
        sequence("AdminUISequence"),
        sequence("AdvtExecuteSequence"),
        table(
            "AppId",
            vec![
                string("AppId", 38).primary_key().category(Category::Guid),
                formatted("RemoteServerName", 255).nullable(),
                string("LocalService", 255).nullable().category(Category::Text),
                string("ServiceParameters", 255).nullable().category(Category::Text),
                string("DllSurrogate", 255).nullable().category(Category::Text),
                number("ActivateAtStorage", 2).nullable().range(0, 1),
                number("RunAsInteractiveUser", 2).nullable().range(0, 1),
            ],
        ),
        table(
            "AppSearch",
            vec![
                identifier("Property", 72).primary_key(),
                identifier("Signature_", 72)
                    .primary_key()
                    .key("Signature;RegLocator;IniLocator;DrLocator;CompLocator", 1),
            ],
        ),
        table(
            "BBControl",
            vec![
                foreign("Billboard_", 50, "Billboard", 1).primary_key(),
                identifier("BBControl", 50).primary_key(),
                string("Type", 50).category(Category::Identifier),
                coordinate("X"),
                coordinate("Y"),
                coordinate("Width"),
                coordinate("Height"),
                number("Attributes", 4).nullable(),
                localized("Text", 50)
                    .nullable()
                    .category(Category::Text)
                    .modularize(Modularize::ControlText),
            ],
        ),
        table(
            "Billboard",
            vec![
                identifier("Billboard", 50).primary_key(),
                feature("Feature_"),
                identifier("Action", 50).nullable(),
                number("Ordering", 2).nullable().range(0, MAX_I2),
            ],
        ),
        table(
            "Binary",
            vec![
                identifier("Name", 72).primary_key(),
                object("Data"),
            ],
        ),
        table(
            "BindImage",
            vec![
                file("File_").primary_key(),
                string("Path", 255).nullable().category(Category::Paths),
            ],
        ),
        table("CCPSearch", vec![locator_key()]),
        table(
            "CheckBox",
            vec![
                identifier("Property", 72).primary_key(),
                formatted("Value", 64).nullable(),
            ],
        ),
        table(
            "Class",
            vec![
                string("CLSID", 38).primary_key().category(Category::Guid),
                string("Context", 32).primary_key().category(Category::Identifier),
                component("Component_").primary_key(),
                string("ProgId_Default", 255)
                    .nullable()
                    .category(Category::Text)
                    .key("ProgId", 1),
                text("Description", 255).nullable(),
                string("AppId_", 38)
                    .nullable()
                    .category(Category::Guid)
                    .key("AppId", 1),
                string("FileTypeMask", 255).nullable().category(Category::Text),
                foreign("Icon_", 72, "Icon", 1)
                    .nullable()
                    .modularize(Modularize::Icon),
                number("IconIndex", 2).nullable().range(-MAX_I2, MAX_I2),
                string("DefInprocHandler", 32)
                    .nullable()
                    .category(Category::Filename),
                formatted("Argument", 255).nullable(),
                feature("Feature_"),
                number("Attributes", 2).nullable().range(0, MAX_I2),
            ],
        ),
        table(
            "ComboBox",
            vec![
                identifier("Property", 72).primary_key(),
                number("Order", 2).primary_key().range(1, MAX_I2),
                formatted("Value", 64),
                localized("Text", 64).nullable().category(Category::Formatted),
            ],
        ),
        table(
            "CompLocator",
            vec![
                locator_key(),
                string("ComponentId", 38).category(Category::Guid),
                number("Type", 2).nullable().range(0, 1),
            ],
        ),
        table(
            "Complus",
            vec![
                component("Component_").primary_key(),
                number("ExpType", 2).primary_key().nullable().range(0, MAX_I2),
            ],
        ),
        strong(
            "Component",
            StrongRowType::Component,
            vec![
                identifier("Component", 72).primary_key(),
                string("ComponentId", 38).nullable().category(Category::Guid),
                directory("Directory_"),
                number("Attributes", 2),
                condition("Condition"),
                identifier("KeyPath", 72)
                    .nullable()
                    .key("File;Registry;ODBCDataSource", 1),
            ],
        ),
        table(
            "Condition",
            vec![
                feature("Feature_").primary_key(),
                number("Level", 2).primary_key().range(0, MAX_I2),
                condition("Condition"),
            ],
        ),
        strong(
            "Control",
            StrongRowType::Control,
            vec![
                foreign("Dialog_", 72, "Dialog", 1).primary_key(),
                identifier("Control", 50).primary_key(),
                string("Type", 20).category(Category::Identifier),
                coordinate("X"),
                coordinate("Y"),
                coordinate("Width"),
                coordinate("Height"),
                number("Attributes", 4).nullable(),
                identifier("Property", 72).nullable(),
                localized("Text", 0)
                    .nullable()
                    .category(Category::Formatted)
                    .modularize(Modularize::ControlText),
                foreign("Control_Next", 50, "Control", 2).nullable(),
                text("Help", 50).nullable(),
            ],
        ),
        table(
            "ControlCondition",
            vec![
                foreign("Dialog_", 72, "Dialog", 1).primary_key(),
                foreign("Control_", 50, "Control", 2).primary_key(),
                string("Action", 50)
                    .primary_key()
                    .possibilities("Default;Disable;Enable;Hide;Show"),
                string("Condition", 255)
                    .primary_key()
                    .category(Category::Condition)
                    .modularize(Modularize::Condition),
            ],
        ),
        table(
            "ControlEvent",
            vec![
                foreign("Dialog_", 72, "Dialog", 1).primary_key(),
                foreign("Control_", 50, "Control", 2).primary_key(),
                formatted("Event", 50).primary_key(),
                string("Argument", 255)
                    .primary_key()
                    .category(Category::Formatted)
                    .modularize(Modularize::ControlEventArgument),
                condition("Condition").primary_key(),
                number("Ordering", 2).nullable().range(0, MAX_I4),
            ],
        ),
        table(
            "CreateFolder",
            vec![
                directory("Directory_").primary_key(),
                component("Component_").primary_key(),
            ],
        ),
        table(
            "CustomAction",
            vec![
                identifier("Action", 72).primary_key(),
                number("Type", 2).range(1, MAX_I2),
                string("Source", 72)
                    .nullable()
                    .category(Category::CustomSource)
                    .modularize(Modularize::Column),
                formatted("Target", 255).nullable(),
                number("ExtendedType", 4).nullable().range(0, MAX_I4),
            ],
        ),
        table(
            "Dialog",
            vec![
                identifier("Dialog", 72).primary_key(),
                number("HCentering", 2).range(0, 100),
                number("VCentering", 2).range(0, 100),
                coordinate("Width"),
                coordinate("Height"),
                number("Attributes", 4).nullable(),
                localized("Title", 128).nullable().category(Category::Formatted),
                foreign("Control_First", 50, "Control", 2),
                foreign("Control_Default", 50, "Control", 2).nullable(),
                foreign("Control_Cancel", 50, "Control", 2).nullable(),
            ],
        ),
        table(
            "Directory",
            vec![
                identifier("Directory", 72).primary_key(),
                directory("Directory_Parent").nullable(),
                localized("DefaultDir", 255).category(Category::DefaultDir),
            ],
        ),
        table(
            "DrLocator",
            vec![
                locator_key(),
                identifier("Parent", 72).primary_key().nullable(),
                string("Path", 255)
                    .primary_key()
                    .nullable()
                    .category(Category::AnyPath),
                number("Depth", 2).nullable().range(0, MAX_I2),
            ],
        ),
        table(
            "DuplicateFile",
            vec![
                identifier("FileKey", 72).primary_key(),
                component("Component_"),
                file("File_"),
                localized("DestName", 255)
                    .nullable()
                    .category(Category::Filename),
                identifier("DestFolder", 72).nullable(),
            ],
        ),
        table(
            "Environment",
            vec![
                identifier("Environment", 72).primary_key(),
                text("Name", 255),
                localized("Value", 255)
                    .nullable()
                    .category(Category::Formatted),
                component("Component_"),
            ],
        ),
        table(
            "Error",
            vec![
                number("Error", 2).primary_key().range(0, MAX_I2),
                localized("Message", 0)
                    .nullable()
                    .category(Category::Template),
            ],
        ),
        table(
            "EventMapping",
            vec![
                foreign("Dialog_", 72, "Dialog", 1).primary_key(),
                foreign("Control_", 50, "Control", 2).primary_key(),
                identifier("Event", 50).primary_key(),
                identifier("Attribute", 50),
            ],
        ),
        table(
            "Extension",
            vec![
                string("Extension", 255).primary_key().category(Category::Text),
                component("Component_").primary_key(),
                string("ProgId_", 255)
                    .nullable()
                    .category(Category::Text)
                    .key("ProgId", 1),
                string("MIME_", 64)
                    .nullable()
                    .category(Category::Text)
                    .key("MIME", 1),
                feature("Feature_"),
            ],
        ),
        table(
            "Feature",
            vec![
                identifier("Feature", 38).primary_key().modularize(Modularize::None),
                feature("Feature_Parent").nullable(),
                text("Title", 64).nullable(),
                text("Description", 255).nullable(),
                number("Display", 2).nullable().range(0, MAX_I2),
                number("Level", 2).range(0, MAX_I2),
                directory("Directory_")
                    .nullable()
                    .category(Category::UpperCase),
                number("Attributes", 2).possibilities(
                    "0;1;2;4;5;6;8;9;10;16;17;18;20;21;22;24;25;26;32;33;34;36;37;38;48;49;50;52;53;54",
                ),
            ],
        ),
        table(
            "FeatureComponents",
            vec![
                feature("Feature_").primary_key(),
                component("Component_").primary_key(),
            ],
        ),
        strong(
            "File",
            StrongRowType::File,
            vec![
                identifier("File", 72).primary_key(),
                component("Component_"),
                localized("FileName", 255).category(Category::Filename),
                number("FileSize", 4).range(0, MAX_I4),
                string("Version", 72)
                    .nullable()
                    .category(Category::Version)
                    .key("File", 1)
                    .modularize(Modularize::CompanionFile),
                string("Language", 20)
                    .nullable()
                    .category(Category::Language),
                number("Attributes", 2).nullable().range(0, MAX_I2),
                number("Sequence", 4).range(1, MAX_I4),
            ],
        ),
        table(
            "FileSFPCatalog",
            vec![
                file("File_").primary_key(),
                string("SFPCatalog_", 255)
                    .primary_key()
                    .category(Category::Filename)
                    .key("SFPCatalog", 1),
            ],
        ),
        table(
            "Font",
            vec![
                file("File_").primary_key(),
                string("FontTitle", 128).nullable().category(Category::Text),
            ],
        ),
        table(
            "Icon",
            vec![
                identifier("Name", 72).primary_key().modularize(Modularize::Icon),
                object("Data"),
            ],
        ),
        table(
            "IniFile",
            vec![
                identifier("IniFile", 72).primary_key(),
                localized("FileName", 255).category(Category::Filename),
                identifier("DirProperty", 72).nullable(),
                localized("Section", 96).category(Category::Formatted),
                localized("Key", 128).category(Category::Formatted),
                localized("Value", 255).category(Category::Formatted),
                number("Action", 2).possibilities("0;1;3"),
                component("Component_"),
            ],
        ),
        table(
            "IniLocator",
            vec![
                locator_key(),
                string("FileName", 255).category(Category::Filename),
                string("Section", 96).category(Category::Text),
                string("Key", 128).category(Category::Text),
                number("Field", 2).nullable().range(0, MAX_I2),
                number("Type", 2).nullable().range(0, 2),
            ],
        ),
        sequence("InstallExecuteSequence"),
        sequence("InstallUISequence"),
        table(
            "IsolatedComponent",
            vec![
                component("Component_Shared").primary_key(),
                component("Component_Application").primary_key(),
            ],
        ),
        table(
            "LaunchCondition",
            vec![
                string("Condition", 255)
                    .primary_key()
                    .category(Category::Condition)
                    .modularize(Modularize::Condition),
                localized("Description", 255).category(Category::Formatted),
            ],
        ),
        table(
            "ListBox",
            vec![
                identifier("Property", 72).primary_key(),
                number("Order", 2).primary_key().range(1, MAX_I2),
                formatted("Value", 64),
                text("Text", 64).nullable(),
            ],
        ),
        table(
            "ListView",
            vec![
                identifier("Property", 72).primary_key(),
                number("Order", 2).primary_key().range(1, MAX_I2),
                identifier("Value", 64),
                text("Text", 64).nullable(),
                foreign("Binary_", 72, "Binary", 1).nullable(),
            ],
        ),
        table(
            "LockPermissions",
            vec![
                identifier("LockObject", 72).primary_key(),
                string("Table", 32)
                    .primary_key()
                    .category(Category::Identifier)
                    .possibilities("Directory;File;Registry"),
                formatted("Domain", 255).primary_key().nullable(),
                formatted("User", 255).primary_key(),
                number("Permission", 4).nullable().range(-MAX_I4, MAX_I4),
            ],
        ),
        strong(
            "Media",
            StrongRowType::Media,
            vec![
                number("DiskId", 2).primary_key().range(1, MAX_I2),
                number("LastSequence", 4).range(0, MAX_I4),
                text("DiskPrompt", 64).nullable(),
                string("Cabinet", 255).nullable().category(Category::Cabinet),
                string("VolumeLabel", 32).nullable().category(Category::Text),
                string("Source", 72).nullable().category(Category::Property),
            ],
        ),
        table(
            "MIME",
            vec![
                string("ContentType", 64).primary_key().category(Category::Text),
                string("Extension_", 255)
                    .category(Category::Text)
                    .key("Extension", 1),
                string("CLSID", 38).nullable().category(Category::Guid),
            ],
        ),
        table(
            "MoveFile",
            vec![
                identifier("FileKey", 72).primary_key(),
                component("Component_"),
                text("SourceName", 255).nullable(),
                localized("DestName", 255)
                    .nullable()
                    .category(Category::Filename),
                identifier("SourceFolder", 72).nullable(),
                identifier("DestFolder", 72),
                number("Options", 2).range(0, 1),
            ],
        ),
        table(
            "MsiAssembly",
            vec![
                component("Component_").primary_key(),
                feature("Feature_"),
                file("File_Manifest").nullable(),
                file("File_Application").nullable(),
                number("Attributes", 2).nullable(),
            ],
        ),
        table(
            "MsiAssemblyName",
            vec![
                component("Component_").primary_key(),
                string("Name", 255).primary_key().category(Category::Text),
                string("Value", 255).category(Category::Text),
            ],
        ),
        table(
            "MsiDigitalCertificate",
            vec![
                identifier("DigitalCertificate", 72).primary_key(),
                object("CertData"),
            ],
        ),
        table(
            "MsiDigitalSignature",
            vec![
                string("Table", 32).primary_key().possibilities("Media"),
                string("SignObject", 72).primary_key().category(Category::Text),
                foreign("DigitalCertificate_", 72, "MsiDigitalCertificate", 1),
                object("Hash").nullable(),
            ],
        ),
        table(
            "MsiEmbeddedChainer",
            vec![
                identifier("MsiEmbeddedChainer", 72).primary_key(),
                condition("Condition"),
                formatted("CommandLine", 255).nullable(),
                string("Source", 72).category(Category::CustomSource),
                number("Type", 4).possibilities("2;18;50"),
            ],
        ),
        table(
            "MsiEmbeddedUI",
            vec![
                identifier("MsiEmbeddedUI", 72).primary_key(),
                string("FileName", 72).category(Category::Filename),
                number("Attributes", 2).range(0, 3),
                number("MessageFilter", 4).nullable().range(0, 234_913_791),
                object("Data"),
            ],
        ),
        table(
            "MsiFileHash",
            vec![
                file("File_").primary_key(),
                number("Options", 2).range(0, 0),
                number("HashPart1", 4),
                number("HashPart2", 4),
                number("HashPart3", 4),
                number("HashPart4", 4),
            ],
        ),
        table(
            "MsiLockPermissionsEx",
            vec![
                identifier("MsiLockPermissionsEx", 72).primary_key(),
                identifier("LockObject", 72),
                string("Table", 32)
                    .category(Category::Text)
                    .possibilities("CreateFolder;File;Registry;ServiceInstall"),
                formatted("SDDLText", 255).category(Category::FormattedSDDLText),
                condition("Condition"),
            ],
        ),
        table(
            "MsiPackageCertificate",
            vec![
                identifier("PackageCertificate", 72).primary_key(),
                foreign("DigitalCertificate_", 72, "MsiDigitalCertificate", 1),
            ],
        ),
        table(
            "MsiPatchCertificate",
            vec![
                identifier("PatchCertificate", 72).primary_key(),
                foreign("DigitalCertificate_", 72, "MsiDigitalCertificate", 1),
            ],
        ),
        table(
            "MsiPatchHeaders",
            vec![
                identifier("StreamRef", 38).primary_key(),
                object("Header"),
            ],
        ),
        table(
            "MsiPatchMetadata",
            vec![
                string("Company", 72)
                    .primary_key()
                    .nullable()
                    .category(Category::Text),
                string("Property", 72).primary_key().category(Category::Text),
                text("Value", 0).nullable(),
            ],
        ),
        table(
            "MsiPatchOldAssemblyFile",
            vec![
                file("File_").primary_key(),
                foreign("Assembly_", 72, "MsiPatchOldAssemblyName", 1)
                    .primary_key()
                    .nullable(),
            ],
        ),
        table(
            "MsiPatchOldAssemblyName",
            vec![
                identifier("Assembly", 72).primary_key(),
                string("Name", 255).primary_key().category(Category::Text),
                string("Value", 255).nullable().category(Category::Text),
            ],
        ),
        table(
            "MsiPatchSequence",
            vec![
                identifier("PatchFamily", 72).primary_key(),
                string("ProductCode", 38)
                    .primary_key()
                    .nullable()
                    .category(Category::Guid),
                string("Sequence", 72).category(Category::Version),
                number("Attributes", 4).nullable(),
            ],
        ),
        table(
            "MsiServiceConfig",
            vec![
                identifier("MsiServiceConfig", 72).primary_key(),
                formatted("Name", 255),
                number("Event", 2).range(0, 7),
                number("ConfigType", 4).range(-MAX_I4, MAX_I4),
                string("Argument", 255).nullable().category(Category::Text),
                component("Component_"),
            ],
        ),
        table(
            "MsiServiceConfigFailureActions",
            vec![
                identifier("MsiServiceConfigFailureActions", 72).primary_key(),
                formatted("Name", 255),
                number("Event", 2).range(0, 7),
                number("ResetPeriod", 4).nullable(),
                localized("RebootMessage", 255)
                    .nullable()
                    .category(Category::Formatted),
                localized("Command", 255)
                    .nullable()
                    .category(Category::Formatted),
                string("Actions", 255).nullable().category(Category::Text),
                string("DelayActions", 255).nullable().category(Category::Text),
                component("Component_"),
            ],
        ),
        table(
            "MsiShortcutProperty",
            vec![
                identifier("MsiShortcutProperty", 72).primary_key(),
                foreign("Shortcut_", 72, "Shortcut", 1),
                formatted("PropertyKey", 0),
                formatted("PropVariantValue", 0),
            ],
        ),
        table(
            "ODBCAttribute",
            vec![
                foreign("Driver_", 72, "ODBCDriver", 1).primary_key(),
                string("Attribute", 40).primary_key().category(Category::Text),
                text("Value", 255).nullable(),
            ],
        ),
        table(
            "ODBCDataSource",
            vec![
                identifier("DataSource", 72).primary_key(),
                component("Component_"),
                string("Description", 255).category(Category::Text),
                string("DriverDescription", 255).category(Category::Text),
                number("Registration", 2).range(0, 1),
            ],
        ),
        table(
            "ODBCDriver",
            vec![
                identifier("Driver", 72).primary_key(),
                component("Component_"),
                string("Description", 255).category(Category::Text),
                file("File_"),
                file("File_Setup").nullable(),
            ],
        ),
        table(
            "ODBCSourceAttribute",
            vec![
                foreign("DataSource_", 72, "ODBCDataSource", 1).primary_key(),
                string("Attribute", 32).primary_key().category(Category::Text),
                text("Value", 255).nullable(),
            ],
        ),
        table(
            "ODBCTranslator",
            vec![
                identifier("Translator", 72).primary_key(),
                component("Component_"),
                string("Description", 255).category(Category::Text),
                file("File_"),
                file("File_Setup").nullable(),
            ],
        ),
        table(
            "Patch",
            vec![
                file("File_").primary_key(),
                number("Sequence", 4).primary_key().range(0, MAX_I4),
                number("PatchSize", 4).range(0, MAX_I4),
                number("Attributes", 2).range(0, MAX_I2),
                object("Header").nullable(),
                identifier("StreamRef_", 38).nullable(),
            ],
        ),
        table(
            "PatchPackage",
            vec![
                string("PatchId", 38).primary_key().category(Category::Guid),
                number("Media_", 2).range(1, MAX_I2).key("Media", 1),
            ],
        ),
        table(
            "ProgId",
            vec![
                string("ProgId", 255).primary_key().category(Category::Text),
                string("ProgId_Parent", 255)
                    .nullable()
                    .category(Category::Text)
                    .key("ProgId", 1),
                string("Class_", 38)
                    .nullable()
                    .category(Category::Guid)
                    .key("Class", 1),
                text("Description", 255).nullable(),
                foreign("Icon_", 72, "Icon", 1)
                    .nullable()
                    .modularize(Modularize::Icon),
                number("IconIndex", 2).nullable().range(-MAX_I2, MAX_I2),
            ],
        ),
        strong(
            "Property",
            StrongRowType::Property,
            vec![
                identifier("Property", 72).primary_key(),
                text("Value", 0),
            ],
        ),
        table(
            "PublishComponent",
            vec![
                string("ComponentId", 38).primary_key().category(Category::Guid),
                string("Qualifier", 255).primary_key().category(Category::Text),
                component("Component_").primary_key(),
                text("AppData", 255).nullable(),
                feature("Feature_"),
            ],
        ),
        table(
            "RadioButton",
            vec![
                identifier("Property", 72).primary_key(),
                number("Order", 2).primary_key().range(1, MAX_I2),
                formatted("Value", 64),
                coordinate("X"),
                coordinate("Y"),
                coordinate("Width"),
                coordinate("Height"),
                text("Text", 64).nullable(),
                text("Help", 50).nullable(),
            ],
        ),
        table(
            "RegLocator",
            vec![
                locator_key(),
                number("Root", 2).range(0, 3),
                string("Key", 255).category(Category::RegPath),
                formatted("Name", 255).nullable(),
                number("Type", 2).nullable().range(0, 18),
            ],
        ),
        table(
            "Registry",
            vec![
                identifier("Registry", 72).primary_key(),
                number("Root", 2).range(-1, 3),
                localized("Key", 255).category(Category::RegPath),
                localized("Name", 255)
                    .nullable()
                    .category(Category::Formatted),
                localized("Value", 0)
                    .nullable()
                    .category(Category::Formatted),
                component("Component_"),
            ],
        ),
        table(
            "RemoveFile",
            vec![
                identifier("FileKey", 72).primary_key(),
                component("Component_"),
                localized("FileName", 255)
                    .nullable()
                    .category(Category::WildCardFilename),
                identifier("DirProperty", 72),
                number("InstallMode", 2).possibilities("1;2;3"),
            ],
        ),
        table(
            "RemoveIniFile",
            vec![
                identifier("RemoveIniFile", 72).primary_key(),
                localized("FileName", 255).category(Category::Filename),
                identifier("DirProperty", 72).nullable(),
                localized("Section", 96).category(Category::Formatted),
                localized("Key", 128).category(Category::Formatted),
                localized("Value", 255)
                    .nullable()
                    .category(Category::Formatted),
                number("Action", 2).possibilities("2;4"),
                component("Component_"),
            ],
        ),
        table(
            "RemoveRegistry",
            vec![
                identifier("RemoveRegistry", 72).primary_key(),
                number("Root", 2).range(-1, 3),
                localized("Key", 255).category(Category::RegPath),
                localized("Name", 255)
                    .nullable()
                    .category(Category::Formatted),
                component("Component_"),
            ],
        ),
        table(
            "ReserveCost",
            vec![
                identifier("ReserveKey", 72).primary_key(),
                component("Component_"),
                identifier("ReserveFolder", 72).nullable(),
                number("ReserveLocal", 4).range(0, MAX_I4),
                number("ReserveSource", 4).range(0, MAX_I4),
            ],
        ),
        table(
            "SelfReg",
            vec![
                file("File_").primary_key(),
                number("Cost", 2).nullable().range(0, MAX_I2),
            ],
        ),
        table(
            "ServiceControl",
            vec![
                identifier("ServiceControl", 72).primary_key(),
                localized("Name", 255).category(Category::Formatted),
                number("Event", 2).range(0, 187),
                localized("Arguments", 255)
                    .nullable()
                    .category(Category::Formatted),
                number("Wait", 2).nullable().range(0, 1),
                component("Component_"),
            ],
        ),
        table(
            "ServiceInstall",
            vec![
                identifier("ServiceInstall", 72).primary_key(),
                formatted("Name", 255),
                localized("DisplayName", 255)
                    .nullable()
                    .category(Category::Formatted),
                number("ServiceType", 4).range(-MAX_I4, MAX_I4),
                number("StartType", 4).range(0, 4),
                number("ErrorControl", 4).range(-MAX_I4, MAX_I4),
                formatted("LoadOrderGroup", 255).nullable(),
                formatted("Dependencies", 255).nullable(),
                formatted("StartName", 255).nullable(),
                formatted("Password", 255).nullable(),
                formatted("Arguments", 255).nullable(),
                component("Component_"),
                localized("Description", 255)
                    .nullable()
                    .category(Category::Formatted),
            ],
        ),
        table(
            "SFPCatalog",
            vec![
                string("SFPCatalog", 255)
                    .primary_key()
                    .category(Category::Filename),
                object("Catalog"),
                formatted("Dependency", 0).nullable(),
            ],
        ),
        table(
            "Shortcut",
            vec![
                identifier("Shortcut", 72).primary_key(),
                directory("Directory_"),
                localized("Name", 128).category(Category::Filename),
                component("Component_"),
                string("Target", 72)
                    .category(Category::Shortcut)
                    .modularize(Modularize::Property),
                formatted("Arguments", 255).nullable(),
                text("Description", 255).nullable(),
                number("Hotkey", 2).nullable().range(0, MAX_I2),
                foreign("Icon_", 72, "Icon", 1)
                    .nullable()
                    .modularize(Modularize::Icon),
                number("IconIndex", 2).nullable().range(-MAX_I2, MAX_I2),
                number("ShowCmd", 2).nullable().possibilities("1;3;7"),
                identifier("WkDir", 72).nullable(),
                formatted("DisplayResourceDLL", 255).nullable(),
                number("DisplayResourceId", 4).nullable().range(0, MAX_I2),
                formatted("DescriptionResourceDLL", 255).nullable(),
                number("DescriptionResourceId", 4).nullable().range(0, MAX_I2),
            ],
        ),
        table(
            "Signature",
            vec![
                identifier("Signature", 72).primary_key(),
                string("FileName", 255).category(Category::Filename),
                string("MinVersion", 20).nullable().category(Category::Text),
                string("MaxVersion", 20).nullable().category(Category::Text),
                number("MinSize", 4).nullable().range(0, MAX_I4),
                number("MaxSize", 4).nullable().range(0, MAX_I4),
                number("MinDate", 4).nullable().range(0, MAX_I4),
                number("MaxDate", 4).nullable().range(0, MAX_I4),
                string("Languages", 255)
                    .nullable()
                    .category(Category::Language),
            ],
        ),
        table(
            "TextStyle",
            vec![
                identifier("TextStyle", 72).primary_key(),
                string("FaceName", 32).category(Category::Text),
                number("Size", 2).range(0, MAX_I2),
                number("Color", 4).nullable().range(0, 16_777_215),
                number("StyleBits", 2).nullable().range(0, 15),
            ],
        ),
        table(
            "TypeLib",
            vec![
                string("LibID", 38).primary_key().category(Category::Guid),
                number("Language", 2).primary_key().range(0, MAX_I2),
                component("Component_").primary_key(),
                number("Version", 4).nullable().range(0, 16_777_215),
                text("Description", 128).nullable(),
                directory("Directory_").nullable(),
                feature("Feature_"),
                number("Cost", 4).nullable().range(0, MAX_I4),
            ],
        ),
        table(
            "UIText",
            vec![
                identifier("Key", 72).primary_key(),
                text("Text", 255).nullable(),
            ],
        ),
        strong(
            "Upgrade",
            StrongRowType::Upgrade,
            vec![
                string("UpgradeCode", 38).primary_key().category(Category::Guid),
                string("VersionMin", 20)
                    .primary_key()
                    .nullable()
                    .category(Category::Text),
                string("VersionMax", 20)
                    .primary_key()
                    .nullable()
                    .category(Category::Text),
                string("Language", 255)
                    .primary_key()
                    .nullable()
                    .category(Category::Language),
                number("Attributes", 4).primary_key().range(0, MAX_I4),
                formatted("Remove", 255).nullable(),
                string("ActionProperty", 72).category(Category::UpperCase),
            ],
        ),
        table(
            "Verb",
            vec![
                string("Extension_", 255)
                    .primary_key()
                    .category(Category::Text)
                    .key("Extension", 1),
                string("Verb", 32).primary_key().category(Category::Text),
                number("Sequence", 2).nullable().range(0, MAX_I2),
                localized("Command", 255)
                    .nullable()
                    .category(Category::Formatted),
                localized("Argument", 255)
                    .nullable()
                    .category(Category::Formatted),
            ],
        ),
        // merge modules
        table(
            "ModuleSignature",
            vec![
                identifier("ModuleID", 72).primary_key(),
                number("Language", 2).primary_key().range(0, MAX_I2),
                string("Version", 32).category(Category::Version),
            ],
        ),
        table(
            "ModuleComponents",
            vec![
                component("Component").primary_key(),
                foreign("ModuleID", 72, "ModuleSignature", 1).primary_key(),
                number("Language", 2)
                    .primary_key()
                    .range(0, MAX_I2)
                    .key("ModuleSignature", 2),
            ],
        ),
        table(
            "ModuleDependency",
            vec![
                foreign("ModuleID", 72, "ModuleSignature", 1).primary_key(),
                number("ModuleLanguage", 2)
                    .primary_key()
                    .range(0, MAX_I2)
                    .key("ModuleSignature", 2),
                identifier("RequiredID", 72).primary_key(),
                number("RequiredLanguage", 2).primary_key().range(0, MAX_I2),
                string("RequiredVersion", 32)
                    .nullable()
                    .category(Category::Version),
            ],
        ),
        table(
            "ModuleExclusion",
            vec![
                foreign("ModuleID", 72, "ModuleSignature", 1).primary_key(),
                number("ModuleLanguage", 2)
                    .primary_key()
                    .range(0, MAX_I2)
                    .key("ModuleSignature", 2),
                identifier("ExcludedID", 72).primary_key(),
                number("ExcludedLanguage", 2)
                    .primary_key()
                    .range(-MAX_I2, MAX_I2),
                string("ExcludedMinVersion", 32)
                    .nullable()
                    .category(Category::Version),
                string("ExcludedMaxVersion", 32)
                    .nullable()
                    .category(Category::Version),
            ],
        ),
        table(
            "ModuleIgnoreTable",
            vec![identifier("Table", 72).primary_key()],
        ),
        table(
            "ModuleSubstitution",
            vec![
                identifier("Table", 72).primary_key(),
                string("Row", 0).primary_key().category(Category::Text),
                identifier("Column", 72).primary_key(),
                localized("Value", 0)
                    .nullable()
                    .category(Category::Formatted),
            ],
        ),
        table(
            "ModuleConfiguration",
            vec![
                identifier("Name", 72).primary_key(),
                number("Format", 2).range(0, 3),
                string("Type", 72).nullable().category(Category::Text),
                text("ContextData", 0).nullable(),
                text("DefaultValue", 0).nullable(),
                number("Attributes", 4).nullable().range(0, 3),
                text("DisplayName", 72).nullable(),
                text("Description", 0).nullable(),
                string("HelpLocation", 0).nullable().category(Category::Text),
                string("HelpKeyword", 0).nullable().category(Category::Text),
            ],
        ),
        module_sequence("ModuleAdminExecuteSequence"),
        module_sequence("ModuleAdminUISequence"),
        module_sequence("ModuleAdvtExecuteSequence"),
        module_sequence("ModuleInstallExecuteSequence"),
        module_sequence("ModuleInstallUISequence"),
        // patch creation
        table(
            "ImageFamilies",
            vec![
                string("Family", 8).primary_key().category(Category::Identifier),
                string("MediaSrcPropName", 72)
                    .nullable()
                    .category(Category::Identifier),
                number("MediaDiskId", 2).nullable().range(1, MAX_I2),
                number("FileSequenceStart", 4).nullable().range(1, MAX_I4),
                string("DiskPrompt", 128).nullable().category(Category::Text),
                string("VolumeLabel", 32).nullable().category(Category::Text),
            ],
        ),
        table(
            "UpgradedImages",
            vec![
                string("Upgraded", 13).primary_key().category(Category::Text),
                string("MsiPath", 255).category(Category::Text),
                string("PatchMsiPath", 255).nullable().category(Category::Text),
                string("SymbolPaths", 255).nullable().category(Category::Text),
                string("Family", 8)
                    .category(Category::Text)
                    .key("ImageFamilies", 1),
            ],
        ),
        table(
            "TargetImages",
            vec![
                string("Target", 13).primary_key().category(Category::Text),
                string("MsiPath", 255).category(Category::Text),
                string("SymbolPaths", 255).nullable().category(Category::Text),
                string("Upgraded", 13)
                    .category(Category::Text)
                    .key("UpgradedImages", 1),
                number("Order", 2).range(0, MAX_I2),
                string("ProductValidateFlags", 16)
                    .nullable()
                    .category(Category::Text),
                number("IgnoreMissingSrcFiles", 2).range(0, 1),
            ],
        ),
        table(
            "Properties",
            vec![
                string("Name", 72).primary_key().category(Category::Text),
                text("Value", 0).nullable(),
            ],
        ),
        table(
            "PatchSequence",
            vec![
                string("PatchFamily", 72)
                    .primary_key()
                    .category(Category::Identifier),
                string("Target", 72)
                    .primary_key()
                    .nullable()
                    .category(Category::Text),
                string("Sequence", 72)
                    .nullable()
                    .category(Category::Version),
                number("Supersede", 2).nullable().range(0, 1),
            ],
        ),
        table(
            "ExternalFiles",
            vec![
                string("Family", 8)
                    .primary_key()
                    .category(Category::Identifier)
                    .key("ImageFamilies", 1),
                string("FTK", 128).primary_key().category(Category::Text),
                string("FilePath", 255).primary_key().category(Category::Text),
                string("SymbolPaths", 255).nullable().category(Category::Text),
                string("IgnoreOffsets", 255).nullable().category(Category::Text),
                string("IgnoreLengths", 255).nullable().category(Category::Text),
                string("RetainOffsets", 255).nullable().category(Category::Text),
                number("Order", 2).nullable().range(0, MAX_I2),
            ],
        ),
        table(
            "FamilyFileRanges",
            vec![
                string("Family", 8)
                    .primary_key()
                    .category(Category::Identifier)
                    .key("ImageFamilies", 1),
                string("FTK", 128).primary_key().category(Category::Text),
                string("RetainOffsets", 128).nullable().category(Category::Text),
                string("RetainLengths", 128).nullable().category(Category::Text),
            ],
        ),
        table(
            "TargetFiles_OptionalData",
            vec![
                string("Target", 13)
                    .primary_key()
                    .category(Category::Text)
                    .key("TargetImages", 1),
                string("FTK", 255).primary_key().category(Category::Text),
                string("SymbolPaths", 255).nullable().category(Category::Text),
                string("IgnoreOffsets", 255).nullable().category(Category::Text),
                string("IgnoreLengths", 255).nullable().category(Category::Text),
                string("RetainOffsets", 255).nullable().category(Category::Text),
            ],
        ),
        table(
            "UpgradedFiles_OptionalData",
            vec![
                string("Upgraded", 13)
                    .primary_key()
                    .category(Category::Text)
                    .key("UpgradedImages", 1),
                string("FTK", 255).primary_key().category(Category::Text),
                string("SymbolPaths", 255).nullable().category(Category::Text),
                number("AllowIgnoreOnPatchError", 2).nullable().range(0, 1),
                number("IncludeWholeFile", 2).nullable().range(0, 1),
            ],
        ),
        table(
            "UpgradedFilesToIgnore",
            vec![
                string("Upgraded", 13)
                    .primary_key()
                    .category(Category::Text)
                    .key("UpgradedImages", 1),
                string("FTK", 255).primary_key().category(Category::Text),
            ],
        ),
        table(
            "MsiSFCBypass",
            vec![file("File_").primary_key()],
        ),
        sequence("AdvtUISequence"),
        // system tables
        build(
            "_Streams",
            None,
            true,
            vec![
                string("Name", 62).primary_key().category(Category::Text),
                object("Data").nullable(),
            ],
        ),
        build(
            "_SummaryInformation",
            None,
            true,
            vec![
                number("PropertyId", 2).primary_key().range(0, MAX_I2),
                localized("Value", 255).nullable().category(Category::Text),
            ],
        ),
        build(
            "_TransformView",
            None,
            true,
            vec![
                string("Table", 0).primary_key().category(Category::Text),
                string("Column", 0).primary_key().category(Category::Text),
                string("Row", 0)
                    .primary_key()
                    .nullable()
                    .category(Category::Text),
                string("Data", 0).nullable().category(Category::Text),
                string("Current", 0).nullable().category(Category::Text),
            ],
        ),
        table(
            "_Validation",
            vec![
                string("Table", 32).primary_key().category(Category::Identifier),
                string("Column", 32).primary_key().category(Category::Identifier),
                string("Nullable", 4).possibilities("Y;N"),
                number("MinValue", 4).nullable().range(-MAX_I4, MAX_I4),
                number("MaxValue", 4).nullable().range(-MAX_I4, MAX_I4),
                string("KeyTable", 255)
                    .nullable()
                    .category(Category::Identifier),
                number("KeyColumn", 2).nullable().range(1, 32),
                string("Category", 32).nullable().possibilities(
                    "Text;Formatted;Template;Condition;Guid;Path;Version;Language;Identifier;\
                     Binary;UpperCase;LowerCase;Filename;Paths;AnyPath;WildCardFilename;RegPath;\
                     CustomSource;Property;Cabinet;Shortcut;FormattedSDDLText;Integer;\
                     DoubleInteger;TimeDate;DefaultDir",
                ),
                string("Set", 255).nullable().category(Category::Text),
                string("Description", 255).nullable().category(Category::Text),
            ],
        ),
    ]
}
