//! Integration tests for the built-in catalog.

use std::str::FromStr;

use msidata::{
    catalog::{self, Platform, SequenceTable},
    schema::StrongRowType,
    xml::{XmlReader, XmlWriter},
    Error, TableDefinitionCollection,
};

#[test]
fn catalog_covers_the_core_tables() {
    for name in [
        "ActionText",
        "AdminExecuteSequence",
        "Binary",
        "Component",
        "Control",
        "CustomAction",
        "Dialog",
        "Directory",
        "Feature",
        "FeatureComponents",
        "File",
        "InstallExecuteSequence",
        "Media",
        "ModuleSignature",
        "MsiFileHash",
        "Property",
        "Registry",
        "Shortcut",
        "Upgrade",
        "_Validation",
    ] {
        assert!(catalog::table_definition(name).is_some(), "{name}");
    }

    match catalog::table_definitions().get("Nope") {
        Err(Error::MissingTableDefinition(name)) => assert_eq!(name, "Nope"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(catalog::table_definitions().try_get("Nope").is_none());
}

#[test]
fn strong_row_types_are_tagged() {
    let tagged: Vec<_> = catalog::table_definitions()
        .iter()
        .filter_map(|definition| definition.strong_row_type().map(|t| (definition.name(), t)))
        .collect();

    assert_eq!(
        tagged,
        [
            ("Component", StrongRowType::Component),
            ("Control", StrongRowType::Control),
            ("File", StrongRowType::File),
            ("Media", StrongRowType::Media),
            ("Property", StrongRowType::Property),
            ("Upgrade", StrongRowType::Upgrade),
        ]
    );
}

#[test]
fn catalog_is_a_starting_point_for_custom_collections() {
    let mut definitions = TableDefinitionCollection::from_definitions(
        ["Property", "File"]
            .into_iter()
            .map(|name| catalog::table_definition(name).unwrap().clone()),
    )
    .unwrap();
    assert_eq!(definitions.len(), 2);

    assert!(matches!(
        definitions.add(catalog::table_definition("File").unwrap().clone()),
        Err(Error::DuplicateTableDefinition(_))
    ));

    let mut writer = XmlWriter::new(Vec::new());
    definitions.write(&mut writer).unwrap();
    let xml = String::from_utf8(writer.into_inner()).unwrap();
    let loaded = TableDefinitionCollection::load(&mut XmlReader::from_xml(&xml)).unwrap();
    assert_eq!(loaded, definitions);

    assert!(definitions.remove("File").is_some());
    assert!(!definitions.contains("File"));
}

#[test]
fn standard_actions() {
    let install_files = catalog::standard_action("InstallExecuteSequence/InstallFiles").unwrap();
    assert_eq!(install_files.sequence_table(), SequenceTable::InstallExecuteSequence);
    assert_eq!(install_files.action(), "InstallFiles");
    assert_eq!(install_files.sequence(), 4000);
    assert_eq!(install_files.id(), "InstallExecuteSequence/InstallFiles");

    let start_services =
        catalog::standard_action_in(SequenceTable::InstallExecuteSequence, "StartServices")
            .unwrap();
    assert_eq!(start_services.condition(), Some("VersionNT"));

    assert!(catalog::standard_action("InstallExecuteSequence/MyCustomAction").is_none());
    assert!(catalog::standard_action("NoSequence/InstallFiles").is_none());
    assert!(catalog::standard_action("InstallFiles").is_none());

    assert!(catalog::is_standard_action("CostFinalize"));
    assert!(!catalog::is_standard_action("costfinalize"));

    assert_eq!(
        SequenceTable::from_str("AdvtExecuteSequence").unwrap(),
        SequenceTable::AdvtExecuteSequence
    );
}

#[test]
fn platform_specific_directories() {
    assert_eq!(
        catalog::platform_specific_directory_id("ProgramFiles6432Folder", Platform::X86),
        "ProgramFilesFolder"
    );
    for platform in [Platform::X64, Platform::Arm64] {
        assert_eq!(
            catalog::platform_specific_directory_id("ProgramFiles6432Folder", platform),
            "ProgramFiles64Folder"
        );
        assert_eq!(
            catalog::platform_specific_directory_id("CommonFiles6432Folder", platform),
            "CommonFiles64Folder"
        );
        assert_eq!(
            catalog::platform_specific_directory_id("System6432Folder", platform),
            "System64Folder"
        );
    }
    assert_eq!(
        catalog::platform_specific_directory_id("TARGETDIR", Platform::X64),
        "TARGETDIR"
    );
    assert_eq!(
        catalog::platform_specific_directory_id("INSTALLFOLDER", Platform::Arm64),
        "INSTALLFOLDER"
    );

    assert!(catalog::is_standard_directory("ProgramFiles6432Folder"));
    assert!(!catalog::is_standard_directory("INSTALLFOLDER"));
    assert_eq!(Platform::from_str("ARM64").unwrap(), Platform::Arm64);
}

#[test]
fn standard_properties() {
    assert!(catalog::is_standard_property("ProductCode"));
    assert!(catalog::is_standard_property("REINSTALLMODE"));
    assert!(!catalog::is_standard_property("MY_PROPERTY"));
    assert!(catalog::standard_properties()
        .iter()
        .all(|name| catalog::is_standard_property(name)));
}
