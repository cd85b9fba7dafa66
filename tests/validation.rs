//! Integration tests for table data validation over whole outputs.

use msidata::{
    validation::{IssueKind, ValidationConfig, Validator},
    OutputType, WindowsInstallerData,
};

fn product() -> WindowsInstallerData {
    let mut data = WindowsInstallerData::new(OutputType::Product);

    let directories = data.ensure_table("Directory").unwrap();
    for (id, parent, default_dir) in [
        ("TARGETDIR", None, "SourceDir"),
        ("ProgramFilesFolder", Some("TARGETDIR"), "."),
        ("INSTALLFOLDER", Some("ProgramFilesFolder"), "EXAMPLE|Example App"),
    ] {
        let row = directories.create_row(None);
        row.set(0, id).unwrap();
        if let Some(parent) = parent {
            row.set(1, parent).unwrap();
        }
        row.set(2, default_dir).unwrap();
    }

    let row = data.ensure_table("Component").unwrap().create_row(None);
    row.set(0, "MainComponent").unwrap();
    row.set(1, "{6F1C6A8B-8E0E-4D43-9D1B-2C8A0F6E1A10}").unwrap();
    row.set(2, "INSTALLFOLDER").unwrap();
    row.set(3, 0).unwrap();
    row.set(5, "MainExe").unwrap();

    let row = data.ensure_table("File").unwrap().create_row(None);
    row.set(0, "MainExe").unwrap();
    row.set(1, "MainComponent").unwrap();
    row.set(2, "EXAMPLE.EXE|example.exe").unwrap();
    row.set(3, 4096).unwrap();
    row.set(4, "1.0.0.0").unwrap();
    row.set(5, "1033").unwrap();
    row.set(7, 1).unwrap();

    let row = data.ensure_table("Feature").unwrap().create_row(None);
    row.set(0, "Main").unwrap();
    row.set(5, 1).unwrap();
    row.set(7, 0).unwrap();

    let row = data.ensure_table("FeatureComponents").unwrap().create_row(None);
    row.set(0, "Main").unwrap();
    row.set(1, "MainComponent").unwrap();

    let row = data.ensure_table("Property").unwrap().create_row(None);
    row.set(0, "ProductName").unwrap();
    row.set(1, "Example").unwrap();

    data
}

#[test]
fn valid_product_has_no_issues() {
    let report = Validator::default().validate(product().tables());
    assert!(report.is_valid(), "{:#?}", report.issues());
    assert!(!report.is_truncated());
}

#[test]
fn broken_product_reports_each_rule() {
    let mut data = product();

    let component = &mut data.tables_mut().get_mut("Component").unwrap().rows_mut()[0];
    component.set(1, "{6f1c6a8b-8e0e-4d43-9d1b-2c8a0f6e1a10}").unwrap();
    component.set(2, "MissingFolder").unwrap();

    let file = &mut data.tables_mut().get_mut("File").unwrap().rows_mut()[0];
    file.set(4, "1.0.0.0.0").unwrap();

    let feature = &mut data.tables_mut().get_mut("Feature").unwrap().rows_mut()[0];
    feature.set(7, 3).unwrap();

    let property = data.ensure_table("Property").unwrap().create_row(None);
    property.set(0, "ProductName").unwrap();
    property.set(1, "Duplicate").unwrap();

    let report = Validator::new(ValidationConfig::strict()).validate(data.tables());
    assert!(!report.is_valid());

    let category: Vec<_> = report
        .of_kind(IssueKind::Category)
        .map(|issue| (issue.table(), issue.column()))
        .collect();
    assert!(category.contains(&("Component", Some("ComponentId"))));
    assert!(category.contains(&("File", Some("Version"))));

    let foreign: Vec<_> = report
        .of_kind(IssueKind::ForeignKey)
        .map(|issue| (issue.table(), issue.column(), issue.row_key()))
        .collect();
    assert!(foreign.contains(&("Component", Some("Directory_"), "MainComponent")));
    assert!(foreign.contains(&("File", Some("Version"), "MainExe")));

    let set: Vec<_> = report.of_kind(IssueKind::Set).collect();
    assert_eq!(set.len(), 1);
    assert_eq!(set[0].table(), "Feature");

    let duplicates: Vec<_> = report.of_kind(IssueKind::DuplicateKey).collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].row_key(), "ProductName");
}

#[test]
fn minimal_config_ignores_content_rules() {
    let mut data = product();
    let component = &mut data.tables_mut().get_mut("Component").unwrap().rows_mut()[0];
    component.set(2, "MissingFolder").unwrap();
    component.set(1, "not a guid").unwrap();

    let report = Validator::new(ValidationConfig::minimal()).validate(data.tables());
    assert!(report.is_valid(), "{:#?}", report.issues());

    let report = Validator::new(ValidationConfig::disabled()).validate(data.tables());
    assert!(report.is_valid());
}

#[test]
fn issue_limit_truncates_the_report() {
    let mut data = product();
    let property = data.ensure_table("Property").unwrap();
    for index in 0..10 {
        let row = property.create_row(None);
        row.set(0, format!("{index}invalid")).unwrap();
        row.set(1, "x").unwrap();
    }

    let config = ValidationConfig {
        max_issues: 3,
        ..ValidationConfig::default()
    };
    let report = Validator::new(config).validate(data.tables());
    assert_eq!(report.issues().len(), 3);
    assert!(report.is_truncated());
}
