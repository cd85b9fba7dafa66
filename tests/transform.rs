//! Integration tests for transform computation.
//!
//! Two product documents are diffed and the resulting transform is persisted as a
//! `Transform` output and read back.

use std::{collections::HashSet, sync::Arc};

use msidata::{
    tables::RowNumberAllocator, transform::Differ, OutputType, Row, RowOperation, Table,
    TableOperation, WindowsInstallerData,
};

fn set_property(data: &mut WindowsInstallerData, name: &str, value: &str) {
    let row = data.ensure_table("Property").unwrap().create_row(None);
    row.set(0, name).unwrap();
    row.set(1, value).unwrap();
}

fn add_file(data: &mut WindowsInstallerData, id: &str, size: i32, sequence: i32) {
    let row = data.ensure_table("File").unwrap().create_row(None);
    row.set(0, id).unwrap();
    row.set(1, "MainComponent").unwrap();
    row.set(2, format!("{}.dll", id.to_lowercase())).unwrap();
    row.set(3, size).unwrap();
    row.set(7, sequence).unwrap();
}

fn target() -> WindowsInstallerData {
    let mut data = WindowsInstallerData::new(OutputType::Product);
    set_property(&mut data, "ProductVersion", "1.0.0");
    set_property(&mut data, "Manufacturer", "Contoso");
    add_file(&mut data, "Core", 1000, 1);
    add_file(&mut data, "Legacy", 500, 2);

    let row = data.ensure_table("Binary").unwrap().create_row(None);
    row.set(0, "Logo").unwrap();
    row.set(1, "logo.bmp").unwrap();
    data
}

fn updated() -> WindowsInstallerData {
    let mut data = WindowsInstallerData::new(OutputType::Product);
    set_property(&mut data, "ProductVersion", "1.1.0");
    set_property(&mut data, "Manufacturer", "Contoso");
    add_file(&mut data, "Core", 1200, 1);
    add_file(&mut data, "Plugin", 300, 3);

    let row = data.ensure_table("Media").unwrap().create_row(None);
    row.set(0, 1).unwrap();
    row.set(1, 3).unwrap();
    data
}

fn row<'a>(table: &'a Table, key: &str) -> &'a Row {
    table
        .iter()
        .find(|row| row.get_key() == key)
        .unwrap_or_else(|| panic!("no row {key} in {}", table.name()))
}

#[test]
fn diff_products() {
    let transform = Differ::new()
        .diff(target().tables(), updated().tables())
        .unwrap();

    let names: Vec<_> = transform.iter().map(Table::name).collect();
    assert_eq!(names, ["Binary", "File", "Media", "Property"]);

    let binary = transform.get("Binary").unwrap();
    assert_eq!(binary.operation(), TableOperation::Drop);
    assert!(binary.is_empty());

    let media = transform.get("Media").unwrap();
    assert_eq!(media.operation(), TableOperation::Add);
    assert_eq!(row(media, "1").operation(), RowOperation::Add);

    let file = transform.get("File").unwrap();
    assert_eq!(file.operation(), TableOperation::None);
    assert_eq!(file.len(), 3);
    assert_eq!(row(file, "Plugin").operation(), RowOperation::Add);
    assert_eq!(row(file, "Legacy").operation(), RowOperation::Delete);

    let core = row(file, "Core");
    assert_eq!(core.operation(), RowOperation::Modify);
    let size = core.field_by_name("FileSize").unwrap();
    assert!(size.is_modified());
    assert_eq!(size.previous_data(), Some("1000"));
    assert_eq!(size.as_integer().unwrap(), 1200);
    assert!(!core.field_by_name("FileName").unwrap().is_modified());

    let property = transform.get("Property").unwrap();
    assert_eq!(property.len(), 1);
    let version = row(property, "ProductVersion");
    assert_eq!(version.fields()[1].previous_data(), Some("1.0.0"));
}

#[test]
fn transform_roundtrips_as_output() {
    let mut transform = WindowsInstallerData::new(OutputType::Transform);
    *transform.tables_mut() = Differ::new()
        .diff(target().tables(), updated().tables())
        .unwrap();

    let xml = transform.to_xml().unwrap();
    let loaded = WindowsInstallerData::from_xml(&xml).unwrap();
    assert_eq!(loaded.output_type(), OutputType::Transform);

    for original in transform.tables() {
        let read = loaded.tables().get(original.name()).unwrap();
        assert_eq!(read.operation(), original.operation());
        assert_eq!(read.len(), original.len());

        for (before, after) in original.iter().zip(read) {
            assert!(before.is_identical(after));
            assert_eq!(before.operation(), after.operation());
            for (a, b) in before.fields().iter().zip(after.fields()) {
                assert_eq!(a.is_modified(), b.is_modified());
                assert_eq!(a.previous_data(), b.previous_data());
            }
        }
    }
}

#[test]
fn identical_inputs_produce_an_empty_transform() {
    let transform = Differ::new()
        .diff(target().tables(), target().tables())
        .unwrap();
    assert!(transform.is_empty());
}

#[test]
fn isolated_allocator_numbers_transform_rows() {
    let allocator = Arc::new(RowNumberAllocator::new());
    let transform = Differ::with_allocator(allocator.clone())
        .diff(target().tables(), updated().tables())
        .unwrap();

    let numbers: HashSet<_> = transform
        .iter()
        .flat_map(|table| table.iter().map(Row::number))
        .collect();
    let rows: usize = transform.iter().map(Table::len).sum();

    assert_eq!(numbers.len(), rows);
    assert!(numbers
        .iter()
        .all(|number| (RowNumberAllocator::FIRST..allocator.peek()).contains(number)));
}
