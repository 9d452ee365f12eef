//! End-to-end tests for binary workbooks (write -> read -> verify)

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sheetbridge_core::{CellType, CellValue};
use sheetbridge_xlsx::{GridCell, SheetGrid, WorkbookReadOptions, XlsxReader, XlsxWriter};

fn cell(value: CellValue) -> GridCell {
    GridCell {
        value,
        formula: None,
    }
}

fn inventory() -> SheetGrid {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    SheetGrid {
        name: "Parts & Stock".into(),
        rows: vec![
            vec![cell(CellValue::string("name")), cell(CellValue::string("qty"))],
            vec![cell(CellValue::string("bolt")), cell(CellValue::Number(12.5))],
            vec![cell(CellValue::date(date)), cell(CellValue::Boolean(true))],
            vec![
                cell(CellValue::Error("#N/A".into())),
                GridCell {
                    value: CellValue::Number(3.0),
                    formula: Some("=1+2".into()),
                },
            ],
        ],
    }
}

#[test]
fn test_values_survive_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.xlsx");
    XlsxWriter::write_file(&[inventory()], &path).unwrap();

    let outcome = XlsxReader::read_file(&path, &WorkbookReadOptions::default()).unwrap();
    let workbook = outcome.workbook;

    assert_eq!(workbook.sheet_names(), vec!["Parts & Stock"]);
    assert_eq!(workbook.active_sheet(), Some("Parts & Stock"));

    let sheet = workbook.first_sheet().unwrap();
    assert_eq!(sheet.range_address(), "A1:B4");
    assert_eq!(sheet.cell(0, 0).unwrap().value, CellValue::string("name"));
    assert_eq!(sheet.cell(1, 1).unwrap().value, CellValue::Number(12.5));
    assert_eq!(
        sheet.cell(2, 0).unwrap().value,
        CellValue::date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    );
    assert_eq!(sheet.cell(2, 1).unwrap().value, CellValue::Boolean(true));
    assert_eq!(sheet.cell(3, 0).unwrap().cell_type(), CellType::Error);
    assert_eq!(sheet.cell(3, 1).unwrap().value, CellValue::Number(3.0));
    assert_eq!(sheet.cell(3, 1).unwrap().formula.as_deref(), Some("=1+2"));

    let meta = workbook.metadata().unwrap();
    assert_eq!(meta.sheet_names, vec!["Parts & Stock".to_string()]);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_empty_sheet_read_as_single_cell() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two.xlsx");
    let blank = SheetGrid {
        name: "Blank".into(),
        rows: Vec::new(),
    };
    XlsxWriter::write_file(&[inventory(), blank], &path).unwrap();

    let outcome = XlsxReader::read_file(&path, &WorkbookReadOptions::default()).unwrap();
    let sheet = outcome.workbook.sheet("Blank").unwrap();

    assert_eq!(sheet.range_address(), "A1:A1");
    assert_eq!(sheet.row_count(), 1);
    assert_eq!(outcome.warnings, vec!["Sheet 'Blank' is empty".to_string()]);
}

#[test]
fn test_first_sheet_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two.xlsx");
    let mut second = inventory();
    second.name = "Second".into();
    XlsxWriter::write_file(&[inventory(), second], &path).unwrap();

    let options = WorkbookReadOptions {
        read_all_sheets: false,
        preserve_formulas: false,
        ..Default::default()
    };
    let outcome = XlsxReader::read_file(&path, &options).unwrap();

    assert_eq!(outcome.workbook.sheet_count(), 1);
    let sheet = outcome.workbook.first_sheet().unwrap();
    assert_eq!(sheet.cell(3, 1).unwrap().formula, None);
}

#[test]
fn test_not_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.xlsx");
    std::fs::write(&path, "not a zip").unwrap();

    assert!(XlsxReader::read_file(&path, &WorkbookReadOptions::default()).is_err());
}
