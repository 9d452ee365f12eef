//! Output format tests over ingested workbooks

use pretty_assertions::assert_eq;
use sheetbridge::prelude::*;
use sheetbridge::render::{self, parse_yaml};

fn ingest(body: &str, name: &str) -> Workbook {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    Pipeline::default().read(&path).unwrap()
}

#[test]
fn test_markdown_shows_twenty_of_twenty_five_rows() {
    let body: Vec<String> = (1..=25).map(|i| format!("item{},{}", i, i * 10)).collect();
    let workbook = ingest(&body.join("\n"), "long.csv");

    let md = render::render(&workbook, OutputFormat::Markdown, &RenderOptions::default()).unwrap();
    let data_rows = md.lines().filter(|l| l.starts_with("| item")).count();

    assert_eq!(data_rows, 20);
    assert!(md.contains("25 total rows"));
    assert!(md.contains("- **Total Rows**: 25"));
}

#[test]
fn test_csv_string_roundtrip() {
    let original = "\"plain\",\"with, comma\"\n\"say \"\"hi\"\"\",\"x\"";
    let workbook = ingest(original, "strings.csv");

    let text = render::render(&workbook, OutputFormat::Csv, &RenderOptions::default()).unwrap();
    assert_eq!(text, original);

    let again = ingest(&text, "again.csv");
    assert_eq!(again, workbook);
}

#[test]
fn test_tsv_output_stringifies_values() {
    let workbook = ingest("1.5,false\n2024-01-01,", "mixed.csv");
    let text = render::render(&workbook, OutputFormat::Tsv, &RenderOptions::default()).unwrap();

    assert_eq!(text, "\"1.5\"\t\"false\"\n\"2024-01-01T00:00:00\"\t\"\"");
}

#[test]
fn test_yaml_roundtrip() {
    let workbook = ingest("1,true\n2024-01-01,hello", "scenario.csv");
    let yaml = render::render(&workbook, OutputFormat::Yaml, &RenderOptions::default()).unwrap();

    assert_eq!(parse_yaml(&yaml).unwrap(), workbook);
}

#[test]
fn test_unknown_format_name() {
    let err = "docx".parse::<OutputFormat>().unwrap_err();
    assert_eq!(err.to_string(), "Unsupported output format: docx");
}

#[test]
fn test_missing_sheet_is_no_sheet_data() {
    let workbook = ingest("a", "one.csv");
    let result = render::render(&workbook, OutputFormat::Csv, &RenderOptions::sheet("Other"));
    assert!(matches!(result, Err(Error::NoSheetData(_))));
}
