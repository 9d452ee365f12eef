//! Markdown summary rendering
//!
//! Display-oriented and lossy: long sheets are cut to their first rows and
//! long values are truncated.

use std::fmt::Write;

use chrono::Utc;
use sheetbridge_core::{Cell, Sheet, Workbook};

use crate::error::{Error, Result};

/// Data rows shown per sheet
pub const MAX_PREVIEW_ROWS: usize = 20;

/// Characters kept per value before `...` is appended
pub const MAX_VALUE_CHARS: usize = 50;

/// Render a markdown summary of every sheet, or only `sheet_name`
pub fn render_markdown(workbook: &Workbook, sheet_name: Option<&str>) -> Result<String> {
    let sheets: Vec<&Sheet> = match sheet_name {
        Some(name) => vec![workbook
            .sheet(name)
            .ok_or_else(|| Error::NoSheetData(name.to_string()))?],
        None => workbook.sheets().collect(),
    };

    let mut out = String::new();
    write_document(&mut out, workbook, &sheets).map_err(|e| Error::Unknown(e.to_string()))?;
    Ok(out)
}

fn write_document(out: &mut String, workbook: &Workbook, sheets: &[&Sheet]) -> std::fmt::Result {
    writeln!(out, "# Spreadsheet Data")?;
    writeln!(out)?;
    writeln!(
        out,
        "*Generated on {}*",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out)?;

    writeln!(out, "## Metadata")?;
    writeln!(out)?;
    writeln!(out, "- **Sheets**: {}", workbook.sheet_count())?;
    writeln!(out, "- **Total Rows**: {}", workbook.total_rows())?;
    writeln!(out, "- **Max Columns**: {}", workbook.max_columns())?;
    if let Some(meta) = workbook.metadata() {
        if let Some(author) = &meta.author {
            writeln!(out, "- **Author**: {}", author)?;
        }
        if let Some(created) = &meta.created {
            writeln!(out, "- **Created**: {}", created)?;
        }
        if let Some(modified) = &meta.modified {
            writeln!(out, "- **Modified**: {}", modified)?;
        }
    }
    writeln!(out)?;

    let with_headings = sheets.len() > 1;
    for sheet in sheets {
        if with_headings {
            writeln!(out, "## Sheet: {}", sheet.name())?;
            writeln!(out)?;
        }
        write_sheet(out, sheet)?;
        writeln!(out)?;
    }

    writeln!(out, "---")?;
    writeln!(out)?;
    write!(out, "*Generated by sheetbridge*")
}

fn write_sheet(out: &mut String, sheet: &Sheet) -> std::fmt::Result {
    if sheet.row_count() == 0 {
        return writeln!(out, "*No data in this sheet*");
    }

    let shown = &sheet.rows()[..sheet.row_count().min(MAX_PREVIEW_ROWS)];
    let width = shown.iter().map(Vec::len).max().unwrap_or(0);

    let header: Vec<String> = (1..=width).map(|i| format!("Column {}", i)).collect();
    writeln!(out, "| {} |", header.join(" | "))?;
    writeln!(out, "|{}", " --- |".repeat(width))?;

    for row in shown {
        let cells: Vec<String> = (0..width)
            .map(|i| row.get(i).map(display_value).unwrap_or_default())
            .collect();
        writeln!(out, "| {} |", cells.join(" | "))?;
    }

    if sheet.row_count() > MAX_PREVIEW_ROWS {
        writeln!(out)?;
        writeln!(
            out,
            "*Showing first {} rows of {} total rows*",
            MAX_PREVIEW_ROWS,
            sheet.row_count()
        )?;
    }
    Ok(())
}

/// Single-line, pipe-safe, truncated cell text
fn display_value(cell: &Cell) -> String {
    let text = cell.value.to_string().replace("\r\n", " ").replace(['\n', '\r'], " ");

    let text = if text.chars().count() > MAX_VALUE_CHARS {
        let mut cut: String = text.chars().take(MAX_VALUE_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        text
    };

    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetbridge_core::WorkbookMetadata;

    fn numbered_sheet(name: &str, rows: usize) -> Sheet {
        Sheet::from_rows(
            name,
            (0..rows)
                .map(|i| vec![Cell::new(format!("row{}", i)), Cell::new(i as f64)])
                .collect(),
        )
    }

    fn workbook(sheets: Vec<Sheet>) -> Workbook {
        let mut wb = Workbook::new();
        for sheet in sheets {
            wb.add_sheet(sheet).unwrap();
        }
        wb
    }

    #[test]
    fn test_document_frame() {
        let wb = workbook(vec![numbered_sheet("Only", 2)]);
        let md = render_markdown(&wb, None).unwrap();

        assert!(md.starts_with("# Spreadsheet Data\n\n*Generated on "));
        assert!(md.contains("- **Sheets**: 1\n- **Total Rows**: 2\n- **Max Columns**: 2\n"));
        assert!(md.contains("| Column 1 | Column 2 |\n| --- | --- |\n| row0 | 0 |\n| row1 | 1 |\n"));
        assert!(!md.contains("## Sheet:"));
        assert!(md.ends_with("*Generated by sheetbridge*"));
    }

    #[test]
    fn test_truncates_long_sheets() {
        let wb = workbook(vec![numbered_sheet("Long", 25)]);
        let md = render_markdown(&wb, None).unwrap();

        assert!(md.contains("| row19 | 19 |"));
        assert!(!md.contains("| row20 |"));
        assert!(md.contains("*Showing first 20 rows of 25 total rows*"));
    }

    #[test]
    fn test_multiple_sheets_get_headings() {
        let wb = workbook(vec![numbered_sheet("A", 1), Sheet::from_rows("B", Vec::new())]);
        let md = render_markdown(&wb, None).unwrap();

        assert!(md.contains("## Sheet: A\n"));
        assert!(md.contains("## Sheet: B\n\n*No data in this sheet*\n"));
    }

    #[test]
    fn test_named_sheet() {
        let wb = workbook(vec![numbered_sheet("A", 1), numbered_sheet("B", 3)]);
        let md = render_markdown(&wb, Some("B")).unwrap();

        assert!(!md.contains("## Sheet:"));
        assert!(md.contains("| row2 | 2 |"));
        assert!(matches!(
            render_markdown(&wb, Some("C")),
            Err(Error::NoSheetData(_))
        ));
    }

    #[test]
    fn test_metadata_fields() {
        let mut wb = workbook(vec![numbered_sheet("A", 1)]);
        wb.set_metadata(Some(WorkbookMetadata {
            author: Some("Dana".into()),
            modified: Some("2024-02-01".into()),
            ..Default::default()
        }));
        let md = render_markdown(&wb, None).unwrap();

        assert!(md.contains("- **Author**: Dana\n"));
        assert!(md.contains("- **Modified**: 2024-02-01\n"));
        assert!(!md.contains("**Created**"));
    }

    #[test]
    fn test_display_value_escaping() {
        assert_eq!(display_value(&Cell::new("a|b\nc")), "a\\|b c");
        assert_eq!(display_value(&Cell::empty()), "");

        let long = "x".repeat(60);
        let shown = display_value(&Cell::new(long.as_str()));
        assert_eq!(shown, format!("{}...", "x".repeat(50)));
    }
}
