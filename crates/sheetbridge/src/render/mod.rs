//! Serialization of a workbook into output formats
//!
//! Text formats go through [`render`]; [`write_file`] adds binary workbook
//! write-back on top of it.

mod markdown;
mod structured;

use std::path::Path;

use sheetbridge_core::{Sheet, Workbook};
use sheetbridge_csv::{CsvWriteOptions, CsvWriter};
use sheetbridge_xlsx::{SheetGrid, XlsxWriter};

use crate::error::{Error, Result};
use crate::format::OutputFormat;

pub use markdown::{render_markdown, MAX_PREVIEW_ROWS, MAX_VALUE_CHARS};
pub use structured::{parse_json, parse_yaml, to_json, to_yaml};

/// Options for one render call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Sheet to render; the first sheet (or every sheet, for markdown) when unset
    pub sheet_name: Option<String>,
    /// Pass formulas through on binary write-back
    pub preserve_formulas: bool,
}

impl RenderOptions {
    /// Options targeting one sheet
    pub fn sheet<S: Into<String>>(name: S) -> Self {
        Self {
            sheet_name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Render a workbook as text
///
/// [`OutputFormat::Xlsx`] is file-only and fails with
/// [`Error::UnsupportedOutputFormat`]; use [`write_file`].
pub fn render(workbook: &Workbook, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(workbook),
        OutputFormat::Yaml => to_yaml(workbook),
        OutputFormat::Csv => {
            let sheet = select_sheet(workbook, options)?;
            Ok(CsvWriter::write_string(sheet, &CsvWriteOptions::csv())?)
        }
        OutputFormat::Tsv => {
            let sheet = select_sheet(workbook, options)?;
            Ok(CsvWriter::write_string(sheet, &CsvWriteOptions::tsv())?)
        }
        OutputFormat::Markdown => render_markdown(workbook, options.sheet_name.as_deref()),
        OutputFormat::Xlsx => Err(Error::UnsupportedOutputFormat(format.to_string())),
    }
}

/// Render a workbook into a file
pub fn write_file<P: AsRef<Path>>(
    workbook: &Workbook,
    path: P,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<()> {
    let path = path.as_ref();

    if format == OutputFormat::Xlsx {
        let sheets: Vec<&Sheet> = match &options.sheet_name {
            Some(_) => vec![select_sheet(workbook, options)?],
            None => workbook.sheets().collect(),
        };
        if sheets.is_empty() {
            return Err(Error::NoSheetData("workbook has no sheets".into()));
        }

        let grids: Vec<SheetGrid> = sheets
            .into_iter()
            .map(|s| SheetGrid::from_sheet(s, options.preserve_formulas))
            .collect();
        XlsxWriter::write_file(&grids, path)?;
    } else {
        let text = render(workbook, format, options)?;
        std::fs::write(path, text)?;
    }

    log::debug!("wrote {} output to {}", format, path.display());
    Ok(())
}

/// The named sheet, or the first declared sheet
fn select_sheet<'a>(workbook: &'a Workbook, options: &RenderOptions) -> Result<&'a Sheet> {
    match &options.sheet_name {
        Some(name) => workbook
            .sheet(name)
            .ok_or_else(|| Error::NoSheetData(format!("sheet '{}' not found", name))),
        None => workbook
            .first_sheet()
            .ok_or_else(|| Error::NoSheetData("workbook has no sheets".into())),
    }
}
