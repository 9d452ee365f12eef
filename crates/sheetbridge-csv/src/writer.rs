//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvWriteOptions;
use sheetbridge_core::Sheet;

/// Delimited-text writer shared by CSV and TSV
///
/// Every field is quoted, embedded quotes are doubled, and rows are joined by
/// the line terminator with no trailing terminator after the last row.
pub struct CsvWriter;

impl CsvWriter {
    /// Write a sheet to a file
    pub fn write_file<P: AsRef<Path>>(
        sheet: &Sheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(sheet, file, options)
    }

    /// Write a sheet to a writer
    pub fn write<W: Write>(sheet: &Sheet, mut writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let text = Self::write_string(sheet, options)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Render a sheet as delimited text
    pub fn write_string(sheet: &Sheet, options: &CsvWriteOptions) -> CsvResult<String> {
        let terminator = options.line_terminator.as_bytes();
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .quote_style(csv::QuoteStyle::Always)
            .double_quote(true)
            .terminator(options.line_terminator.to_csv())
            .from_writer(Vec::new());

        for row in sheet.rows() {
            csv_writer.write_record(row.iter().map(|cell| cell.value.to_string()))?;
        }

        let mut out = csv_writer.into_inner().map_err(|e| e.into_error())?;

        // Rows are separated, not terminated
        if out.ends_with(terminator) {
            out.truncate(out.len() - terminator.len());
        }

        Ok(String::from_utf8(out)?)
    }
}
