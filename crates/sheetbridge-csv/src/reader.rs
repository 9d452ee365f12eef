//! CSV reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use sheetbridge_core::{infer_value, Cell, CellValue, Sheet, DEFAULT_SHEET_NAME};

/// Delimited-text reader shared by CSV and TSV
pub struct CsvReader;

impl CsvReader {
    /// Read a delimited file into a single sheet named `Sheet1`
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Sheet> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file), options)
    }

    /// Read delimited text from a reader into a single sheet named `Sheet1`
    ///
    /// Records are streamed one at a time. Blank lines are skipped and rows
    /// may differ in length; short rows are padded with empty cells.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Sheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let mut rows = Vec::new();
        let mut record = csv::StringRecord::new();
        let whitespace_delimiter = options.delimiter.is_ascii_whitespace();

        while csv_reader.read_record(&mut record)? {
            if Self::is_blank(&record, whitespace_delimiter) {
                continue;
            }

            let row: Vec<Cell> = record
                .iter()
                .map(|field| Cell::new(Self::convert_field(field, options)))
                .collect();
            rows.push(row);
        }

        let sheet = Sheet::from_rows(DEFAULT_SHEET_NAME, rows);
        log::debug!(
            "read {} rows x {} columns of delimited text",
            sheet.row_count(),
            sheet.column_count()
        );
        Ok(sheet)
    }

    /// A whitespace-only line arrives as one empty field. With a whitespace
    /// delimiter it can split into several fields, all of them blank.
    fn is_blank(record: &csv::StringRecord, whitespace_delimiter: bool) -> bool {
        let all_blank = record.iter().all(|field| field.trim().is_empty());
        all_blank && (record.len() == 1 || whitespace_delimiter)
    }

    fn convert_field(field: &str, options: &CsvReadOptions) -> CellValue {
        if options.infer_types {
            infer_value(field)
        } else if field.is_empty() {
            CellValue::Empty
        } else {
            CellValue::string(field)
        }
    }
}
