//! Binary workbook reader

use std::path::Path;

use sheetbridge_core::{
    decode_range, Cell, CellAddress, CellValue, Sheet, Workbook, WorkbookMetadata,
};

use crate::codec::{CalamineCodec, Container, ContainerCodec, RawCell, RawSheet, RawValue};
use crate::error::{XlsxError, XlsxResult};

/// Options for reading a binary workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookReadOptions {
    /// Read every sheet instead of only the first
    pub read_all_sheets: bool,
    /// Attach document properties as workbook metadata
    pub include_metadata: bool,
    /// Attach formula text to cells
    pub preserve_formulas: bool,
    /// Attach number format codes to cells
    pub include_formatting: bool,
}

impl Default for WorkbookReadOptions {
    fn default() -> Self {
        Self {
            read_all_sheets: true,
            include_metadata: true,
            preserve_formulas: true,
            include_formatting: false,
        }
    }
}

/// A decoded workbook plus the non-fatal conditions met while decoding
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    pub workbook: Workbook,
    pub warnings: Vec<String>,
}

/// Binary workbook reader
///
/// Each selected sheet is materialized by walking every coordinate of its
/// declared range, so the resulting sheet matches the range exactly. A sheet
/// without a declared range is read as `A1:A1`.
#[derive(Debug, Clone, Default)]
pub struct XlsxReader<C = CalamineCodec> {
    codec: C,
    options: WorkbookReadOptions,
}

impl XlsxReader<CalamineCodec> {
    /// Reader backed by the default codec
    pub fn with_options(options: WorkbookReadOptions) -> Self {
        Self::new(CalamineCodec, options)
    }

    /// Read a workbook file with the default codec
    pub fn read_file<P: AsRef<Path>>(
        path: P,
        options: &WorkbookReadOptions,
    ) -> XlsxResult<ReadOutcome> {
        Self::with_options(options.clone()).read(path)
    }
}

impl<C: ContainerCodec> XlsxReader<C> {
    /// Create a reader over a codec
    pub fn new(codec: C, options: WorkbookReadOptions) -> Self {
        Self { codec, options }
    }

    /// The options this reader was built with
    pub fn options(&self) -> &WorkbookReadOptions {
        &self.options
    }

    /// Read a workbook from a path
    pub fn read<P: AsRef<Path>>(&self, path: P) -> XlsxResult<ReadOutcome> {
        let path = path.as_ref();
        let mut container = self.codec.open(path)?;

        let names = container.sheet_names();
        if names.is_empty() {
            return Err(XlsxError::EmptyWorkbook);
        }

        let selected: &[String] = if self.options.read_all_sheets {
            &names
        } else {
            &names[..1]
        };

        let mut workbook = Workbook::new();
        let mut warnings = Vec::new();

        for name in selected {
            let raw = container.sheet(name)?;
            let sheet = self.build_sheet(name, &raw)?;

            let blank = sheet.rows().iter().flatten().all(Cell::is_empty);
            if self.options.read_all_sheets && blank {
                log::warn!("sheet '{}' in {} is empty", name, path.display());
                warnings.push(format!("Sheet '{}' is empty", name));
            }

            log::debug!(
                "read sheet '{}' ({} rows x {} columns, range {})",
                name,
                sheet.row_count(),
                sheet.column_count(),
                sheet.range_address()
            );
            workbook.add_sheet(sheet)?;
        }

        if self.options.include_metadata {
            let mut meta = match container.properties() {
                Ok(props) => props.unwrap_or_default(),
                Err(e) => {
                    log::warn!("could not read document properties: {}", e);
                    WorkbookMetadata::default()
                }
            };
            meta.sheet_names = names.clone();
            workbook.set_metadata(Some(meta));
        }

        workbook.set_active_sheet(&selected[0])?;

        Ok(ReadOutcome { workbook, warnings })
    }

    fn build_sheet(&self, name: &str, raw: &RawSheet) -> XlsxResult<Sheet> {
        let range = decode_range(raw.declared_range())?;

        let rows = range
            .rows()
            .map(|row| {
                range
                    .columns()
                    .map(|col| {
                        raw.cell(&CellAddress::new(row, col))
                            .map(|c| self.convert_cell(c))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Ok(Sheet::with_range(name, rows, range)?)
    }

    fn convert_cell(&self, raw: &RawCell) -> Cell {
        let value = match &raw.value {
            RawValue::Number(n) => CellValue::Number(*n),
            RawValue::Date(d) => CellValue::Date(*d),
            RawValue::Boolean(b) => CellValue::Boolean(*b),
            RawValue::Error(code) => CellValue::Error(code.clone()),
            RawValue::Text(s) => CellValue::String(s.clone()),
            RawValue::Empty => CellValue::Empty,
        };

        let mut cell = Cell::new(value);
        if self.options.preserve_formulas {
            cell.formula = raw.formula.clone();
        }
        if self.options.include_formatting {
            cell.format = raw.format.clone();
        }
        cell
    }
}
