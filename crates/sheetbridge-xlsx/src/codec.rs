//! Container codec boundary
//!
//! Decoding the binary container is delegated to a [`ContainerCodec`]. A codec
//! opens a file and exposes sheet names in declared order, each sheet's
//! declared range with an address-to-cell lookup, and optional document
//! properties.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use sheetbridge_core::{infer::parse_date, CellAddress, WorkbookMetadata};

use crate::error::XlsxResult;
use crate::properties;
use crate::serial::MAX_SERIAL;

/// Raw value with its container type code
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Numeric cell
    Number(f64),
    /// Date cell, already converted from the container's representation
    Date(chrono::NaiveDateTime),
    /// Boolean cell
    Boolean(bool),
    /// Error cell with its display code
    Error(String),
    /// Text cell
    Text(String),
    /// Cell present in the container without a value (formula-only, styled)
    Empty,
}

/// One decoded cell
#[derive(Debug, Clone, PartialEq)]
pub struct RawCell {
    pub value: RawValue,
    pub formula: Option<String>,
    pub format: Option<String>,
}

impl RawCell {
    /// Create a cell without formula or format
    pub fn new(value: RawValue) -> Self {
        Self {
            value,
            formula: None,
            format: None,
        }
    }
}

/// One decoded sheet: its declared range and a sparse cell lookup
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    declared_range: String,
    cells: HashMap<CellAddress, RawCell>,
}

impl RawSheet {
    /// Create a sheet with a declared range such as `"A1:C5"`; empty means none
    pub fn new<S: Into<String>>(declared_range: S) -> Self {
        Self {
            declared_range: declared_range.into(),
            cells: HashMap::new(),
        }
    }

    /// Add or replace a cell
    pub fn insert(&mut self, addr: CellAddress, cell: RawCell) {
        self.cells.insert(addr, cell);
    }

    /// The declared range string
    pub fn declared_range(&self) -> &str {
        &self.declared_range
    }

    /// Look up a cell by absolute address
    pub fn cell(&self, addr: &CellAddress) -> Option<&RawCell> {
        self.cells.get(addr)
    }

    /// Number of populated cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell is populated
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An opened container
pub trait Container {
    /// Sheet names in declared order
    fn sheet_names(&self) -> Vec<String>;

    /// Decode one sheet
    fn sheet(&mut self, name: &str) -> XlsxResult<RawSheet>;

    /// Document properties, if the format exposes them
    fn properties(&mut self) -> XlsxResult<Option<WorkbookMetadata>>;
}

/// Opens binary containers
pub trait ContainerCodec {
    type Container: Container;

    /// Open the container at `path`
    fn open(&self, path: &Path) -> XlsxResult<Self::Container>;
}

/// Codec backed by `calamine`, handling `.xlsx`, `.xlsm`, `.xlsb` and `.xls`
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineCodec;

impl ContainerCodec for CalamineCodec {
    type Container = CalamineContainer;

    fn open(&self, path: &Path) -> XlsxResult<CalamineContainer> {
        let sheets = open_workbook_auto(path)?;
        Ok(CalamineContainer {
            path: path.to_path_buf(),
            sheets,
        })
    }
}

/// A container opened through [`CalamineCodec`]
pub struct CalamineContainer {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl CalamineContainer {
    fn convert_value(data: &Data) -> RawValue {
        match data {
            Data::Empty => RawValue::Empty,
            Data::Int(i) => RawValue::Number(*i as f64),
            Data::Float(f) => RawValue::Number(*f),
            Data::String(s) => RawValue::Text(s.clone()),
            Data::Bool(b) => RawValue::Boolean(*b),
            Data::Error(e) => RawValue::Error(e.to_string()),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                if dt.is_duration() || !(0.0..=MAX_SERIAL).contains(&serial) {
                    return RawValue::Number(serial);
                }
                // calamine applies the 1904 offset and the 1900 leap-day quirk
                dt.as_datetime()
                    .map(RawValue::Date)
                    .unwrap_or(RawValue::Number(serial))
            }
            Data::DateTimeIso(s) => parse_date(s)
                .map(RawValue::Date)
                .unwrap_or_else(|| RawValue::Text(s.clone())),
            Data::DurationIso(s) => RawValue::Text(s.clone()),
        }
    }

    fn is_zip_container(&self) -> bool {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        matches!(ext.as_deref(), Some("xlsx") | Some("xlsm"))
    }
}

impl Container for CalamineContainer {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn sheet(&mut self, name: &str) -> XlsxResult<RawSheet> {
        let range = self.sheets.worksheet_range(name)?;

        let declared = match (range.start(), range.end()) {
            (Some((r0, c0)), Some((r1, c1))) => format!(
                "{}:{}",
                CellAddress::new(r0, c0),
                CellAddress::new(r1, c1)
            ),
            _ => String::new(),
        };
        let mut raw = RawSheet::new(declared);

        if let Some((start_row, start_col)) = range.start() {
            for (row, col, data) in range.used_cells() {
                let addr = CellAddress::new(start_row + row as u32, start_col + col as u32);
                raw.insert(addr, RawCell::new(Self::convert_value(data)));
            }
        }

        // Formulas live in their own range with its own origin
        if let Ok(formulas) = self.sheets.worksheet_formula(name) {
            if let Some((start_row, start_col)) = formulas.start() {
                for (row, col, formula) in formulas.used_cells() {
                    if formula.is_empty() {
                        continue;
                    }
                    let addr =
                        CellAddress::new(start_row + row as u32, start_col + col as u32);
                    let text = if formula.starts_with('=') {
                        formula.clone()
                    } else {
                        format!("={}", formula)
                    };
                    match raw.cells.get_mut(&addr) {
                        Some(cell) => cell.formula = Some(text),
                        None => raw.insert(
                            addr,
                            RawCell {
                                value: RawValue::Empty,
                                formula: Some(text),
                                format: None,
                            },
                        ),
                    }
                }
            }
        }

        log::debug!(
            "decoded sheet '{}' range '{}' with {} cells",
            name,
            raw.declared_range(),
            raw.len()
        );
        Ok(raw)
    }

    fn properties(&mut self) -> XlsxResult<Option<WorkbookMetadata>> {
        if !self.is_zip_container() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        properties::read_properties(BufReader::new(file))
    }
}
