//! # sheetbridge-core
//!
//! Core data structures for the sheetbridge conversion library.
//!
//! This crate provides the tabular model every adapter produces and every
//! renderer consumes:
//! - [`Cell`], [`CellValue`], [`CellType`] - One grid position
//! - [`Sheet`] - A rectangular grid with its A1 range
//! - [`Workbook`], [`WorkbookMetadata`] - Named sheets in declaration order
//! - [`encode_cell`] / [`decode_range`] - The A1 address codec
//! - [`infer_value`] - Type inference for raw text tokens
//!
//! ## Example
//!
//! ```rust
//! use sheetbridge_core::{infer_value, Cell, Sheet, Workbook};
//!
//! let rows = vec![
//!     vec![Cell::new(infer_value("1")), Cell::new(infer_value("true"))],
//!     vec![Cell::new(infer_value("hello"))],
//! ];
//! let sheet = Sheet::from_rows("Sheet1", rows);
//! assert_eq!(sheet.range_address(), "A1:B2");
//!
//! let mut workbook = Workbook::new();
//! workbook.add_sheet(sheet).unwrap();
//! ```

pub mod cell;
pub mod error;
pub mod infer;
pub mod sheet;
pub mod workbook;

pub use cell::{
    decode_range, encode_cell, Cell, CellAddress, CellRange, CellType, CellValue, DATE_FORMAT,
    EMPTY_RANGE,
};
pub use error::{Error, Result};
pub use infer::infer_value;
pub use sheet::Sheet;
pub use workbook::{Workbook, WorkbookMetadata};

/// Name given to the single sheet synthesized from delimited text
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
