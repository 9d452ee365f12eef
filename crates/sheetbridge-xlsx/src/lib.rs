//! # sheetbridge-xlsx
//!
//! Binary workbook ingestion and write-back for sheetbridge.
//!
//! Container decoding sits behind [`ContainerCodec`]; the default
//! [`CalamineCodec`] handles `.xlsx`, `.xlsm` and `.xls`. [`XlsxReader`] walks
//! each sheet's declared range through the A1 codec and builds the tabular
//! model, and [`XlsxWriter`] persists value grids as a new `.xlsx` file.

pub mod codec;
pub mod error;
pub mod properties;
pub mod reader;
pub mod serial;
pub mod writer;

pub use codec::{CalamineCodec, Container, ContainerCodec, RawCell, RawSheet, RawValue};
pub use error::{XlsxError, XlsxResult};
pub use reader::{ReadOutcome, WorkbookReadOptions, XlsxReader};
pub use writer::{GridCell, SheetGrid, XlsxWriter};
