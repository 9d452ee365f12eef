//! # sheetbridge
//!
//! Normalize spreadsheet data from heterogeneous formats into one tabular
//! model and re-serialize it.
//!
//! ## Features
//!
//! - Read XLSX, XLSM and XLS workbooks (first sheet or all sheets)
//! - Read CSV and TSV with per-field type inference
//! - Screen untrusted files with a safety gate before opening them
//! - Render to JSON, YAML, CSV, TSV and a Markdown summary
//! - Write workbooks back to XLSX
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetbridge::prelude::*;
//! use sheetbridge::render;
//!
//! let pipeline = Pipeline::new(ProcessingOptions::default());
//! let result = pipeline.process("report.xlsx");
//!
//! if let Some(workbook) = &result.data {
//!     let json = render::render(workbook, OutputFormat::Json, &RenderOptions::default()).unwrap();
//!     println!("{}", json);
//! } else {
//!     eprintln!("{:?}", result.errors);
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod prelude;
pub mod render;
pub mod safety;

pub use config::{
    ProcessingOptions, SafetyConfig, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_SCAN_BYTES,
};
pub use error::{Error, Result};
pub use format::{InputFormat, OutputFormat};
pub use pipeline::{Pipeline, ProcessingResult};
pub use render::RenderOptions;
pub use safety::{SafetyGate, SafetyReport, SUSPICIOUS_SIGNATURES};

// Re-export core types
pub use sheetbridge_core::{
    decode_range, encode_cell, infer_value, Cell, CellAddress, CellRange, CellType, CellValue,
    Sheet, Workbook, WorkbookMetadata,
};

// Re-export I/O types
pub use sheetbridge_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
pub use sheetbridge_xlsx::{
    CalamineCodec, ContainerCodec, WorkbookReadOptions, XlsxError, XlsxReader, XlsxWriter,
};
