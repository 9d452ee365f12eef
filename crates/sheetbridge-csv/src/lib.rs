//! # sheetbridge-csv
//!
//! Delimited-text (CSV/TSV) reader and writer for sheetbridge.
//!
//! The reader streams records, trims each field and runs type inference on
//! it; the writer quotes every field.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
