//! Error types for the conversion pipeline

use std::path::PathBuf;

use sheetbridge_csv::CsvError;
use sheetbridge_xlsx::XlsxError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by ingestion and serialization
///
/// Lower-level failures that have no dedicated variant become
/// [`Error::Unknown`] with their original message.
#[derive(Debug, Error)]
pub enum Error {
    /// Input path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The safety gate rejected the file; holds every issue it found
    #[error("Unsafe file: {}", .0.join("; "))]
    UnsafeFile(Vec<String>),

    /// Input extension has no ingestion adapter
    #[error("Unsupported input format: {0}")]
    UnsupportedInputFormat(String),

    /// The container declares no sheets
    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    /// Range or cell string does not follow A1 notation
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    /// The sheet to serialize is missing or the workbook has none
    #[error("No sheet data: {0}")]
    NoSheetData(String),

    /// Requested output format is not supported for this operation
    #[error("Unsupported output format: {0}")]
    UnsupportedOutputFormat(String),

    #[error("{0}")]
    Unknown(String),
}

impl From<sheetbridge_core::Error> for Error {
    fn from(e: sheetbridge_core::Error) -> Self {
        match e {
            sheetbridge_core::Error::MalformedAddress(addr) => Error::MalformedAddress(addr),
            other => Error::Unknown(other.to_string()),
        }
    }
}

impl From<CsvError> for Error {
    fn from(e: CsvError) -> Self {
        match e {
            CsvError::Core(inner) => inner.into(),
            other => Error::Unknown(other.to_string()),
        }
    }
}

impl From<XlsxError> for Error {
    fn from(e: XlsxError) -> Self {
        match e {
            XlsxError::EmptyWorkbook => Error::EmptyWorkbook,
            XlsxError::Core(inner) => inner.into(),
            other => Error::Unknown(other.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Unknown(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Unknown(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Unknown(e.to_string())
    }
}
