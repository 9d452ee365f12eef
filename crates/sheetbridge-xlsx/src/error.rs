//! XLSX error types

use thiserror::Error;

/// Result type for workbook container operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during workbook reading/writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Container decode error from the codec
    #[error("Codec error: {0}")]
    Codec(#[from] calamine::Error),

    /// The container declares no sheets
    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    /// Invalid file format
    #[error("Invalid workbook format: {0}")]
    InvalidFormat(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] sheetbridge_core::Error),
}
