//! Error types for sheetbridge-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetbridge-core
#[derive(Debug, Error)]
pub enum Error {
    /// Cell or range string does not follow A1 notation
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    /// Sheet name already exists in the workbook
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Cell value does not agree with its declared type
    #[error("Invalid cell: {0}")]
    InvalidCell(String),

    /// Sheet dimensions disagree with its rows
    #[error("Invalid sheet '{name}': {message}")]
    InvalidSheet { name: String, message: String },
}
