//! Prelude module - common imports for sheetbridge users
//!
//! ```rust
//! use sheetbridge::prelude::*;
//! ```

pub use crate::{
    // Model types
    Cell,
    CellType,
    CellValue,
    // Error types
    Error,
    InputFormat,
    OutputFormat,
    // Pipeline
    Pipeline,
    ProcessingOptions,
    ProcessingResult,
    RenderOptions,
    Result,
    SafetyConfig,
    SafetyGate,
    SafetyReport,
    Sheet,
    Workbook,
    WorkbookMetadata,
};
