//! Processing configuration

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sheetbridge_xlsx::WorkbookReadOptions;

/// Default file size ceiling: 500 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Default number of leading bytes inspected by the content scan
pub const DEFAULT_SCAN_BYTES: usize = 10_000;

/// Extensions accepted by default, without the leading dot
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "csv", "tsv"];

fn default_extensions() -> BTreeSet<String> {
    DEFAULT_ALLOWED_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

/// Options for one pipeline
///
/// Hosts may load this from JSON or YAML; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessingOptions {
    /// Read every sheet of a binary workbook instead of only the first
    pub read_all_sheets: bool,
    /// Attach document properties as workbook metadata
    pub include_metadata: bool,
    /// Run the safety gate before ingestion
    pub safety_checks: bool,
    /// Keep formula text on read and pass it through on write-back
    pub preserve_formulas: bool,
    /// Keep number format codes on read
    pub include_formatting: bool,
    pub max_file_size_bytes: u64,
    /// Accepted extensions, compared case-insensitively
    pub allowed_extensions: BTreeSet<String>,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            read_all_sheets: true,
            include_metadata: true,
            safety_checks: true,
            preserve_formulas: true,
            include_formatting: false,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: default_extensions(),
        }
    }
}

impl ProcessingOptions {
    /// Safety gate configuration derived from these options
    pub fn safety_config(&self) -> SafetyConfig {
        SafetyConfig {
            max_file_size_bytes: self.max_file_size_bytes,
            allowed_extensions: self.allowed_extensions.clone(),
            ..SafetyConfig::default()
        }
    }

    /// Binary workbook read options derived from these options
    pub fn read_options(&self) -> WorkbookReadOptions {
        WorkbookReadOptions {
            read_all_sheets: self.read_all_sheets,
            include_metadata: self.include_metadata,
            preserve_formulas: self.preserve_formulas,
            include_formatting: self.include_formatting,
        }
    }
}

/// Safety gate limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyConfig {
    pub max_file_size_bytes: u64,
    pub allowed_extensions: BTreeSet<String>,
    /// Leading bytes decoded and searched for script signatures
    pub scan_bytes: usize,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: default_extensions(),
            scan_bytes: DEFAULT_SCAN_BYTES,
        }
    }
}

impl SafetyConfig {
    /// Check an extension (with or without the leading dot) against the allow list
    pub fn allows_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ProcessingOptions::default();
        assert!(options.read_all_sheets);
        assert!(options.safety_checks);
        assert!(!options.include_formatting);
        assert_eq!(options.max_file_size_bytes, 524_288_000);
        assert_eq!(options.allowed_extensions.len(), 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ProcessingOptions =
            serde_json::from_str(r#"{"readAllSheets": false, "maxFileSizeBytes": 10}"#).unwrap();
        assert!(!options.read_all_sheets);
        assert_eq!(options.max_file_size_bytes, 10);
        assert!(options.include_metadata);
        assert!(options.allowed_extensions.contains("csv"));
    }

    #[test]
    fn test_allows_extension() {
        let config = SafetyConfig::default();
        assert!(config.allows_extension("XLSX"));
        assert!(config.allows_extension(".csv"));
        assert!(!config.allows_extension("exe"));
        assert!(!config.allows_extension(""));
    }

    #[test]
    fn test_derived_configs() {
        let options = ProcessingOptions {
            max_file_size_bytes: 42,
            preserve_formulas: false,
            ..Default::default()
        };
        assert_eq!(options.safety_config().max_file_size_bytes, 42);
        assert_eq!(options.safety_config().scan_bytes, DEFAULT_SCAN_BYTES);
        assert!(!options.read_options().preserve_formulas);
    }
}
