//! Ingestion pipeline: safety gate, format detection, adapter, result envelope

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sheetbridge_core::{Workbook, WorkbookMetadata, DEFAULT_SHEET_NAME};
use sheetbridge_csv::{CsvReadOptions, CsvReader};
use sheetbridge_xlsx::XlsxReader;

use crate::config::ProcessingOptions;
use crate::error::{Error, Result};
use crate::format::{InputFormat, OutputFormat};
use crate::render::{self, RenderOptions};
use crate::safety::SafetyGate;

/// Outcome of [`Pipeline::process`]
///
/// On failure `data` and `metadata` are absent and `errors` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Workbook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<WorkbookMetadata>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<f64>,
}

impl ProcessingResult {
    fn succeeded(workbook: Workbook, warnings: Vec<String>, elapsed_ms: f64) -> Self {
        Self {
            success: true,
            metadata: workbook.metadata().cloned(),
            data: Some(workbook),
            warnings,
            errors: Vec::new(),
            processing_time_ms: Some(elapsed_ms),
        }
    }

    fn failed(error: Error, warnings: Vec<String>, elapsed_ms: f64) -> Self {
        let errors = match error {
            Error::UnsafeFile(issues) => issues,
            other => vec![other.to_string()],
        };
        Self {
            success: false,
            data: None,
            metadata: None,
            warnings,
            errors,
            processing_time_ms: Some(elapsed_ms),
        }
    }
}

/// Reads spreadsheet files into a [`Workbook`] under one set of options
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: ProcessingOptions,
    gate: SafetyGate,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ProcessingOptions::default())
    }
}

impl Pipeline {
    pub fn new(options: ProcessingOptions) -> Self {
        let gate = SafetyGate::new(options.safety_config());
        Self { options, gate }
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Read a file, failing fast on the first error
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Workbook> {
        let mut warnings = Vec::new();
        self.ingest(path.as_ref(), &mut warnings)
    }

    /// Read a file into a result envelope; never fails
    pub fn process<P: AsRef<Path>>(&self, path: P) -> ProcessingResult {
        let path = path.as_ref();
        let start = Instant::now();
        let mut warnings = Vec::new();

        let outcome = self.ingest(path, &mut warnings);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(workbook) => {
                log::info!(
                    "processed {} ({} sheets) in {:.1} ms",
                    path.display(),
                    workbook.sheet_count(),
                    elapsed_ms
                );
                ProcessingResult::succeeded(workbook, warnings, elapsed_ms)
            }
            Err(e) => {
                log::info!("failed to process {}: {}", path.display(), e);
                ProcessingResult::failed(e, warnings, elapsed_ms)
            }
        }
    }

    /// Read `input` and write it to `output` in `format`
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        format: OutputFormat,
    ) -> Result<()> {
        let workbook = self.read(input)?;
        let options = RenderOptions {
            sheet_name: None,
            preserve_formulas: self.options.preserve_formulas,
        };
        render::write_file(&workbook, output, format, &options)
    }

    fn ingest(&self, path: &Path, warnings: &mut Vec<String>) -> Result<Workbook> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        if self.options.safety_checks {
            let report = self.gate.validate(path);
            if !report.is_safe() {
                return Err(Error::UnsafeFile(report.into_issues()));
            }
        } else {
            warnings.push("Safety checks are disabled".to_string());
        }

        let format = InputFormat::from_path(path)?;

        if format.is_delimited() {
            let read_options = if format == InputFormat::Tsv {
                CsvReadOptions::tsv()
            } else {
                CsvReadOptions::csv()
            };
            let sheet = CsvReader::read_file(path, &read_options)?;

            let mut workbook = Workbook::new();
            workbook.add_sheet(sheet)?;
            workbook.set_active_sheet(DEFAULT_SHEET_NAME)?;
            return Ok(workbook);
        }

        let outcome = XlsxReader::read_file(path, &self.options.read_options())?;
        warnings.extend(outcome.warnings);
        Ok(outcome.workbook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = Pipeline::default().process("/no/such/input.csv");
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("File not found"));
    }

    #[test]
    fn test_disabled_safety_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.csv");
        std::fs::write(&path, "x,y").unwrap();

        let pipeline = Pipeline::new(ProcessingOptions {
            safety_checks: false,
            ..Default::default()
        });
        let result = pipeline.process(&path);

        assert!(result.success);
        assert_eq!(result.warnings, vec!["Safety checks are disabled".to_string()]);
        assert!(result.metadata.is_none());
    }

    #[test]
    fn test_unsupported_input_without_safety() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let pipeline = Pipeline::new(ProcessingOptions {
            safety_checks: false,
            ..Default::default()
        });
        assert!(matches!(
            pipeline.read(&path),
            Err(Error::UnsupportedInputFormat(_))
        ));
    }

    #[test]
    fn test_tsv_active_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.tsv");
        std::fs::write(&path, "a\tb\n1\t2").unwrap();

        let workbook = Pipeline::default().read(&path).unwrap();
        assert_eq!(workbook.active_sheet(), Some("Sheet1"));
        assert_eq!(workbook.first_sheet().unwrap().column_count(), 2);
    }
}
