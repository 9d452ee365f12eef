//! Input and output format detection

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Source formats with an ingestion adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    Xlsx,
    Xlsm,
    Xls,
    Csv,
    Tsv,
}

impl InputFormat {
    /// Detect the format from a path's extension, case-insensitively
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        Self::from_extension(&ext).ok_or_else(|| {
            Error::UnsupportedInputFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                format!(".{}", ext)
            })
        })
    }

    /// Map a lowercase extension without the dot
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "xlsx" => Some(InputFormat::Xlsx),
            "xlsm" => Some(InputFormat::Xlsm),
            "xls" => Some(InputFormat::Xls),
            "csv" => Some(InputFormat::Csv),
            "tsv" => Some(InputFormat::Tsv),
            _ => None,
        }
    }

    /// Delimited text rather than a binary container
    pub fn is_delimited(&self) -> bool {
        matches!(self, InputFormat::Csv | InputFormat::Tsv)
    }
}

/// Serialization targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Json,
    Yaml,
    Csv,
    Tsv,
    Markdown,
    /// Binary workbook write-back; file output only
    Xlsx,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            other => other.as_str(),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "xlsx" => Ok(OutputFormat::Xlsx),
            _ => Err(Error::UnsupportedOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_from_path() {
        assert_eq!(InputFormat::from_path("a/b.XLSX").unwrap(), InputFormat::Xlsx);
        assert_eq!(InputFormat::from_path("data.tsv").unwrap(), InputFormat::Tsv);
        assert!(InputFormat::from_path("data.csv").unwrap().is_delimited());
        assert!(!InputFormat::from_path("old.xls").unwrap().is_delimited());

        match InputFormat::from_path("notes.txt") {
            Err(Error::UnsupportedInputFormat(ext)) => assert_eq!(ext, ".txt"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            InputFormat::from_path("README"),
            Err(Error::UnsupportedInputFormat(_))
        ));
    }

    #[test]
    fn test_output_from_str() {
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("json".parse::<OutputFormat>().unwrap().to_string(), "json");
        assert_eq!(OutputFormat::Markdown.extension(), "md");

        match "pdf".parse::<OutputFormat>() {
            Err(Error::UnsupportedOutputFormat(name)) => assert_eq!(name, "pdf"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
