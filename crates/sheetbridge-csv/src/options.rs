//! CSV options

/// Options for reading delimited text
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Trim leading/trailing whitespace from every field
    pub trim: bool,
    /// Run type inference on every field; otherwise all fields are strings
    pub infer_types: bool,
}

impl CsvReadOptions {
    /// Comma-separated defaults
    pub fn csv() -> Self {
        Self::default()
    }

    /// Tab-separated defaults
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: true,
            infer_types: true,
        }
    }
}

/// Options for writing delimited text
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Separator placed between rows
    pub line_terminator: LineTerminator,
}

impl CsvWriteOptions {
    /// Comma-separated defaults
    pub fn csv() -> Self {
        Self::default()
    }

    /// Tab-separated defaults
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            line_terminator: LineTerminator::LF,
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}

impl LineTerminator {
    pub(crate) fn as_bytes(&self) -> &'static [u8] {
        match self {
            LineTerminator::LF => b"\n",
            LineTerminator::CRLF => b"\r\n",
        }
    }

    pub(crate) fn to_csv(self) -> csv::Terminator {
        match self {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        }
    }
}
