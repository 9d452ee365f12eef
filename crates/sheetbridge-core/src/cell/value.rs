//! Cell value types

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Textual form used for dates in every output format
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Represents the value stored in a cell
///
/// The [`CellType`] of a cell is derived from the variant, so a value and its
/// type can never disagree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value); reported as type `string`
    #[default]
    Empty,

    /// Numeric value
    Number(f64),

    /// Boolean value
    Boolean(bool),

    /// Calendar date or date-time
    Date(NaiveDateTime),

    /// String value
    String(String),

    /// Error value, kept as its display code (`#DIV/0!`, `#N/A`, ...)
    Error(String),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Create a date value at midnight
    pub fn date(date: NaiveDate) -> Self {
        CellValue::Date(date.and_time(chrono::NaiveTime::MIN))
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Get the canonical type tag for this value
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Empty | CellValue::String(_) => CellType::String,
            CellValue::Number(_) => CellType::Number,
            CellValue::Boolean(_) => CellType::Boolean,
            CellValue::Date(_) => CellType::Date,
            CellValue::Error(_) => CellType::Error,
        }
    }

    /// Try to get the value as a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            CellValue::String(s) => f.write_str(s),
            CellValue::Error(e) => f.write_str(e),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(d: NaiveDateTime) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::date(d)
    }
}

/// Canonical cell type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Number,
    Boolean,
    Date,
    String,
    Error,
}

impl CellType {
    /// Get the lowercase tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            CellType::Number => "number",
            CellType::Boolean => "boolean",
            CellType::Date => "date",
            CellType::String => "string",
            CellType::Error => "error",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One grid cell: a value plus optional formula text and number format code
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "CellRepr", into = "CellRepr")]
pub struct Cell {
    /// The cell value
    pub value: CellValue,
    /// Formula text (e.g. `=SUM(A1:A3)`), when the source carried one
    pub formula: Option<String>,
    /// Number format code, when the source carried one
    pub format: Option<String>,
}

impl Cell {
    /// Create a cell holding `value`
    pub fn new<V: Into<CellValue>>(value: V) -> Self {
        Self {
            value: value.into(),
            formula: None,
            format: None,
        }
    }

    /// The empty cell: `{value: null, type: string}`
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach formula text
    pub fn with_formula<S: Into<String>>(mut self, formula: S) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Attach a number format code
    pub fn with_format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Get the cell's type tag
    pub fn cell_type(&self) -> CellType {
        self.value.cell_type()
    }

    /// Check if the cell has no value
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<CellValue> for Cell {
    fn from(value: CellValue) -> Self {
        Cell::new(value)
    }
}

/// Wire shape of a cell: `{"value": ..., "type": ..., "formula"?, "format"?}`
#[derive(Serialize, Deserialize)]
struct CellRepr {
    #[serde(default)]
    value: Option<Scalar>,
    #[serde(rename = "type")]
    ty: CellType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<Cell> for CellRepr {
    fn from(cell: Cell) -> Self {
        let ty = cell.cell_type();
        let value = match cell.value {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(Scalar::Number(n)),
            CellValue::Boolean(b) => Some(Scalar::Bool(b)),
            CellValue::Date(d) => Some(Scalar::Text(d.format(DATE_FORMAT).to_string())),
            CellValue::String(s) => Some(Scalar::Text(s)),
            CellValue::Error(e) => Some(Scalar::Text(e)),
        };
        CellRepr {
            value,
            ty,
            formula: cell.formula,
            format: cell.format,
        }
    }
}

impl TryFrom<CellRepr> for Cell {
    type Error = Error;

    fn try_from(repr: CellRepr) -> Result<Self, Self::Error> {
        let value = match (repr.ty, repr.value) {
            (CellType::String, None) => CellValue::Empty,
            (CellType::String, Some(Scalar::Text(s))) => CellValue::String(s),
            (CellType::Number, Some(Scalar::Number(n))) => CellValue::Number(n),
            (CellType::Boolean, Some(Scalar::Bool(b))) => CellValue::Boolean(b),
            (CellType::Error, Some(Scalar::Text(e))) => CellValue::Error(e),
            (CellType::Date, Some(Scalar::Text(s))) => {
                let parsed = NaiveDateTime::parse_from_str(&s, DATE_FORMAT)
                    .or_else(|_| {
                        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                            .map(|d| d.and_time(chrono::NaiveTime::MIN))
                    })
                    .map_err(|_| Error::InvalidCell(format!("invalid date value '{}'", s)))?;
                CellValue::Date(parsed)
            }
            (ty, _) => {
                return Err(Error::InvalidCell(format!(
                    "value does not match declared type '{}'",
                    ty
                )))
            }
        };

        Ok(Cell {
            value,
            formula: repr.formula,
            format: repr.format,
        })
    }
}
