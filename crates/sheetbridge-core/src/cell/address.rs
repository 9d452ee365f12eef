//! A1 address codec
//!
//! Converts between zero-based `(row, col)` coordinates and spreadsheet A1
//! notation, and parses rectangular range strings such as `"A1:C5"`.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Range used when a container declares no dimensions
pub const EMPTY_RANGE: &str = "A1:A1";

/// Encode a zero-based coordinate as an A1 address (`(0, 0)` is `"A1"`).
pub fn encode_cell(row: u32, col: u32) -> String {
    CellAddress::new(row, col).to_a1_string()
}

/// Decode a range string into its zero-based corners.
///
/// Accepts `"<cell>:<cell>"` or a single cell, which is treated as a 1x1
/// range. An empty string decodes as [`EMPTY_RANGE`].
///
/// # Examples
/// ```
/// use sheetbridge_core::decode_range;
///
/// let range = decode_range("B2:D10").unwrap();
/// assert_eq!((range.start.row, range.start.col), (1, 1));
/// assert_eq!((range.end.row, range.end.col), (9, 3));
/// ```
pub fn decode_range(s: &str) -> Result<CellRange> {
    CellRange::parse(s)
}

/// A zero-based cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// Absolute markers (`$`) are accepted and ignored.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::MalformedAddress("empty address".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let col_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == col_start {
            return Err(Error::MalformedAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        let col = Self::letters_to_column(&s[col_start..pos])?;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let row_str = &s[pos..];
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::MalformedAddress(format!("row number out of range in '{}'", s)))?;

        // A1 rows are 1-based
        if row == 0 {
            return Err(Error::MalformedAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self { row: row - 1, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = Vec::new();
        let mut n = col as u64 + 1;

        while n > 0 {
            n -= 1;
            result.push((n % 26) as u8 + b'A');
            n /= 26;
        }

        result.reverse();
        // Only ASCII uppercase letters were pushed
        result.into_iter().map(char::from).collect()
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::MalformedAddress("empty column letters".into()));
        }

        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::MalformedAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
            if col > u32::MAX as u64 {
                return Err(Error::MalformedAddress(format!(
                    "column '{}' out of range",
                    letters
                )));
            }
        }

        Ok((col - 1) as u32)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!(
            "{}{}",
            Self::column_to_letters(self.col),
            self.row as u64 + 1
        )
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range, normalized so start is top-left
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self {
            start: CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a range from row/column indices
    pub fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Range anchored at A1 covering `rows` x `cols` cells.
    ///
    /// Zero in either dimension yields the 1x1 [`EMPTY_RANGE`].
    pub fn from_dimensions(rows: usize, cols: usize) -> Self {
        let last_row = rows.saturating_sub(1).min(u32::MAX as usize) as u32;
        let last_col = cols.saturating_sub(1).min(u32::MAX as usize) as u32;
        if rows == 0 || cols == 0 {
            return Self::single(CellAddress::new(0, 0));
        }
        Self::from_indices(0, 0, last_row, last_col)
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from A1:B10 notation
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = if s.is_empty() { EMPTY_RANGE } else { s };

        if let Some((start, end)) = s.split_once(':') {
            let start = CellAddress::parse(start)?;
            let end = CellAddress::parse(end)?;
            Ok(Self::new(start, end))
        } else {
            let addr = CellAddress::parse(s)?;
            Ok(Self::single(addr))
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row,
            current_col: self.start.col,
            remaining: self.cell_count(),
        }
    }

    /// Iterate over the row indices covered by the range
    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.start.row..=self.end.row
    }

    /// Iterate over the column indices covered by the range
    pub fn columns(&self) -> std::ops::RangeInclusive<u32> {
        self.start.col..=self.end.col
    }

    /// Format as `A1:B10`, always with both corners
    pub fn to_a1_string(&self) -> String {
        format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u32,
    current_col: u32,
    remaining: u64,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let addr = CellAddress::new(self.current_row, self.current_col);
        self.remaining -= 1;

        if self.current_col == self.range.end.col {
            self.current_col = self.range.start.col;
            self.current_row = self.current_row.saturating_add(1);
        } else {
            self.current_col += 1;
        }

        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellRangeIterator {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellAddress::column_to_letters(0), "A");
        assert_eq!(CellAddress::column_to_letters(1), "B");
        assert_eq!(CellAddress::column_to_letters(25), "Z");
        assert_eq!(CellAddress::column_to_letters(26), "AA");
        assert_eq!(CellAddress::column_to_letters(27), "AB");
        assert_eq!(CellAddress::column_to_letters(701), "ZZ");
        assert_eq!(CellAddress::column_to_letters(702), "AAA");
        assert_eq!(CellAddress::column_to_letters(16383), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellAddress::letters_to_column("Z").unwrap(), 25);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(CellAddress::letters_to_column("XFD").unwrap(), 16383);

        // Case insensitive
        assert_eq!(CellAddress::letters_to_column("aa").unwrap(), 26);
    }

    #[test]
    fn test_encode_cell() {
        assert_eq!(encode_cell(0, 0), "A1");
        assert_eq!(encode_cell(99, 2), "C100");
        assert_eq!(encode_cell(0, 26), "AA1");
    }

    #[test]
    fn test_cell_address_parse() {
        let addr = CellAddress::parse("B2").unwrap();
        assert_eq!((addr.row, addr.col), (1, 1));

        let addr = CellAddress::parse("$C$3").unwrap();
        assert_eq!((addr.row, addr.col), (2, 2));
    }

    #[test]
    fn test_cell_address_parse_errors() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("1").is_err());
        assert!(CellAddress::parse("A0").is_err());
        assert!(CellAddress::parse("A1B").is_err());
        assert!(CellAddress::parse("A-1").is_err());
    }

    #[test]
    fn test_decode_range() {
        let range = decode_range("A1:B2").unwrap();
        assert_eq!(range.start, CellAddress::new(0, 0));
        assert_eq!(range.end, CellAddress::new(1, 1));

        let range = decode_range("C3").unwrap();
        assert_eq!(range.start, CellAddress::new(2, 2));
        assert_eq!(range.end, CellAddress::new(2, 2));

        // Reversed corners are normalized
        let range = decode_range("B2:A1").unwrap();
        assert_eq!(range.start, CellAddress::new(0, 0));
        assert_eq!(range.end, CellAddress::new(1, 1));
    }

    #[test]
    fn test_decode_range_empty_fallback() {
        let range = decode_range("").unwrap();
        assert_eq!(range.to_a1_string(), EMPTY_RANGE);
    }

    #[test]
    fn test_decode_range_malformed() {
        assert!(matches!(
            decode_range("A1:"),
            Err(Error::MalformedAddress(_))
        ));
        assert!(matches!(
            decode_range("hello"),
            Err(Error::MalformedAddress(_))
        ));
        assert!(matches!(
            decode_range("1A:B2"),
            Err(Error::MalformedAddress(_))
        ));
    }

    #[test]
    fn test_from_dimensions() {
        assert_eq!(CellRange::from_dimensions(2, 2).to_a1_string(), "A1:B2");
        assert_eq!(CellRange::from_dimensions(25, 27).to_a1_string(), "A1:AA25");
        assert_eq!(CellRange::from_dimensions(0, 0).to_a1_string(), "A1:A1");
    }

    #[test]
    fn test_cell_range_iterator() {
        let range = CellRange::parse("A1:B2").unwrap();
        let cells: Vec<_> = range.cells().collect();

        assert_eq!(range.cells().len(), 4);
        assert_eq!(cells[0], CellAddress::new(0, 0)); // A1
        assert_eq!(cells[1], CellAddress::new(0, 1)); // B1
        assert_eq!(cells[2], CellAddress::new(1, 0)); // A2
        assert_eq!(cells[3], CellAddress::new(1, 1)); // B2
    }

    #[test]
    fn test_cell_range_offset_iterator() {
        let range = CellRange::parse("B3:C3").unwrap();
        let cells: Vec<_> = range.cells().map(|a| a.to_a1_string()).collect();
        assert_eq!(cells, vec!["B3", "C3"]);
        assert!(range.contains(&CellAddress::new(2, 2)));
        assert!(!range.contains(&CellAddress::new(0, 0)));
    }
}
