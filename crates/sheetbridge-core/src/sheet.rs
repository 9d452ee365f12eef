//! Sheet type

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellRange};
use crate::error::{Error, Result};

/// One rectangular grid of cells
///
/// Every row holds exactly [`column_count`](Sheet::column_count) cells. Rows
/// are 0-indexed from the top-left corner of [`range`](Sheet::range).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SheetRepr", into = "SheetRepr")]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
    range: CellRange,
    column_count: usize,
}

impl Sheet {
    /// Build a sheet anchored at A1 from possibly ragged rows.
    ///
    /// Rows shorter than the widest row are padded with empty cells and the
    /// range is computed from the resulting dimensions.
    pub fn from_rows<S: Into<String>>(name: S, mut rows: Vec<Vec<Cell>>) -> Self {
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize_with(column_count, Cell::empty);
        }

        let range = CellRange::from_dimensions(rows.len(), column_count);
        Self {
            name: name.into(),
            rows,
            range,
            column_count,
        }
    }

    /// Build a sheet covering a declared range.
    ///
    /// `rows` must match the range dimensions exactly.
    pub fn with_range<S: Into<String>>(
        name: S,
        rows: Vec<Vec<Cell>>,
        range: CellRange,
    ) -> Result<Self> {
        let name = name.into();
        let expected_rows = range.row_count() as usize;
        let expected_cols = range.col_count() as usize;

        if rows.len() != expected_rows {
            return Err(Error::InvalidSheet {
                name,
                message: format!(
                    "range {} implies {} rows, got {}",
                    range, expected_rows, rows.len()
                ),
            });
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected_cols)
        {
            return Err(Error::InvalidSheet {
                name,
                message: format!(
                    "row {} has {} cells, range {} implies {}",
                    i,
                    row.len(),
                    range,
                    expected_cols
                ),
            });
        }

        Ok(Self {
            name,
            rows,
            range,
            column_count: expected_cols,
        })
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all rows
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Get a row by 0-based index
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Get a cell by 0-based row and column indices
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in every row
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// The range covered by this sheet
    pub fn range(&self) -> CellRange {
        self.range
    }

    /// The range in A1 notation (e.g. `"A1:C5"`)
    pub fn range_address(&self) -> String {
        self.range.to_a1_string()
    }

    /// Check if the sheet holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetRepr {
    name: String,
    rows: Vec<Vec<Cell>>,
    range_address: String,
    row_count: usize,
    column_count: usize,
}

impl From<Sheet> for SheetRepr {
    fn from(sheet: Sheet) -> Self {
        SheetRepr {
            range_address: sheet.range_address(),
            row_count: sheet.row_count(),
            column_count: sheet.column_count,
            name: sheet.name,
            rows: sheet.rows,
        }
    }
}

impl TryFrom<SheetRepr> for Sheet {
    type Error = Error;

    fn try_from(repr: SheetRepr) -> Result<Self> {
        let sheet = if repr.rows.is_empty() {
            Sheet::from_rows(repr.name, repr.rows)
        } else {
            let range = CellRange::parse(&repr.range_address)?;
            Sheet::with_range(repr.name, repr.rows, range)?
        };

        if sheet.row_count() != repr.row_count || sheet.column_count() != repr.column_count {
            return Err(Error::InvalidSheet {
                name: sheet.name,
                message: format!(
                    "declared {}x{} but rows are {}x{}",
                    repr.row_count,
                    repr.column_count,
                    sheet.rows.len(),
                    sheet.column_count
                ),
            });
        }

        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    #[test]
    fn test_from_rows_pads_ragged_rows() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![Cell::new(1.0), Cell::new(2.0), Cell::new(3.0)],
                vec![Cell::new("a")],
                vec![],
            ],
        );

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.column_count(), 3);
        assert_eq!(sheet.range_address(), "A1:C3");
        assert!(sheet.rows().iter().all(|r| r.len() == 3));
        assert_eq!(sheet.cell(1, 2), Some(&Cell::empty()));
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = Sheet::from_rows("Empty", Vec::new());
        assert!(sheet.is_empty());
        assert_eq!(sheet.column_count(), 0);
        assert_eq!(sheet.range_address(), "A1:A1");
    }

    #[test]
    fn test_with_range_checks_dimensions() {
        let range = CellRange::parse("B2:C2").unwrap();
        let ok = Sheet::with_range("S", vec![vec![Cell::new(1.0), Cell::empty()]], range);
        assert_eq!(ok.unwrap().range_address(), "B2:C2");

        let bad = Sheet::with_range("S", vec![vec![Cell::new(1.0)]], range);
        assert!(matches!(bad, Err(Error::InvalidSheet { .. })));
    }

    #[test]
    fn test_sheet_serde_shape() {
        let sheet = Sheet::from_rows("Data", vec![vec![Cell::new(CellValue::Number(1.0))]]);
        let value = serde_json::to_value(&sheet).unwrap();

        assert_eq!(value["name"], "Data");
        assert_eq!(value["rangeAddress"], "A1:A1");
        assert_eq!(value["rowCount"], 1);
        assert_eq!(value["columnCount"], 1);
        assert_eq!(value["rows"][0][0]["type"], "number");

        let back: Sheet = serde_json::from_value(value).unwrap();
        assert_eq!(back, sheet);
    }

    #[test]
    fn test_sheet_rejects_inconsistent_counts() {
        let json = r#"{"name":"S","rows":[[{"value":1,"type":"number"}]],
            "rangeAddress":"A1:A1","rowCount":2,"columnCount":1}"#;
        assert!(serde_json::from_str::<Sheet>(json).is_err());
    }
}
