//! JSON and YAML serialization of the whole workbook

use sheetbridge_core::Workbook;

use crate::error::Result;

/// Pretty-printed JSON
pub fn to_json(workbook: &Workbook) -> Result<String> {
    Ok(serde_json::to_string_pretty(workbook)?)
}

pub fn to_yaml(workbook: &Workbook) -> Result<String> {
    Ok(serde_yaml::to_string(workbook)?)
}

/// Parse JSON produced by [`to_json`], validating every cell's type tag
pub fn parse_json(text: &str) -> Result<Workbook> {
    Ok(serde_json::from_str(text)?)
}

/// Parse YAML produced by [`to_yaml`], validating every cell's type tag
pub fn parse_yaml(text: &str) -> Result<Workbook> {
    Ok(serde_yaml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sheetbridge_core::{Cell, CellValue, Sheet};

    fn workbook() -> Workbook {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![Cell::new(1.0), Cell::new(true)],
                vec![Cell::new(CellValue::date(date))],
            ],
        );
        let mut wb = Workbook::new();
        wb.add_sheet(sheet).unwrap();
        wb
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&workbook()).unwrap()).unwrap();
        let sheet = &json["sheets"]["Sheet1"];

        assert_eq!(sheet["rangeAddress"], "A1:B2");
        assert_eq!(sheet["rowCount"], 2);
        assert_eq!(sheet["columnCount"], 2);
        assert_eq!(sheet["rows"][0][0]["value"], 1.0);
        assert_eq!(sheet["rows"][0][0]["type"], "number");
        assert_eq!(sheet["rows"][1][0]["value"], "2024-01-01T00:00:00");
        assert_eq!(sheet["rows"][1][1]["value"], serde_json::Value::Null);
        assert_eq!(sheet["rows"][1][1]["type"], "string");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let wb = workbook();
        let text = to_yaml(&wb).unwrap();
        assert_eq!(parse_yaml(&text).unwrap(), wb);
    }

    #[test]
    fn test_json_type_mismatch_rejected() {
        let text = r#"{"sheets": {"S": {"name": "S", "rows": [[{"value": "x", "type": "number"}]],
            "rangeAddress": "A1:A1", "rowCount": 1, "columnCount": 1}}}"#;
        assert!(parse_json(text).is_err());
    }
}
