//! Workbook type - the main document structure

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::sheet::Sheet;

/// A workbook: named sheets in declaration order plus optional metadata
///
/// Serializes with `sheets` as a name-to-sheet map that preserves order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WorkbookRepr")]
pub struct Workbook {
    #[serde(serialize_with = "serialize_sheets")]
    sheets: Vec<Sheet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<WorkbookMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_sheet: Option<String>,
}

impl Workbook {
    /// Create an empty workbook with no sheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get a sheet by declaration index
    pub fn sheet_at(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get a sheet by name
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Get the first declared sheet
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    /// Iterate over sheets in declaration order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Sheet names in declaration order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }

    /// Append a sheet; names must be unique (case-insensitive)
    pub fn add_sheet(&mut self, sheet: Sheet) -> Result<usize> {
        let lower = sheet.name().to_lowercase();
        if self.sheets.iter().any(|s| s.name().to_lowercase() == lower) {
            return Err(Error::DuplicateSheetName(sheet.name().to_string()));
        }

        self.sheets.push(sheet);
        Ok(self.sheets.len() - 1)
    }

    /// Get the metadata, if the source exposed any
    pub fn metadata(&self) -> Option<&WorkbookMetadata> {
        self.metadata.as_ref()
    }

    /// Set the metadata
    pub fn set_metadata(&mut self, metadata: Option<WorkbookMetadata>) {
        self.metadata = metadata;
    }

    /// Get the active sheet name
    pub fn active_sheet(&self) -> Option<&str> {
        self.active_sheet.as_deref()
    }

    /// Set the active sheet by name
    pub fn set_active_sheet(&mut self, name: &str) -> Result<()> {
        if self.sheet(name).is_none() {
            return Err(Error::SheetNotFound(name.to_string()));
        }
        self.active_sheet = Some(name.to_string());
        Ok(())
    }

    /// Row count summed over all sheets
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(Sheet::row_count).sum()
    }

    /// Widest column count over all sheets
    pub fn max_columns(&self) -> usize {
        self.sheets
            .iter()
            .map(Sheet::column_count)
            .max()
            .unwrap_or(0)
    }
}

/// Document properties, populated only when the source format exposes them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Creation timestamp as written by the producing application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sheet_names: Vec<String>,
}

impl WorkbookMetadata {
    /// Check if no field is populated
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.created.is_none()
            && self.modified.is_none()
            && self.application.is_none()
            && self.sheet_names.is_empty()
    }
}

fn serialize_sheets<S: Serializer>(sheets: &[Sheet], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(sheets.iter().map(|s| (s.name(), s)))
}

fn deserialize_sheets<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<Sheet>, D::Error> {
    struct SheetMapVisitor;

    impl<'de> Visitor<'de> for SheetMapVisitor {
        type Value = Vec<Sheet>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of sheet name to sheet")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
            let mut sheets = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, sheet)) = map.next_entry::<String, Sheet>()? {
                if key != sheet.name() {
                    return Err(serde::de::Error::custom(format!(
                        "sheet key '{}' does not match sheet name '{}'",
                        key,
                        sheet.name()
                    )));
                }
                sheets.push(sheet);
            }
            Ok(sheets)
        }
    }

    deserializer.deserialize_map(SheetMapVisitor)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkbookRepr {
    #[serde(deserialize_with = "deserialize_sheets")]
    sheets: Vec<Sheet>,
    #[serde(default)]
    metadata: Option<WorkbookMetadata>,
    #[serde(default)]
    active_sheet: Option<String>,
}

impl TryFrom<WorkbookRepr> for Workbook {
    type Error = Error;

    fn try_from(repr: WorkbookRepr) -> Result<Self> {
        let mut workbook = Workbook::new();
        for sheet in repr.sheets {
            workbook.add_sheet(sheet)?;
        }
        workbook.set_metadata(repr.metadata);
        if let Some(active) = repr.active_sheet {
            workbook.set_active_sheet(&active)?;
        }
        Ok(workbook)
    }
}
