//! XLSX writer
//!
//! Persists row-major value grids as a new workbook. Only values (and
//! optionally formulas) are written; dates get a single built-in date-time
//! style so readers recognise them.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::error::{XlsxError, XlsxResult};
use crate::serial::datetime_to_serial;
use sheetbridge_core::{encode_cell, CellValue, Sheet};

/// One value in a grid, with the formula that produced it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridCell {
    pub value: CellValue,
    pub formula: Option<String>,
}

/// A named row-major grid ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<GridCell>>,
}

impl SheetGrid {
    /// Materialize a sheet as a grid, keeping formulas only when asked to
    pub fn from_sheet(sheet: &Sheet, preserve_formulas: bool) -> Self {
        let rows = sheet
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| GridCell {
                        value: cell.value.clone(),
                        formula: if preserve_formulas {
                            cell.formula.clone()
                        } else {
                            None
                        },
                    })
                    .collect()
            })
            .collect();

        Self {
            name: sheet.name().to_string(),
            rows,
        }
    }
}

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write grids to a file path
    pub fn write_file<P: AsRef<Path>>(grids: &[SheetGrid], path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(grids, file)
    }

    /// Write grids to a writer
    pub fn write<W: Write + Seek>(grids: &[SheetGrid], writer: W) -> XlsxResult<()> {
        if grids.is_empty() {
            return Err(XlsxError::EmptyWorkbook);
        }

        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip, grids.len())?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, grids)?;
        Self::write_workbook_rels(&mut zip, grids.len())?;
        Self::write_styles_xml(&mut zip)?;

        for (i, grid) in grids.iter().enumerate() {
            Self::write_worksheet(&mut zip, i, grid)?;
        }

        zip.finish()?;
        log::debug!("wrote workbook with {} sheets", grids.len());
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet_count: usize,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..sheet_count {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        grids: &[SheetGrid],
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, grid) in grids.iter().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(&grid.name),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet_count: usize,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..sheet_count {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
            sheet_count + 1
        ));

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Style 0 is the default, style 1 applies built-in format 22 (`m/d/yy h:mm`)
    fn write_styles_xml<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
    <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="2">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
        <xf numFmtId="22" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
    </cellXfs>
    <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        index: usize,
        grid: &SheetGrid,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
        );

        for (r, row) in grid.rows.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .filter_map(|(c, cell)| Self::cell_xml(&encode_cell(r as u32, c as u32), cell))
                .collect();

            // Rows with nothing to write are omitted
            if cells.is_empty() {
                continue;
            }

            content.push_str(&format!("\n        <row r=\"{}\">", r + 1));
            for cell in cells {
                content.push_str("\n            ");
                content.push_str(&cell);
            }
            content.push_str("\n        </row>");
        }

        content.push_str(
            r#"
    </sheetData>
</worksheet>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// XML for one cell, or `None` for an empty cell without a formula
    fn cell_xml(addr: &str, cell: &GridCell) -> Option<String> {
        let formula = cell
            .formula
            .as_deref()
            .map(|f| f.strip_prefix('=').unwrap_or(f))
            .filter(|f| !f.is_empty())
            .map(|f| format!("<f>{}</f>", escape_xml(f)))
            .unwrap_or_default();

        let xml = match &cell.value {
            CellValue::Empty if formula.is_empty() => return None,
            CellValue::Empty => format!(r#"<c r="{}">{}</c>"#, addr, formula),
            CellValue::Number(n) => format!(r#"<c r="{}">{}<v>{}</v></c>"#, addr, formula, n),
            CellValue::Boolean(b) => format!(
                r#"<c r="{}" t="b">{}<v>{}</v></c>"#,
                addr,
                formula,
                if *b { 1 } else { 0 }
            ),
            CellValue::Date(d) => format!(
                r#"<c r="{}" s="1">{}<v>{}</v></c>"#,
                addr,
                formula,
                datetime_to_serial(*d)
            ),
            CellValue::Error(code) => format!(
                r#"<c r="{}" t="e">{}<v>{}</v></c>"#,
                addr,
                formula,
                escape_xml(code)
            ),
            // Inline strings cannot carry a formula
            CellValue::String(s) if !formula.is_empty() => format!(
                r#"<c r="{}" t="str">{}<v>{}</v></c>"#,
                addr,
                formula,
                escape_xml(s)
            ),
            CellValue::String(s) => format!(
                r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                addr,
                escape_xml(s)
            ),
        };
        Some(xml)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
