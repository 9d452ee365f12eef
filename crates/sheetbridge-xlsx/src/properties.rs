//! Document properties (`docProps/core.xml` and `docProps/app.xml`)

use std::io::{BufReader, Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use sheetbridge_core::WorkbookMetadata;

use crate::error::{XlsxError, XlsxResult};

/// Which metadata field the current element feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Author,
    Subject,
    Created,
    Modified,
    Application,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"creator" => Some(Field::Author),
            b"subject" => Some(Field::Subject),
            b"created" => Some(Field::Created),
            b"modified" => Some(Field::Modified),
            b"Application" => Some(Field::Application),
            _ => None,
        }
    }

    fn slot<'a>(&self, meta: &'a mut WorkbookMetadata) -> &'a mut Option<String> {
        match self {
            Field::Title => &mut meta.title,
            Field::Author => &mut meta.author,
            Field::Subject => &mut meta.subject,
            Field::Created => &mut meta.created,
            Field::Modified => &mut meta.modified,
            Field::Application => &mut meta.application,
        }
    }
}

/// Read document properties from a zip-based workbook.
///
/// Returns `Ok(None)` when neither property part is present or both are
/// empty. `sheet_names` is left for the caller to fill.
pub fn read_properties<R: Read + Seek>(reader: R) -> XlsxResult<Option<WorkbookMetadata>> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut meta = WorkbookMetadata::default();

    for part in ["docProps/core.xml", "docProps/app.xml"] {
        let file = match archive.by_name(part) {
            Ok(f) => f,
            Err(_) => continue,
        };
        read_part(BufReader::new(file), &mut meta)?;
    }

    if meta.is_empty() {
        Ok(None)
    } else {
        Ok(Some(meta))
    }
}

fn read_part<R: std::io::BufRead>(reader: R, meta: &mut WorkbookMetadata) -> XlsxResult<()> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut current: Option<Field> = None;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                current = Field::from_local_name(e.local_name().as_ref());
            }
            Ok(Event::Text(e)) => {
                if let Some(field) = current {
                    if let Ok(text) = e.unescape() {
                        let text = text.trim();
                        if !text.is_empty() {
                            *field.slot(meta) = Some(text.to_string());
                        }
                    }
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
