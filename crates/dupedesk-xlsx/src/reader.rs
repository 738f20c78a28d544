//! XLSX reader
//!
//! Reads back only what the writer emits: sheet names, the shared-string
//! table, and cell values (shared-string references and numeric literals).
//! Styling, formulas, and other parts are out of scope.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use dupedesk_core::{CellAddress, CellValue, SharedStringTable, Workbook};

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();
        workbook.set_shared_strings(SharedStringTable::from_entries(shared_strings));

        for (name, r_id) in &sheet_info {
            if let Some(path) = sheet_paths.get(r_id) {
                workbook.add_worksheet(name)?;
                let sheet = workbook.worksheet_by_name_mut(name).unwrap();
                Self::read_worksheet(&mut archive, path, sheet)?;
            }
        }

        Ok(workbook)
    }

    /// Read the shared strings table; a missing part is an empty table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"t" if in_si => {
                        in_t = true;
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(std::mem::take(&mut current_string));
                        in_si = false;
                    }
                    b"t" => {
                        in_t = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let mut name = None;
                    let mut r_id = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => {
                                name = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"r:id" => {
                                r_id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    // Only worksheet relationships matter here
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to the xl/ folder
                            let full_path = if let Some(stripped) = target.strip_prefix('/') {
                                stripped.to_string()
                            } else {
                                format!("xl/{}", target)
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet's cell data from the archive
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut dupedesk_core::Worksheet,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();

        let mut current_cell_ref: Option<String> = None;
        let mut current_cell_type: Option<String> = None;
        let mut current_cell_style: Option<u32> = None;
        let mut current_value: Option<String> = None;
        let mut in_cell = false;
        let mut in_value = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.name().as_ref() == b"c" => {
                    in_cell = true;
                    current_cell_ref = None;
                    current_cell_type = None;
                    current_cell_style = None;
                    current_value = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"r" => {
                                current_cell_ref =
                                    attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"t" => {
                                current_cell_type =
                                    attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"s" => {
                                current_cell_style = attr
                                    .unescape_value()
                                    .ok()
                                    .and_then(|s| s.parse::<u32>().ok());
                            }
                            _ => {}
                        }
                    }
                }
                Ok(Event::Empty(e)) if e.name().as_ref() == b"c" => {
                    // Self-closing cell: style-only, no value element follows
                    let mut cell_ref = None;
                    let mut cell_style = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"r" => {
                                cell_ref = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"s" => {
                                cell_style = attr
                                    .unescape_value()
                                    .ok()
                                    .and_then(|s| s.parse::<u32>().ok());
                            }
                            _ => {}
                        }
                    }
                    Self::store_cell(worksheet, cell_ref, None, cell_style, None)?;
                }
                Ok(Event::Start(e)) if e.name().as_ref() == b"v" && in_cell => {
                    in_value = true;
                }
                Ok(Event::Text(e)) if in_value => {
                    if let Ok(text) = e.unescape() {
                        current_value = Some(text.to_string());
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"v" => {
                        in_value = false;
                    }
                    b"c" => {
                        Self::store_cell(
                            worksheet,
                            current_cell_ref.take(),
                            current_cell_type.take(),
                            current_cell_style.take(),
                            current_value.take(),
                        )?;
                        in_cell = false;
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Materialize one parsed `<c>` element into the worksheet
    fn store_cell(
        worksheet: &mut dupedesk_core::Worksheet,
        cell_ref: Option<String>,
        cell_type: Option<String>,
        cell_style: Option<u32>,
        value: Option<String>,
    ) -> XlsxResult<()> {
        let Some(cell_ref) = cell_ref else {
            return Ok(());
        };

        let address = CellAddress::parse(&cell_ref)?;
        let cell = worksheet.data_mut().cell_mut(address);

        if let Some(style) = cell_style {
            cell.style_index = style;
        }

        match (cell_type.as_deref(), value) {
            (Some("s"), Some(v)) => {
                let index = v
                    .parse::<usize>()
                    .map_err(|_| XlsxError::Parse(format!("bad shared-string index '{}'", v)))?;
                cell.value = CellValue::SharedString(index);
            }
            (_, Some(v)) => {
                cell.value = CellValue::Number(v);
            }
            (_, None) => {
                // Style-only cell, leave value empty
            }
        }

        Ok(())
    }
}
