//! XLSX writer

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::error::XlsxResult;
use dupedesk_core::{CellValue, Workbook};

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path, replacing any existing file
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_shared_strings(&mut zip, workbook)?;

        for i in 0..workbook.sheet_count() {
            Self::write_worksheet(&mut zip, workbook, i)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
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
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                Self::escape_xml(sheet.name()),
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
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        let strings_rid = workbook.sheet_count() + 1;
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
            strings_rid
        ));

        content.push_str(
            r#"
</Relationships>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_shared_strings<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/sharedStrings.xml", options)?;

        let table = workbook.shared_strings();
        // count is total cell references to the table, uniqueCount its size
        let reference_count: usize = workbook
            .worksheets()
            .flat_map(|sheet| sheet.data().rows())
            .flat_map(|row| row.cells())
            .filter(|cell| matches!(cell.value, CellValue::SharedString(_)))
            .count();
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
            reference_count,
            table.len()
        );

        for entry in table.iter() {
            content.push_str(&format!(
                "\n    <si><t>{}</t></si>",
                Self::escape_xml(entry)
            ));
        }

        content.push_str("\n</sst>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
        index: usize,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let sheet = workbook
            .worksheet(index)
            .ok_or_else(|| crate::XlsxError::InvalidFormat("Sheet not found".into()))?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
        );

        for row in sheet.data().rows() {
            content.push_str(&format!("\n        <row r=\"{}\">", row.index));

            for cell in row.cells() {
                let style_attr = if cell.style_index > 0 {
                    format!(" s=\"{}\"", cell.style_index)
                } else {
                    String::new()
                };

                match &cell.value {
                    CellValue::SharedString(idx) => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"{} t=\"s\"><v>{}</v></c>",
                            cell.reference(),
                            style_attr,
                            idx
                        ));
                    }
                    CellValue::Number(text) => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"{}><v>{}</v></c>",
                            cell.reference(),
                            style_attr,
                            Self::escape_xml(text)
                        ));
                    }
                    CellValue::Empty => {
                        // Preserve style-only cells
                        if cell.style_index > 0 {
                            content.push_str(&format!(
                                "\n            <c r=\"{}\"{} />",
                                cell.reference(),
                                style_attr
                            ));
                        }
                    }
                }
            }

            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn escape_xml(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupedesk_core::CellAddress;
    use std::io::{Cursor, Read};

    fn shared_strings_part(workbook: &Workbook) -> String {
        let mut buf = Cursor::new(Vec::new());
        XlsxWriter::write(workbook, &mut buf).unwrap();

        let mut archive = zip::ZipArchive::new(buf).unwrap();
        let mut part = archive.by_name("xl/sharedStrings.xml").unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_shared_strings_count_is_total_references() {
        let mut workbook = Workbook::new("Report").unwrap();
        let ann = workbook.shared_strings_mut().intern("Ann");
        let bo = workbook.shared_strings_mut().intern("Bo");

        let sheet = workbook.worksheet_by_name_mut("Report").unwrap();
        let data = sheet.data_mut();
        data.cell_mut(CellAddress::parse("A1").unwrap()).value = CellValue::SharedString(ann);
        data.cell_mut(CellAddress::parse("A2").unwrap()).value = CellValue::SharedString(ann);
        data.cell_mut(CellAddress::parse("B1").unwrap()).value = CellValue::SharedString(bo);

        // "Ann" is referenced twice, "Bo" once: 3 references, 2 entries
        let content = shared_strings_part(&workbook);
        assert!(content.contains(r#"count="3" uniqueCount="2""#), "{}", content);
    }

    #[test]
    fn test_shared_strings_count_of_empty_workbook() {
        let workbook = Workbook::new("Report").unwrap();
        let content = shared_strings_part(&workbook);
        assert!(content.contains(r#"count="0" uniqueCount="0""#), "{}", content);
    }
}
