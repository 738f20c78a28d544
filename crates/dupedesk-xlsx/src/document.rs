//! Workbook document session
//!
//! [`XlsxDocument`] is the scoped open/mutate/save surface over a persisted
//! container. Every mutating call writes the whole package back to disk
//! before returning, so a crash between calls never loses an acknowledged
//! update. [`update_cell`] is the degenerate one-update session: open,
//! apply, implicit save.

use std::path::{Path, PathBuf};

use crate::error::XlsxResult;
use crate::reader::XlsxReader;
use crate::writer::XlsxWriter;
use dupedesk_core::{CellAddress, CellValue, Workbook};

/// An XLSX file opened for in-place mutation.
#[derive(Debug)]
pub struct XlsxDocument {
    path: PathBuf,
    workbook: Workbook,
}

impl XlsxDocument {
    /// Create a new container at `path` with a single empty worksheet and
    /// an empty shared-string table, replacing any existing file.
    pub fn create<P: AsRef<Path>>(path: P, sheet_name: &str) -> XlsxResult<Self> {
        let workbook = Workbook::new(sheet_name)?;
        let doc = Self {
            path: path.as_ref().to_path_buf(),
            workbook,
        };
        doc.save()?;
        log::info!(
            "created workbook '{}' with sheet '{}'",
            doc.path.display(),
            sheet_name
        );
        Ok(doc)
    }

    /// Open an existing container at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let workbook = XlsxReader::read_file(&path)?;
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            workbook,
        })
    }

    /// The in-memory workbook
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// The file backing this document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set the value of the cell at `address` on the sheet named
    /// `sheet_name`, persisting the container before returning.
    ///
    /// Returns `Ok(false)` without mutating anything when no sheet has
    /// that name; the caller decides whether that is worth surfacing.
    ///
    /// Text values are interned into the workbook's shared-string table
    /// and the cell stores the entry index; non-text values store the
    /// literal decimal text. A `style_index` of 0 leaves the default
    /// style untouched.
    pub fn set_cell_value(
        &mut self,
        sheet_name: &str,
        address: &str,
        value: &str,
        style_index: u32,
        is_text: bool,
    ) -> XlsxResult<bool> {
        if self.workbook.worksheet_by_name(sheet_name).is_none() {
            log::warn!("sheet '{}' not found, cell update skipped", sheet_name);
            return Ok(false);
        }

        let address = CellAddress::parse(address)?;

        let cell_value = if is_text {
            let index = self.workbook.shared_strings_mut().intern(value);
            CellValue::SharedString(index)
        } else {
            CellValue::Number(value.to_string())
        };

        // Checked above, still present
        let sheet = self.workbook.worksheet_by_name_mut(sheet_name).unwrap();
        let cell = sheet.data_mut().cell_mut(address);
        cell.value = cell_value;
        if style_index > 0 {
            cell.style_index = style_index;
        }

        self.save()?;
        Ok(true)
    }

    /// Persist the workbook to its backing file
    pub fn save(&self) -> XlsxResult<()> {
        XlsxWriter::write_file(&self.workbook, &self.path)
    }
}

/// Update a single cell as an independent open-mutate-save round trip.
///
/// Opens the container at `path`, applies one [`XlsxDocument::set_cell_value`]
/// and returns its result; the save is implicit in the session contract.
pub fn update_cell<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
    address: &str,
    value: &str,
    style_index: u32,
    is_text: bool,
) -> XlsxResult<bool> {
    let mut doc = XlsxDocument::open(path)?;
    doc.set_cell_value(sheet_name, address, value, style_index, is_text)
}
