//! Workbook type - the main document structure

use crate::error::{Error, Result};
use crate::shared_strings::SharedStringTable;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// A workbook owns one or more worksheets and exactly one shared-string
/// table; cell text anywhere in the document references that table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    shared_strings: SharedStringTable,
}

impl Workbook {
    /// Create a new workbook with a single, empty worksheet
    pub fn new(sheet_name: &str) -> Result<Self> {
        let mut wb = Self::empty();
        wb.add_worksheet(sheet_name)?;
        Ok(wb)
    }

    /// Create a workbook with no worksheets (used when loading a container)
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            shared_strings: SharedStringTable::new(),
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get a mutable worksheet by name
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets.iter_mut().find(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with the given name
    pub fn add_worksheet(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        Ok(index)
    }

    /// The workbook's shared-string table
    pub fn shared_strings(&self) -> &SharedStringTable {
        &self.shared_strings
    }

    /// The workbook's shared-string table, mutable
    pub fn shared_strings_mut(&mut self) -> &mut SharedStringTable {
        &mut self.shared_strings
    }

    /// Replace the shared-string table (used when loading a container)
    pub fn set_shared_strings(&mut self, table: SharedStringTable) {
        self.shared_strings = table;
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.len() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        for c in INVALID_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "Sheet name cannot contain '{}'",
                    c
                )));
            }
        }

        // Duplicate names are rejected case-insensitively
        let name_lower = name.to_lowercase();
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == name_lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new("Duplicates").unwrap();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.worksheet(0).unwrap().name(), "Duplicates");
        assert!(wb.shared_strings().is_empty());
    }

    #[test]
    fn test_worksheet_by_name() {
        let mut wb = Workbook::new("Report").unwrap();
        wb.add_worksheet("Extra").unwrap();

        assert!(wb.worksheet_by_name("Extra").is_some());
        assert!(wb.worksheet_by_name("Missing").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut wb = Workbook::new("Report").unwrap();
        assert!(wb.add_worksheet("REPORT").is_err());
        assert!(wb.add_worksheet("report").is_err());
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::empty();
        assert!(wb.add_worksheet("").is_err());
        assert!(wb.add_worksheet("Sheet/1").is_err());
        assert!(wb.add_worksheet("Sheet:1").is_err());
        assert!(wb.add_worksheet(&"A".repeat(MAX_SHEET_NAME_LEN + 1)).is_err());
    }
}
