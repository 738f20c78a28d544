//! Sheet data store
//!
//! Rows are kept in an append-only collection and looked up linearly by
//! row number. Rows are not sorted by index: the first reference to a row
//! appends it, later references reuse it, matching how the container's
//! sheetData element accumulates rows as they are first touched.

use crate::cell::{Cell, CellAddress};
use crate::row::Row;

/// The ordered row/cell collection of a worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetData {
    rows: Vec<Row>,
}

impl SheetData {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the row with the given 1-based index, if present
    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.iter().find(|r| r.index == index)
    }

    /// Get or create the row with the given 1-based index.
    ///
    /// A missing row is created empty and appended to the collection.
    pub fn row_mut(&mut self, index: u32) -> &mut Row {
        if let Some(pos) = self.rows.iter().position(|r| r.index == index) {
            return &mut self.rows[pos];
        }
        self.rows.push(Row::new(index));
        self.rows.last_mut().unwrap()
    }

    /// Get or create the cell at `address`, creating its row as needed
    pub fn cell_mut(&mut self, address: CellAddress) -> &mut Cell {
        self.row_mut(address.row).cell_mut(address)
    }

    /// Get the cell at `address`, if present
    pub fn cell(&self, address: &CellAddress) -> Option<&Cell> {
        self.row(address.row).and_then(|r| r.cell(address))
    }

    /// Rows in first-touched order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows that have been touched
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows have been touched
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[test]
    fn test_row_created_lazily_and_reused() {
        let mut data = SheetData::new();
        assert!(data.row(5).is_none());

        data.row_mut(5);
        assert_eq!(data.row_count(), 1);

        data.row_mut(5);
        assert_eq!(data.row_count(), 1);
    }

    #[test]
    fn test_rows_keep_first_touched_order() {
        let mut data = SheetData::new();
        data.row_mut(3);
        data.row_mut(1);
        data.row_mut(2);

        let indices: Vec<u32> = data.rows().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![3, 1, 2]);
    }

    #[test]
    fn test_cell_mut_routes_to_owning_row() {
        let mut data = SheetData::new();
        data.cell_mut(addr("B2")).value = CellValue::Number("42".into());

        assert_eq!(data.row_count(), 1);
        let cell = data.cell(&addr("B2")).unwrap();
        assert_eq!(cell.value, CellValue::Number("42".into()));
        assert!(data.cell(&addr("A2")).is_none());
    }
}
