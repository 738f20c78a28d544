//! Row type
//!
//! A row owns its cells in strictly ascending column order. The container
//! format requires cells to appear in reference order within a row, so the
//! insertion path keeps the sequence sorted instead of sorting at write
//! time.

use crate::cell::{Cell, CellAddress};

/// A worksheet row holding its cells in reference order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Row number (1-based)
    pub index: u32,
    cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    /// Get the cell at `address`, if present
    pub fn cell(&self, address: &CellAddress) -> Option<&Cell> {
        self.cells.iter().find(|c| c.address == *address)
    }

    /// Get or create the cell at `address`.
    ///
    /// A new cell is inserted before the first existing cell whose rendered
    /// reference compares greater (case-insensitive string comparison),
    /// appending when none does. The get path guarantees a row never holds
    /// two cells with the same address.
    pub fn cell_mut(&mut self, address: CellAddress) -> &mut Cell {
        if let Some(pos) = self.cells.iter().position(|c| c.address == address) {
            return &mut self.cells[pos];
        }

        let reference = address.to_a1_string();
        let insert_at = self
            .cells
            .iter()
            .position(|c| compare_refs(&c.reference(), &reference) == std::cmp::Ordering::Greater)
            .unwrap_or(self.cells.len());

        self.cells.insert(insert_at, Cell::new(address));
        &mut self.cells[insert_at]
    }

    /// Cells in reference order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells in the row
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Case-insensitive string comparison of two rendered cell references.
fn compare_refs(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_ascii_uppercase().cmp(&b.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[test]
    fn test_cells_stay_ordered_on_insertion() {
        let mut row = Row::new(1);

        // Out-of-order insertion ends up in reference order
        row.cell_mut(addr("C1"));
        row.cell_mut(addr("A1"));
        row.cell_mut(addr("B1"));

        let refs: Vec<String> = row.cells().iter().map(|c| c.reference()).collect();
        assert_eq!(refs, vec!["A1", "B1", "C1"]);
    }

    #[test]
    fn test_cell_mut_reuses_existing_cell() {
        let mut row = Row::new(3);

        row.cell_mut(addr("B3")).value = CellValue::SharedString(0);
        assert_eq!(row.cell_count(), 1);

        let cell = row.cell_mut(addr("B3"));
        assert_eq!(cell.address, addr("B3"));
        assert_eq!(cell.value, CellValue::SharedString(0));
        assert_eq!(row.cell_count(), 1);
    }

    #[test]
    fn test_append_when_no_greater_reference() {
        let mut row = Row::new(2);

        row.cell_mut(addr("A2"));
        row.cell_mut(addr("D2"));

        let refs: Vec<String> = row.cells().iter().map(|c| c.reference()).collect();
        assert_eq!(refs, vec!["A2", "D2"]);
    }

    #[test]
    fn test_lookup_misses() {
        let mut row = Row::new(1);
        row.cell_mut(addr("B1"));
        assert!(row.cell(&addr("A1")).is_none());
        assert!(row.cell(&addr("B1")).is_some());
    }
}
