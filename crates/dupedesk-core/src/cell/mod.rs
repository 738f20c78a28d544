//! Cell types

pub mod address;

pub use address::CellAddress;

/// The value stored in a cell.
///
/// Text is never stored inline; it lives in the workbook's
/// [`SharedStringTable`](crate::SharedStringTable) and the cell keeps the
/// entry's index. Numbers keep their literal decimal text so the written
/// container reproduces exactly what the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// No value set (style-only or freshly created cell)
    Empty,
    /// Index into the workbook's shared-string table
    SharedString(usize),
    /// Literal decimal text of a numeric value
    Number(String),
}

impl CellValue {
    /// Shared-string index, if this is a text cell
    pub fn shared_string_index(&self) -> Option<usize> {
        match self {
            CellValue::SharedString(idx) => Some(*idx),
            _ => None,
        }
    }

    /// Literal numeric text, if this is a numeric cell
    pub fn as_number_text(&self) -> Option<&str> {
        match self {
            CellValue::Number(text) => Some(text),
            _ => None,
        }
    }
}

/// A single cell within a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cell reference within the worksheet
    pub address: CellAddress,
    /// Cell value
    pub value: CellValue,
    /// Style index; 0 means the default style and is not written out
    pub style_index: u32,
}

impl Cell {
    /// Create an empty cell at the given address
    pub fn new(address: CellAddress) -> Self {
        Self {
            address,
            value: CellValue::Empty,
            style_index: 0,
        }
    }

    /// The canonical A1-style reference of this cell
    pub fn reference(&self) -> String {
        self.address.to_a1_string()
    }
}
