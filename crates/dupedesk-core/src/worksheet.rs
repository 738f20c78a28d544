//! Worksheet type

use crate::sheet_data::SheetData;

/// A single worksheet: a name plus its row/cell store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worksheet {
    name: String,
    data: SheetData,
}

impl Worksheet {
    /// Create an empty worksheet with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: SheetData::new(),
        }
    }

    /// The worksheet name (unique within its workbook)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the worksheet (uniqueness is the workbook's concern)
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// The row/cell store
    pub fn data(&self) -> &SheetData {
        &self.data
    }

    /// The row/cell store, mutable
    pub fn data_mut(&mut self) -> &mut SheetData {
        &mut self.data
    }
}
