//! # dupedesk-core
//!
//! Core data structures for the dupedesk spreadsheet model:
//! - [`CellAddress`] - A1-style cell addressing
//! - [`Cell`], [`CellValue`], [`Row`], [`SheetData`] - the ordered row/cell store
//! - [`SharedStringTable`] - deduplicated string pool referenced by index
//! - [`Workbook`], [`Worksheet`] - the document structures
//!
//! ## Example
//!
//! ```rust
//! use dupedesk_core::{CellAddress, CellValue, Workbook};
//!
//! let mut workbook = Workbook::new("Report").unwrap();
//! let idx = workbook.shared_strings_mut().intern("Hello");
//!
//! let sheet = workbook.worksheet_by_name_mut("Report").unwrap();
//! let addr = CellAddress::parse("A1").unwrap();
//! sheet.data_mut().cell_mut(addr).value = CellValue::SharedString(idx);
//! ```

pub mod cell;
pub mod error;
pub mod row;
pub mod shared_strings;
pub mod sheet_data;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellValue};
pub use error::{Error, Result};
pub use row::Row;
pub use shared_strings::SharedStringTable;
pub use sheet_data::SheetData;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit, 1-based)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit, 1-based)
pub const MAX_COLS: u32 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
