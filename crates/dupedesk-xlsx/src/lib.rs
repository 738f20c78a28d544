//! # dupedesk-xlsx
//!
//! XLSX container IO for dupedesk: a writer that serializes a
//! [`Workbook`](dupedesk_core::Workbook) into the zipped OOXML package, a
//! reader that loads it back, and [`XlsxDocument`] - an open/mutate/save
//! session that persists every cell update before returning.

pub mod document;
pub mod error;
pub mod reader;
pub mod writer;

pub use document::{update_cell, XlsxDocument};
pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
