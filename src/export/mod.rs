//! Export module for Outlay
//!
//! Builds spreadsheet reports as a sheet value model and renders them to
//! XLSX. The layout lives in `report`, the value model in `sheet`, and the
//! binary codec boundary in `workbook`.

pub mod report;
pub mod sheet;
pub mod workbook;

pub use report::{export_report, report_filename};
pub use sheet::{Cell, Sheet};
pub use workbook::render_workbook;
