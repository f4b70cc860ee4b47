//! XLSX rendering
//!
//! Renders the sheet value model to a binary workbook. This is the only
//! module that touches the spreadsheet codec.

use rust_xlsxwriter::Workbook;

use crate::error::OutlayResult;
use crate::export::sheet::{Cell, Sheet};

/// Render sheets to an XLSX byte buffer
pub fn render_workbook(sheets: &[Sheet]) -> OutlayResult<Vec<u8>> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name.as_str())?;

        for (index, width) in sheet.column_widths.iter().enumerate() {
            worksheet.set_column_width(index as u16, *width)?;
        }

        for (row, cells) in sheet.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Cell::Text(value) => {
                        worksheet.write_string(row as u32, col as u16, value.as_str())?;
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row as u32, col as u16, *value)?;
                    }
                    Cell::Empty => {}
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
