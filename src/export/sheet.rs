//! Sheet value model
//!
//! Exported workbooks are assembled as plain rows-of-rows values first and
//! rendered to XLSX by the workbook module afterwards. Keeping the layout as
//! data makes sheet content testable without parsing binary output.

use chrono::NaiveDate;

use crate::models::Money;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Monetary cell, written in whole currency units
    pub fn money(amount: Money) -> Self {
        Self::Number(amount.to_unit_f64())
    }

    pub fn count(value: usize) -> Self {
        Self::Number(value as f64)
    }

    pub fn date(value: NaiveDate) -> Self {
        Self::Text(value.format("%Y-%m-%d").to_string())
    }

    pub fn yes_no(flag: bool) -> Self {
        Self::Text(if flag { "Yes" } else { "No" }.to_string())
    }
}

/// A named sheet with column widths and rows of cells
///
/// Rows may be ragged; missing trailing cells render as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub column_widths: Vec<f64>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, column_widths: &[f64]) -> Self {
        Self {
            name: name.into(),
            column_widths: column_widths.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    /// Append an empty spacer row
    pub fn push_blank(&mut self) {
        self.rows.push(Vec::new());
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_constructors() {
        assert_eq!(Cell::text("hello"), Cell::Text("hello".to_string()));
        assert_eq!(Cell::money(Money::from_cents(1050)), Cell::Number(10.5));
        assert_eq!(Cell::count(7), Cell::Number(7.0));
        assert_eq!(Cell::yes_no(true), Cell::Text("Yes".to_string()));
        assert_eq!(Cell::yes_no(false), Cell::Text("No".to_string()));

        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(Cell::date(date), Cell::Text("2025-03-15".to_string()));
    }

    #[test]
    fn test_sheet_rows() {
        let mut sheet = Sheet::new("Summary", &[20.0, 15.0]);
        sheet.push_row(vec![Cell::text("Title")]);
        sheet.push_blank();
        sheet.push_row(vec![Cell::text("Metric"), Cell::text("Value")]);

        assert_eq!(sheet.name, "Summary");
        assert_eq!(sheet.column_widths, vec![20.0, 15.0]);
        assert_eq!(sheet.row_count(), 3);
        assert!(sheet.rows[1].is_empty());
    }
}
