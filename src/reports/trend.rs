//! Monthly trend report
//!
//! Expense and GST totals for the six calendar months ending at the current
//! month, with relative bar widths for terminal charts.

use chrono::{Datelike, Months, NaiveDate};

use crate::display::report::format_bar;
use crate::error::OutlayResult;
use crate::models::period::{first_of_month, month_name};
use crate::models::{Expense, Money};
use crate::storage::Storage;

/// Number of calendar months covered by the trend
pub const TREND_MONTHS: u32 = 6;

/// One month of the trend series
#[derive(Debug, Clone)]
pub struct TrendMonth {
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Abbreviated month name, e.g. "Mar"
    pub label: String,
    /// Total expense amount in the month
    pub total: Money,
    /// Total GST in the month (flagged expenses only)
    pub gst: Money,
    /// Bar width relative to the busiest month, 0-100
    pub total_pct: f64,
    /// GST bar width relative to the highest-GST month, 0-100
    pub gst_pct: f64,
}

/// Six-month expense and GST trend, oldest month first
#[derive(Debug, Clone)]
pub struct MonthlyTrend {
    pub months: Vec<TrendMonth>,
}

impl MonthlyTrend {
    /// Generate the trend ending at today's month from stored records
    pub fn generate(storage: &Storage, today: NaiveDate) -> OutlayResult<Self> {
        let expenses = storage.expenses.get_all()?;
        Ok(Self::from_expenses(&expenses, today))
    }

    /// Build the trend series from an expense slice
    pub fn from_expenses(expenses: &[Expense], today: NaiveDate) -> Self {
        let current = first_of_month(today);

        let mut months: Vec<TrendMonth> = (0..TREND_MONTHS)
            .rev()
            .map(|back| {
                let month_start = current
                    .checked_sub_months(Months::new(back))
                    .unwrap_or(current);

                let mut total = Money::zero();
                let mut gst = Money::zero();
                for expense in expenses.iter().filter(|e| {
                    e.date.year() == month_start.year() && e.date.month() == month_start.month()
                }) {
                    total += expense.amount;
                    gst += expense.effective_gst();
                }

                TrendMonth {
                    year: month_start.year(),
                    month: month_start.month(),
                    label: month_name(month_start.month0())[..3].to_string(),
                    total,
                    gst,
                    total_pct: 0.0,
                    gst_pct: 0.0,
                }
            })
            .collect();

        // Flooring the denominator at one currency unit keeps an all-empty
        // series at 0% instead of dividing by zero
        let max_total = months.iter().map(|m| m.total).max().unwrap_or_default();
        let max_gst = months.iter().map(|m| m.gst).max().unwrap_or_default();
        let total_denom = max_total.to_unit_f64().max(1.0);
        let gst_denom = max_gst.to_unit_f64().max(1.0);

        for month in &mut months {
            month.total_pct = month.total.to_unit_f64() / total_denom * 100.0;
            month.gst_pct = month.gst.to_unit_f64() / gst_denom * 100.0;
        }

        Self { months }
    }

    /// Format the trend as horizontal bars for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Monthly Trends\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for month in &self.months {
            output.push_str(&format!(
                "{:<9} {} {:>12}\n",
                format!("{} {}", month.label, month.year),
                format_bar(month.total_pct, 100.0, 24),
                month.total.to_string()
            ));
            output.push_str(&format!(
                "{:<9} {} {:>12}\n",
                "  GST",
                format_bar(month.gst_pct, 100.0, 24),
                month.gst.to_string()
            ));
        }

        output
    }
}
