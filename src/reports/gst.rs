//! GST summary report
//!
//! Current-month GST figures plus a month-by-month breakdown over a trailing
//! window of calendar months. Only expenses with the GST flag set contribute.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::OutlayResult;
use crate::models::period::{first_of_month, month_name};
use crate::models::{Expense, Money};
use crate::storage::Storage;

/// One month of the GST breakdown
#[derive(Debug, Clone)]
pub struct GstMonth {
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Abbreviated month name, e.g. "Mar"
    pub label: String,
    /// Total GST in the month
    pub gst: Money,
    /// Number of GST-applicable expenses in the month
    pub applicable_count: usize,
}

/// GST summary over a trailing month window, oldest month first
#[derive(Debug, Clone)]
pub struct GstReport {
    /// Total GST for the current calendar month
    pub current_month_gst: Money,
    /// GST-applicable expenses in the current month
    pub applicable_count: usize,
    /// Average GST per applicable expense in the current month
    pub average_gst: Money,
    pub months: Vec<GstMonth>,
}

impl GstReport {
    /// Generate the report ending at today's month from stored records
    pub fn generate(storage: &Storage, today: NaiveDate, months: u32) -> OutlayResult<Self> {
        let expenses = storage.expenses.get_all()?;
        Ok(Self::from_expenses(&expenses, today, months))
    }

    /// Build the report from an expense slice
    pub fn from_expenses(expenses: &[Expense], today: NaiveDate, months: u32) -> Self {
        let current = first_of_month(today);

        let months: Vec<GstMonth> = (0..months)
            .rev()
            .map(|back| {
                let month_start = current
                    .checked_sub_months(Months::new(back))
                    .unwrap_or(current);

                let mut gst = Money::zero();
                let mut applicable_count = 0;
                for expense in expenses.iter().filter(|e| {
                    e.gst_applicable
                        && e.date.year() == month_start.year()
                        && e.date.month() == month_start.month()
                }) {
                    gst += expense.effective_gst();
                    applicable_count += 1;
                }

                GstMonth {
                    year: month_start.year(),
                    month: month_start.month(),
                    label: month_name(month_start.month0())[..3].to_string(),
                    gst,
                    applicable_count,
                }
            })
            .collect();

        let (current_month_gst, applicable_count) = expenses
            .iter()
            .filter(|e| {
                e.gst_applicable
                    && e.date.year() == current.year()
                    && e.date.month() == current.month()
            })
            .fold((Money::zero(), 0usize), |(gst, count), e| {
                (gst + e.effective_gst(), count + 1)
            });

        // Dividing by at least 1 keeps the empty-month average at zero
        let average_gst =
            Money::from_cents(current_month_gst.cents() / applicable_count.max(1) as i64);

        Self {
            current_month_gst,
            applicable_count,
            average_gst,
            months,
        }
    }

    /// Format the GST summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("GST Summary\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "Total GST (Current Month):   {:>12}\n",
            self.current_month_gst.to_string()
        ));
        output.push_str(&format!(
            "GST Applicable Expenses:     {:>12}\n",
            self.applicable_count
        ));
        output.push_str(&format!(
            "Average GST per Expense:     {:>12}\n",
            self.average_gst.to_string()
        ));

        output.push_str("\nMonthly GST Breakdown\n");
        output.push_str(&"-".repeat(72));
        output.push('\n');
        for month in &self.months {
            output.push_str(&format!(
                "{:<9} {:>3} expense(s) {:>12}\n",
                format!("{} {}", month.label, month.year),
                month.applicable_count,
                month.gst.to_string()
            ));
        }

        output
    }
}
