//! Financial report export
//!
//! Assembles the Summary, Expenses, and Funding sheets from a report summary
//! and the raw records behind it, then renders them to an XLSX buffer.

use chrono::NaiveDate;

use crate::error::OutlayResult;
use crate::export::sheet::{Cell, Sheet};
use crate::export::workbook::render_workbook;
use crate::models::{Expense, Funding};
use crate::reports::ReportSummary;

/// Title row of the Summary sheet
const REPORT_TITLE: &str = "Outlay - Financial Report";

const SUMMARY_WIDTHS: &[f64] = &[20.0, 15.0];
const EXPENSE_WIDTHS: &[f64] = &[12.0, 25.0, 20.0, 12.0, 12.0, 12.0, 10.0, 12.0, 10.0];
const FUNDING_WIDTHS: &[f64] = &[15.0, 20.0, 15.0, 10.0, 15.0, 10.0, 30.0];

/// Export a financial report as an XLSX byte buffer
///
/// The Summary sheet is always present; the Expenses and Funding sheets are
/// omitted when their lists are empty. Inputs are not modified.
pub fn export_report(
    summary: &ReportSummary,
    expenses: &[Expense],
    funding: &[Funding],
    generated: NaiveDate,
) -> OutlayResult<Vec<u8>> {
    let mut sheets = vec![summary_sheet(summary, generated)];

    if !expenses.is_empty() {
        sheets.push(expenses_sheet(expenses));
    }
    if !funding.is_empty() {
        sheets.push(funding_sheet(funding));
    }

    render_workbook(&sheets)
}

/// Suggested filename for an exported report
pub fn report_filename(summary: &ReportSummary, generated: NaiveDate) -> String {
    format!(
        "outlay-financial-report-{}-{}.xlsx",
        summary.window.kind,
        generated.format("%Y-%m-%d")
    )
}

fn summary_sheet(summary: &ReportSummary, generated: NaiveDate) -> Sheet {
    let mut sheet = Sheet::new("Summary", SUMMARY_WIDTHS);

    sheet.push_row(vec![Cell::text(REPORT_TITLE)]);
    sheet.push_blank();
    sheet.push_row(vec![
        Cell::text("Report Period:"),
        Cell::text(summary.window.label()),
    ]);
    sheet.push_row(vec![Cell::text("Generated:"), Cell::date(generated)]);
    sheet.push_blank();
    sheet.push_row(vec![Cell::text("FINANCIAL SUMMARY")]);
    sheet.push_row(vec![Cell::text("Metric"), Cell::text("Value")]);
    sheet.push_row(vec![
        Cell::text("Total Expenses"),
        Cell::count(summary.expense_count),
    ]);
    sheet.push_row(vec![
        Cell::text("Total Amount"),
        Cell::money(summary.total_amount),
    ]);
    sheet.push_row(vec![Cell::text("Total GST"), Cell::money(summary.total_gst)]);
    sheet.push_row(vec![
        Cell::text("Total Funding"),
        Cell::money(summary.total_funding),
    ]);
    sheet.push_row(vec![
        Cell::text("Net Cash Flow"),
        Cell::money(summary.net_cash_flow),
    ]);
    sheet.push_row(vec![
        Cell::text("Average Expense"),
        Cell::money(summary.average_expense),
    ]);
    sheet.push_blank();
    sheet.push_row(vec![Cell::text("EXPENSES BY TYPE")]);
    sheet.push_row(vec![Cell::text("Category"), Cell::text("Amount")]);

    for entry in &summary.expenses_by_category {
        sheet.push_row(vec![
            Cell::text(entry.category.as_str()),
            Cell::money(entry.total),
        ]);
    }

    sheet
}

fn expenses_sheet(expenses: &[Expense]) -> Sheet {
    let mut sheet = Sheet::new("Expenses", EXPENSE_WIDTHS);

    sheet.push_row(vec![
        Cell::text("Date"),
        Cell::text("Name"),
        Cell::text("Category"),
        Cell::text("Amount"),
        Cell::text("GST Applicable"),
        Cell::text("GST Amount"),
        Cell::text("Recurring"),
        Cell::text("Due Date"),
        Cell::text("Status"),
    ]);

    for expense in expenses {
        sheet.push_row(vec![
            Cell::date(expense.date),
            Cell::text(expense.name.as_str()),
            Cell::text(expense.category.as_str()),
            Cell::money(expense.amount),
            Cell::yes_no(expense.gst_applicable),
            // The stored GST amount, even when the flag is off
            Cell::money(expense.gst_amount),
            Cell::yes_no(expense.is_recurring),
            match expense.due_date {
                Some(due) => Cell::date(due),
                None => Cell::text("N/A"),
            },
            Cell::text(if expense.is_paid { "Paid" } else { "Pending" }),
        ]);
    }

    sheet
}

fn funding_sheet(funding: &[Funding]) -> Sheet {
    let mut sheet = Sheet::new("Funding", FUNDING_WIDTHS);

    sheet.push_row(vec![
        Cell::text("Date Received"),
        Cell::text("Funder Name"),
        Cell::text("Amount"),
        Cell::text("Repayable"),
        Cell::text("Repayment Date"),
        Cell::text("Status"),
        Cell::text("Description"),
    ]);

    for record in funding {
        sheet.push_row(vec![
            Cell::date(record.received_date),
            Cell::text(record.funder_name.as_str()),
            Cell::money(record.amount),
            Cell::yes_no(record.is_repayable),
            match record.repayment_date {
                Some(due) => Cell::date(due),
                None => Cell::text("N/A"),
            },
            Cell::text(if record.is_repaid { "Repaid" } else { "Pending" }),
            Cell::text(record.description.clone().unwrap_or_default()),
        ]);
    }

    sheet
}
