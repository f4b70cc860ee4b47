//! Expense display formatting
//!
//! Provides utilities for formatting expenses for terminal display,
//! including list views and detail views.

use crate::config::Settings;
use crate::display::report::{format_date, truncate};
use crate::models::attachment::format_file_size;
use crate::models::Expense;

/// Format a single expense for display (list row)
pub fn format_expense_row(expense: &Expense, settings: &Settings) -> String {
    let status_icon = if expense.is_paid { "✓" } else { " " };

    let recurring_indicator = if expense.is_recurring { "↻ " } else { "" };
    let attachment_indicator = if expense.attachments.is_empty() {
        String::new()
    } else {
        format!(" [{}]", expense.attachments.len())
    };

    let name_display = format!("{}{}", recurring_indicator, expense.name);

    format!(
        "{:2} {:<12} {:<10} {:<24} {:<16} {:>12}{}",
        status_icon,
        expense.id.to_string(),
        format_date(expense.date, &settings.date_format),
        truncate(&name_display, 24),
        truncate(expense.category.as_str(), 16),
        expense
            .amount
            .format_with_symbol(&settings.currency_symbol),
        attachment_indicator
    )
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:2} {:<12} {:<10} {:<24} {:<16} {:>12}\n",
        "St", "ID", "Date", "Name", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(82));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, settings));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!(
        "Date:        {}\n",
        format_date(expense.date, &settings.date_format)
    ));
    output.push_str(&format!("Name:        {}\n", expense.name));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense
            .amount
            .format_with_symbol(&settings.currency_symbol)
    ));

    if expense.gst_applicable {
        output.push_str(&format!(
            "GST:         {}\n",
            expense
                .gst_amount
                .format_with_symbol(&settings.currency_symbol)
        ));
    }

    if expense.is_recurring {
        match expense.due_date {
            Some(due) => output.push_str(&format!(
                "Recurring:   Yes (due {})\n",
                format_date(due, &settings.date_format)
            )),
            None => output.push_str("Recurring:   Yes\n"),
        }
    }

    output.push_str(&format!(
        "Status:      {}\n",
        if expense.is_paid { "Paid" } else { "Pending" }
    ));

    if !expense.attachments.is_empty() {
        output.push_str("\nAttachments:\n");
        for (i, attachment) in expense.attachments.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} ({}, {}) [{}]\n",
                i + 1,
                attachment.name,
                format_file_size(attachment.size),
                attachment.mime_type,
                attachment.id
            ));
        }
    }

    output
}
