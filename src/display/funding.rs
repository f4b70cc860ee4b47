//! Funding display formatting
//!
//! Provides utilities for formatting funding records for terminal display,
//! including list views and detail views.

use crate::config::Settings;
use crate::display::report::{format_date, truncate};
use crate::models::attachment::format_file_size;
use crate::models::Funding;

/// Format a single funding record for display (list row)
pub fn format_funding_row(funding: &Funding, settings: &Settings) -> String {
    let status_icon = if funding.is_repaid { "✓" } else { " " };

    let repayable_display = if funding.is_repayable {
        match funding.repayment_date {
            Some(due) => format!("due {}", format_date(due, &settings.date_format)),
            None => "repayable".to_string(),
        }
    } else {
        String::new()
    };

    let attachment_indicator = if funding.attachments.is_empty() {
        String::new()
    } else {
        format!(" [{}]", funding.attachments.len())
    };

    format!(
        "{:2} {:<12} {:<10} {:<24} {:>12} {:<14}{}",
        status_icon,
        funding.id.to_string(),
        format_date(funding.received_date, &settings.date_format),
        truncate(&funding.funder_name, 24),
        funding
            .amount
            .format_with_symbol(&settings.currency_symbol),
        repayable_display,
        attachment_indicator
    )
}

/// Format a list of funding records as a table
pub fn format_funding_list(funding: &[Funding], settings: &Settings) -> String {
    if funding.is_empty() {
        return "No funding records found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:2} {:<12} {:<10} {:<24} {:>12} {:<14}\n",
        "St", "ID", "Received", "Funder", "Amount", "Repayment"
    ));
    output.push_str(&"-".repeat(82));
    output.push('\n');

    for record in funding {
        output.push_str(&format_funding_row(record, settings));
        output.push('\n');
    }

    output
}

/// Format funding details for display
pub fn format_funding_details(funding: &Funding, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Funding:     {}\n", funding.id));
    output.push_str(&format!(
        "Received:    {}\n",
        format_date(funding.received_date, &settings.date_format)
    ));
    output.push_str(&format!("Funder:      {}\n", funding.funder_name));
    output.push_str(&format!(
        "Amount:      {}\n",
        funding
            .amount
            .format_with_symbol(&settings.currency_symbol)
    ));

    if funding.is_repayable {
        match funding.repayment_date {
            Some(due) => output.push_str(&format!(
                "Repayable:   Yes (due {})\n",
                format_date(due, &settings.date_format)
            )),
            None => output.push_str("Repayable:   Yes\n"),
        }
        output.push_str(&format!(
            "Status:      {}\n",
            if funding.is_repaid { "Repaid" } else { "Pending" }
        ));
    } else {
        output.push_str("Repayable:   No\n");
    }

    if let Some(description) = &funding.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    if !funding.attachments.is_empty() {
        output.push_str("\nAttachments:\n");
        for (i, attachment) in funding.attachments.iter().enumerate() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn sample_funding() -> Funding {
        Funding::new(
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            "Community Bank",
            Money::from_cents(500_000),
        )
    }

    #[test]
    fn test_format_funding_row() {
        let funding = sample_funding();
        let formatted = format_funding_row(&funding, &Settings::default());

        assert!(formatted.contains("2025-02-01"));
        assert!(formatted.contains("Community Bank"));
        assert!(formatted.contains("$5000.00"));
    }

    #[test]
    fn test_row_shows_repayment_due() {
        let mut funding = sample_funding();
        funding.set_repayable(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());

        let formatted = format_funding_row(&funding, &Settings::default());
        assert!(formatted.contains("due 2025-12-01"));
    }

    #[test]
    fn test_format_empty_list() {
        let formatted = format_funding_list(&[], &Settings::default());
        assert!(formatted.contains("No funding records found"));
    }

    #[test]
    fn test_format_funding_details() {
        let mut funding = sample_funding();
        funding.set_repayable(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        funding.description = Some("Equipment loan".to_string());

        let formatted = format_funding_details(&funding, &Settings::default());

        assert!(formatted.contains("Funder:      Community Bank"));
        assert!(formatted.contains("Repayable:   Yes (due 2025-12-01)"));
        assert!(formatted.contains("Status:      Pending"));
        assert!(formatted.contains("Description: Equipment loan"));
    }

    #[test]
    fn test_details_for_grant() {
        let formatted = format_funding_details(&sample_funding(), &Settings::default());
        assert!(formatted.contains("Repayable:   No"));
        assert!(!formatted.contains("Status:"));
        assert!(!formatted.contains("Description:"));
    }

    #[test]
    fn test_details_repaid_status() {
        let mut funding = sample_funding();
        funding.set_repayable(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        funding.mark_repaid();

        let formatted = format_funding_details(&funding, &Settings::default());
        assert!(formatted.contains("Status:      Repaid"));
    }
}
