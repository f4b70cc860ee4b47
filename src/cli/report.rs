//! CLI commands for reports
//!
//! Provides the financial summary and GST report subcommands, the dashboard
//! and reminder commands, and the report window resolution shared with the
//! export command.

use chrono::NaiveDate;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::{ReportPeriodType, Settings};
use crate::error::{OutlayError, OutlayResult};
use crate::export::export_report;
use crate::models::period::today;
use crate::models::{PeriodKind, ReportWindow};
use crate::reports::{DashboardReport, GstReport, ReminderReport, ReportSummary};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Generate a financial summary report
    Summary {
        /// Report period (weekly, monthly, yearly, custom)
        #[arg(short, long)]
        period: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,

        /// Export to XLSX file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// GST totals and applicable-expense counts by month
    Gst {
        /// Number of months to include
        #[arg(short, long, default_value = "6")]
        months: u32,
    },
}

/// Resolve the report window from CLI arguments and settings
///
/// An explicit `--period` wins; explicit bounds without a period imply a
/// custom window; otherwise the configured default period applies.
pub(crate) fn resolve_window(
    settings: &Settings,
    period: Option<String>,
    start: Option<String>,
    end: Option<String>,
) -> OutlayResult<ReportWindow> {
    let start_date = start
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
                OutlayError::Validation(format!("Invalid start date format: {}. Use YYYY-MM-DD", s))
            })
        })
        .transpose()?;

    let end_date = end
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
                OutlayError::Validation(format!("Invalid end date format: {}. Use YYYY-MM-DD", s))
            })
        })
        .transpose()?;

    let kind = if let Some(period_str) = period {
        PeriodKind::parse(&period_str).map_err(|e| OutlayError::Validation(e.to_string()))?
    } else if start_date.is_some() || end_date.is_some() {
        PeriodKind::Custom
    } else {
        match settings.default_period {
            ReportPeriodType::Monthly => PeriodKind::Monthly,
            ReportPeriodType::Weekly => PeriodKind::Weekly,
            ReportPeriodType::Yearly => PeriodKind::Yearly,
        }
    };

    Ok(ReportWindow::resolve_today(kind, start_date, end_date))
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> OutlayResult<()> {
    match cmd {
        ReportCommands::Summary {
            period,
            start,
            end,
            output,
        } => handle_summary_report(storage, settings, period, start, end, output),
        ReportCommands::Gst { months } => handle_gst_report(storage, months),
    }
}

/// Handle the financial summary report
fn handle_summary_report(
    storage: &Storage,
    settings: &Settings,
    period: Option<String>,
    start: Option<String>,
    end: Option<String>,
    output: Option<PathBuf>,
) -> OutlayResult<()> {
    let window = resolve_window(settings, period, start, end)?;

    // Output
    if let Some(path) = output {
        let mut expenses = storage
            .expenses
            .get_by_date_range(window.start, window.end)?;
        let mut funding = storage.funding.get_by_date_range(window.start, window.end)?;
        // Sheets read oldest first
        expenses.sort_by_key(|e| e.date);
        funding.sort_by_key(|f| f.received_date);

        let summary = ReportSummary::summarize(&expenses, &funding, window);
        let bytes = export_report(&summary, &expenses, &funding, today())?;

        std::fs::write(&path, &bytes).map_err(|e| {
            OutlayError::Export(format!("Failed to write file {}: {}", path.display(), e))
        })?;
        println!("Financial report exported to: {}", path.display());
    } else {
        let report = ReportSummary::generate(storage, window)?;
        println!("{}", report.format_terminal());
    }

    Ok(())
}

/// Handle the GST summary report
fn handle_gst_report(storage: &Storage, months: u32) -> OutlayResult<()> {
    if months == 0 {
        return Err(OutlayError::Validation(
            "Months must be at least 1".to_string(),
        ));
    }

    let report = GstReport::generate(storage, today(), months)?;
    println!("{}", report.format_terminal());

    Ok(())
}

/// Handle the dashboard command
pub fn handle_dashboard_command(storage: &Storage) -> OutlayResult<()> {
    let report = DashboardReport::generate(storage, today())?;
    println!("{}", report.format_terminal());
    Ok(())
}

/// Handle the reminders command
pub fn handle_reminders_command(storage: &Storage) -> OutlayResult<()> {
    let today = today();
    let report = ReminderReport::generate(storage, today)?;
    println!("{}", report.format_terminal(today));
    Ok(())
}
