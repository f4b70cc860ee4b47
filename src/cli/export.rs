//! CLI commands for data export
//!
//! Provides the XLSX export command for financial reports.

use clap::Subcommand;
use std::path::PathBuf;

use crate::cli::report::resolve_window;
use crate::config::Settings;
use crate::error::{OutlayError, OutlayResult};
use crate::export::{export_report, report_filename};
use crate::models::period::today;
use crate::reports::ReportSummary;
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export a financial report as an XLSX workbook
    Xlsx {
        /// Report period (weekly, monthly, yearly, custom)
        #[arg(short, long)]
        period: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,

        /// Output file path (defaults to a dated name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> OutlayResult<()> {
    match cmd {
        ExportCommands::Xlsx {
            period,
            start,
            end,
            output,
        } => handle_export_xlsx(storage, settings, period, start, end, output),
    }
}

/// Handle XLSX report export
fn handle_export_xlsx(
    storage: &Storage,
    settings: &Settings,
    period: Option<String>,
    start: Option<String>,
    end: Option<String>,
    output: Option<PathBuf>,
) -> OutlayResult<()> {
    let window = resolve_window(settings, period, start, end)?;
    let generated = today();

    let mut expenses = storage
        .expenses
        .get_by_date_range(window.start, window.end)?;
    let mut funding = storage.funding.get_by_date_range(window.start, window.end)?;
    // Sheets read oldest first
    expenses.sort_by_key(|e| e.date);
    funding.sort_by_key(|f| f.received_date);

    let summary = ReportSummary::summarize(&expenses, &funding, window);
    let bytes = export_report(&summary, &expenses, &funding, generated)?;

    let path = output.unwrap_or_else(|| PathBuf::from(report_filename(&summary, generated)));

    std::fs::write(&path, &bytes).map_err(|e| {
        OutlayError::Export(format!("Failed to write file {}: {}", path.display(), e))
    })?;

    println!(
        "Exported {} expense(s) and {} funding record(s) to: {}",
        expenses.len(),
        funding.len(),
        path.display()
    );

    Ok(())
}
