use anyhow::Result;
use clap::{Parser, Subcommand};

use outlay::cli::{
    handle_config_command, handle_dashboard_command, handle_expense_command,
    handle_export_command, handle_funding_command, handle_reminders_command,
    handle_report_command,
};
use outlay::config::{paths::OutlayPaths, settings::Settings};
use outlay::storage::Storage;

#[derive(Parser)]
#[command(
    name = "outlay",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based expense and funding tracker for small businesses",
    long_about = "OutlayCLI is a terminal-based expense tracker for small \
                  businesses. It records expenses with their GST amounts, tracks \
                  grants and loans with repayment dates, and produces reports, \
                  reminders, and XLSX exports from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(outlay::cli::ExpenseCommands),

    /// Funding management commands
    #[command(subcommand, alias = "fund")]
    Funding(outlay::cli::FundingCommands),

    /// Reporting commands
    #[command(subcommand, alias = "rep")]
    Report(outlay::cli::ReportCommands),

    /// Show a snapshot of the current month
    #[command(alias = "dash")]
    Dashboard,

    /// Show overdue bills and upcoming repayments
    Reminders,

    /// Export data to external formats
    #[command(subcommand)]
    Export(outlay::cli::ExportCommands),

    /// Show or change configuration
    #[command(subcommand)]
    Config(outlay::cli::ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = OutlayPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Funding(cmd)) => {
            handle_funding_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Dashboard) => {
            handle_dashboard_command(&storage)?;
        }
        Some(Commands::Reminders) => {
            handle_reminders_command(&storage)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Config(cmd)) => {
            handle_config_command(&paths, &mut settings, cmd)?;
        }
        None => {
            println!("OutlayCLI - Expense and funding tracking for small businesses");
            println!();
            println!("Run 'outlay --help' for usage information.");
            println!("Run 'outlay dashboard' for a snapshot of this month.");
        }
    }

    Ok(())
}
