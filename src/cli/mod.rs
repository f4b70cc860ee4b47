//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod expense;
pub mod export;
pub mod funding;
pub mod report;

pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use funding::{handle_funding_command, FundingCommands};
pub use report::{
    handle_dashboard_command, handle_reminders_command, handle_report_command, ReportCommands,
};
