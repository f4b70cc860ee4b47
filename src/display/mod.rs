//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and status indicators.

pub mod expense;
pub mod funding;
pub mod report;

pub use expense::{format_expense_details, format_expense_list, format_expense_row};
pub use funding::{format_funding_details, format_funding_list, format_funding_row};
