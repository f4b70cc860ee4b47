//! Reports module for Outlay
//!
//! Provides financial reports including the period summary, monthly trends,
//! the GST summary, the dashboard overview, and payment reminders.

pub mod dashboard;
pub mod gst;
pub mod reminders;
pub mod summary;
pub mod trend;

pub use dashboard::DashboardReport;
pub use gst::{GstMonth, GstReport};
pub use reminders::{ReminderReport, DUE_SOON_WINDOW_DAYS, REPAYMENT_ALERT_WINDOW_DAYS};
pub use summary::{CategoryBreakdown, FundingShare, ReportSummary};
pub use trend::{MonthlyTrend, TrendMonth, TREND_MONTHS};
