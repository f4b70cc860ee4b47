//! Report periods and date arithmetic
//!
//! A report window is a closed date interval derived from a period kind
//! (weekly, monthly, yearly, custom) evaluated against a reference date.
//! Every function takes the reference date explicitly so report math is
//! deterministic under test; the `*_today` conveniences use the local date.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of report window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// Trailing seven days through today
    Weekly,
    /// First of the current month through today
    Monthly,
    /// January 1 of the current year through today
    Yearly,
    /// Caller-supplied bounds
    Custom,
}

impl PeriodKind {
    /// Parse a period kind from user input
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "custom" => Ok(Self::Custom),
            _ => Err(PeriodParseError::InvalidKind(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A closed date interval over which reports are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub kind: PeriodKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Resolve a window against an explicit reference date
    ///
    /// Override dates only apply to `Custom`; for the calendar kinds the
    /// bounds are fully determined by the reference date. Custom bounds
    /// default to first-of-month and the reference date when absent.
    pub fn resolve(
        kind: PeriodKind,
        start_override: Option<NaiveDate>,
        end_override: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let (start, end) = match kind {
            PeriodKind::Weekly => (today - Duration::days(7), today),
            PeriodKind::Monthly => (first_of_month(today), today),
            PeriodKind::Yearly => (
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
                today,
            ),
            PeriodKind::Custom => (
                start_override.unwrap_or_else(|| first_of_month(today)),
                end_override.unwrap_or(today),
            ),
        };

        Self { kind, start, end }
    }

    /// Resolve a window against the local current date
    pub fn resolve_today(
        kind: PeriodKind,
        start_override: Option<NaiveDate>,
        end_override: Option<NaiveDate>,
    ) -> Self {
        Self::resolve(kind, start_override, end_override, today())
    }

    /// Check if a date falls within this window (inclusive both ends)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Human-readable bounds, e.g. "2025-08-01 to 2025-08-25"
    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The local current date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// True iff `due` is strictly before `today`
pub fn is_overdue(due: NaiveDate, today: NaiveDate) -> bool {
    due < today
}

/// Signed whole-day distance from `today` to `due`
///
/// Negative when overdue, zero when due today.
pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Month name for a zero-based month index
///
/// Out-of-range input yields a sentinel instead of panicking; callers render
/// whatever they are given.
pub fn month_name(index: u32) -> &'static str {
    match index {
        0 => "January",
        1 => "February",
        2 => "March",
        3 => "April",
        4 => "May",
        5 => "June",
        6 => "July",
        7 => "August",
        8 => "September",
        9 => "October",
        10 => "November",
        11 => "December",
        _ => "Invalid Month",
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidKind(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidKind(s) => write!(
                f,
                "Invalid period '{}'. Use weekly, monthly, yearly, or custom",
                s
            ),
        }
    }
}

impl std::error::Error for PeriodParseError {}
