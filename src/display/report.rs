//! Report formatting utilities for terminal output
//!
//! Small helpers shared by the report renderers and entity displays.

use chrono::NaiveDate;
use std::fmt::Write as _;

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum length with ellipsis
///
/// Operates on characters, so multi-byte names never split mid-glyph.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Format a date with a user-configured strftime string
///
/// An invalid format string falls back to ISO output instead of failing the
/// whole render.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().filter(|c| *c == '░').count(), 5);
    }

    #[test]
    fn test_format_bar_empty_and_overflow() {
        assert_eq!(format_bar(0.0, 100.0, 10), " ".repeat(10));
        assert_eq!(format_bar(25.0, 0.0, 10), " ".repeat(10));

        let full = format_bar(150.0, 100.0, 10);
        assert_eq!(full.chars().filter(|c| *c == '█').count(), 10);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Test", 4), "Test");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Café branding déjà vu", 10), "Café br...");
        assert_eq!(truncate("déjà", 4), "déjà");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(format_date(date, "%Y-%m-%d"), "2025-03-15");
        assert_eq!(format_date(date, "%d/%m/%Y"), "15/03/2025");
    }

    #[test]
    fn test_format_date_invalid_format_falls_back() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(format_date(date, "%Q"), "2025-03-15");
    }
}
