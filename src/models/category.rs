//! Expense category labels
//!
//! Categories are an open, user-extensible set of type labels. The newtype
//! enforces the label rules (trimmed, non-empty, at most 50 characters) at
//! construction so downstream code never sees a malformed label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Starter labels offered as suggestions when adding expenses. Any label that
/// passes validation is accepted; this list is not a closed set.
pub const STARTER_CATEGORIES: &[&str] = &[
    "Rent",
    "Operation Expense",
    "Subscriptions & Due",
    "Salary",
    "Utilities",
    "Transportation",
    "Food & Dining",
    "Entertainment",
    "Health & Medical",
    "Shopping",
    "Marketing & Advertising",
    "Auditing",
    "Employee Training",
];

/// A validated expense category label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category label, trimming surrounding whitespace
    pub fn new(label: impl Into<String>) -> Result<Self, CategoryValidationError> {
        let label = label.into();
        let trimmed = label.trim();

        if trimmed.is_empty() {
            return Err(CategoryValidationError::EmptyLabel);
        }

        if trimmed.len() > 50 {
            return Err(CategoryValidationError::LabelTooLong(trimmed.len()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the label text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Category {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Validation errors for category labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyLabel,
    LabelTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "Category cannot be empty"),
            Self::LabelTooLong(len) => {
                write!(f, "Category too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
