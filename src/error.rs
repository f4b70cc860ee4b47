//! Error types for Outlay
//!
//! A single thiserror enum covers every failure the CLI can hit, from bad
//! user input through to spreadsheet generation.

use thiserror::Error;

/// The error type for all Outlay operations
#[derive(Error, Debug)]
pub enum OutlayError {
    /// Settings file problems
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem problems outside the record stores
    #[error("I/O error: {0}")]
    Io(String),

    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup by id or prefix found nothing
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Workbook generation or report file write failures
    #[error("Export error: {0}")]
    Export(String),

    /// Record store read/write failures
    #[error("Storage error: {0}")]
    Storage(String),
}

impl OutlayError {
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    pub fn funding_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Funding",
            identifier: identifier.into(),
        }
    }

    pub fn attachment_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Attachment",
            identifier: identifier.into(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for OutlayError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type OutlayResult<T> = Result<T, OutlayError>;
