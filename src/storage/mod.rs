//! Storage layer for OutlayCLI
//!
//! Two JSON-backed stores, one per record type, behind a single coordinator
//! that owns directory creation and initial load.

pub mod expenses;
pub mod file_io;
pub mod funding;

pub use expenses::ExpenseStore;
pub use file_io::{read_json, write_json_atomic};
pub use funding::FundingStore;

use crate::config::paths::OutlayPaths;
use crate::error::OutlayError;

/// Access point for the expense and funding stores
pub struct Storage {
    pub expenses: ExpenseStore,
    pub funding: FundingStore,
}

impl Storage {
    /// Set up both stores, creating the data directory if needed
    pub fn new(paths: OutlayPaths) -> Result<Self, OutlayError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseStore::new(paths.expenses_file()),
            funding: FundingStore::new(paths.funding_file()),
        })
    }

    /// Read both stores from disk; missing files load as empty
    pub fn load_all(&mut self) -> Result<(), OutlayError> {
        self.expenses.load()?;
        self.funding.load()?;
        Ok(())
    }
}
