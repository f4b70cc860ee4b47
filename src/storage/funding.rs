//! Funding repository for JSON storage
//!
//! Manages loading and saving funding records to funding.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::OutlayError;
use crate::models::{Funding, FundingId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable funding data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct FundingData {
    funding: Vec<Funding>,
}

/// Repository for funding persistence
pub struct FundingStore {
    path: PathBuf,
    data: RwLock<HashMap<FundingId, Funding>>,
}

impl FundingStore {
    /// Create a new funding store
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load funding records from disk
    pub fn load(&self) -> Result<(), OutlayError> {
        let file_data: FundingData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for funding in file_data.funding {
            data.insert(funding.id, funding);
        }

        Ok(())
    }

    /// Save funding records to disk
    pub fn save(&self) -> Result<(), OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut funding: Vec<_> = data.values().cloned().collect();
        funding.sort_by(|a, b| {
            b.received_date
                .cmp(&a.received_date)
                .then(b.created_at.cmp(&a.created_at))
        });

        let file_data = FundingData { funding };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a funding record by ID
    pub fn get(&self, id: FundingId) -> Result<Option<Funding>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all funding records, newest first by creation time
    pub fn get_all(&self) -> Result<Vec<Funding>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut funding: Vec<_> = data.values().cloned().collect();
        funding.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(funding)
    }

    /// Get funding received in a date range (inclusive both ends)
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Funding>, OutlayError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|f| f.received_date >= start && f.received_date <= end)
            .collect())
    }

    /// Insert or update a funding record
    pub fn upsert(&self, funding: Funding) -> Result<(), OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(funding.id, funding);
        Ok(())
    }

    /// Delete a funding record
    pub fn delete(&self, id: FundingId) -> Result<bool, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count funding records
    pub fn count(&self) -> Result<usize, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
