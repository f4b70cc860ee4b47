//! Funding service
//!
//! Provides business logic for funding records: grants, loans, and
//! investments, with repayment tracking and document attachments.

use std::path::Path;

use chrono::{NaiveDate, Utc};

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Funding, FundingId, Money};
use crate::services::{attachment_from_path, resolve_attachment};
use crate::storage::Storage;

/// Service for funding management
pub struct FundingService<'a> {
    storage: &'a Storage,
}

/// Options for filtering funding listings
#[derive(Debug, Clone, Default)]
pub struct FundingFilter {
    /// Filter by received date range start
    pub start_date: Option<NaiveDate>,
    /// Filter by received date range end
    pub end_date: Option<NaiveDate>,
    /// Keep only repayable (true) or non-repayable (false) funding
    pub repayable: Option<bool>,
    /// Keep only funding that still has to be paid back
    pub outstanding: bool,
    /// Maximum number of records to return
    pub limit: Option<usize>,
}

impl FundingFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by received date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Filter by repayable flag
    pub fn repayable(mut self, repayable: bool) -> Self {
        self.repayable = Some(repayable);
        self
    }

    /// Keep only outstanding repayable funding
    pub fn outstanding(mut self) -> Self {
        self.outstanding = true;
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new funding record
#[derive(Debug, Clone)]
pub struct CreateFundingInput {
    pub received_date: NaiveDate,
    pub funder_name: String,
    pub amount: Money,
    pub repayable: bool,
    pub repayment_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl<'a> FundingService<'a> {
    /// Create a new funding service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new funding record
    pub fn create(&self, input: CreateFundingInput) -> OutlayResult<Funding> {
        let mut funding = Funding::new(
            input.received_date,
            input.funder_name.trim().to_string(),
            input.amount,
        );

        funding.is_repayable = input.repayable;
        funding.repayment_date = input.repayment_date;
        funding.description = input.description;

        funding
            .validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.funding.upsert(funding.clone())?;
        self.storage.funding.save()?;

        Ok(funding)
    }

    /// Get a funding record by ID
    pub fn get(&self, id: FundingId) -> OutlayResult<Option<Funding>> {
        self.storage.funding.get(id)
    }

    /// Find a funding record by identifier
    ///
    /// Accepts a full UUID (with or without the `fnd-` prefix) or a unique
    /// prefix of one, as printed in list output.
    pub fn find(&self, identifier: &str) -> OutlayResult<Funding> {
        if let Ok(id) = identifier.parse::<FundingId>() {
            if let Some(funding) = self.storage.funding.get(id)? {
                return Ok(funding);
            }
        }

        let needle = identifier
            .strip_prefix("fnd-")
            .unwrap_or(identifier)
            .to_lowercase();
        if needle.is_empty() {
            return Err(OutlayError::funding_not_found(identifier));
        }

        let matches: Vec<Funding> = self
            .storage
            .funding
            .get_all()?
            .into_iter()
            .filter(|f| f.id.as_uuid().to_string().starts_with(&needle))
            .collect();

        if matches.len() > 1 {
            return Err(OutlayError::Validation(format!(
                "Funding ID '{}' is ambiguous ({} matches)",
                identifier,
                matches.len()
            )));
        }

        matches
            .into_iter()
            .next()
            .ok_or_else(|| OutlayError::funding_not_found(identifier))
    }

    /// List funding records with optional filtering, most recent first
    pub fn list(&self, filter: FundingFilter) -> OutlayResult<Vec<Funding>> {
        let mut funding = if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            self.storage.funding.get_by_date_range(start, end)?
        } else {
            self.storage.funding.get_all()?
        };

        // Apply additional filters
        if let Some(start) = filter.start_date {
            funding.retain(|f| f.received_date >= start);
        }
        if let Some(end) = filter.end_date {
            funding.retain(|f| f.received_date <= end);
        }
        if let Some(repayable) = filter.repayable {
            funding.retain(|f| f.is_repayable == repayable);
        }
        if filter.outstanding {
            funding.retain(|f| f.is_outstanding());
        }

        funding.sort_by(|a, b| {
            b.received_date
                .cmp(&a.received_date)
                .then(b.created_at.cmp(&a.created_at))
        });

        if let Some(limit) = filter.limit {
            funding.truncate(limit);
        }

        Ok(funding)
    }

    /// Update a funding record
    pub fn update(
        &self,
        id: FundingId,
        received_date: Option<NaiveDate>,
        funder_name: Option<String>,
        amount: Option<Money>,
        repayable: Option<bool>,
        repayment_date: Option<Option<NaiveDate>>,
        description: Option<Option<String>>,
    ) -> OutlayResult<Funding> {
        let mut funding = self
            .storage
            .funding
            .get(id)?
            .ok_or_else(|| OutlayError::funding_not_found(id.to_string()))?;

        // Apply updates
        if let Some(new_date) = received_date {
            funding.received_date = new_date;
        }

        if let Some(new_name) = funder_name {
            funding.funder_name = new_name.trim().to_string();
        }

        if let Some(new_amount) = amount {
            funding.amount = new_amount;
        }

        if let Some(new_repayable) = repayable {
            funding.is_repayable = new_repayable;
            // Non-repayable funding cannot keep a repayment date
            if !new_repayable {
                funding.repayment_date = None;
                funding.is_repaid = false;
            }
        }

        // repayment_date: Option<Option<NaiveDate>>
        // - None: no change
        // - Some(None): clear the repayment date
        // - Some(Some(d)): repayment due on d
        if let Some(new_repayment) = repayment_date {
            funding.repayment_date = new_repayment;
        }

        if let Some(new_description) = description {
            funding.description = new_description.map(|d| d.trim().to_string());
        }

        funding.updated_at = Utc::now();

        funding
            .validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.funding.upsert(funding.clone())?;
        self.storage.funding.save()?;

        Ok(funding)
    }

    /// Mark a repayable funding record as repaid
    pub fn mark_repaid(&self, id: FundingId) -> OutlayResult<Funding> {
        let mut funding = self
            .storage
            .funding
            .get(id)?
            .ok_or_else(|| OutlayError::funding_not_found(id.to_string()))?;

        if !funding.is_repayable {
            return Err(OutlayError::Validation(format!(
                "Funding {} is not repayable",
                id
            )));
        }

        funding.mark_repaid();

        self.storage.funding.upsert(funding.clone())?;
        self.storage.funding.save()?;

        Ok(funding)
    }

    /// Delete a funding record along with its attachment metadata
    pub fn delete(&self, id: FundingId) -> OutlayResult<Funding> {
        let funding = self
            .storage
            .funding
            .get(id)?
            .ok_or_else(|| OutlayError::funding_not_found(id.to_string()))?;

        self.storage.funding.delete(id)?;
        self.storage.funding.save()?;

        Ok(funding)
    }

    /// Attach a file's metadata to a funding record
    pub fn attach(&self, id: FundingId, file_path: &Path) -> OutlayResult<Funding> {
        let mut funding = self
            .storage
            .funding
            .get(id)?
            .ok_or_else(|| OutlayError::funding_not_found(id.to_string()))?;

        let attachment = attachment_from_path(file_path)?;
        funding.add_attachment(attachment);

        self.storage.funding.upsert(funding.clone())?;
        self.storage.funding.save()?;

        Ok(funding)
    }

    /// Remove attachment metadata from a funding record
    ///
    /// The attachment may be identified by ID, unique ID prefix, or file name.
    pub fn detach(&self, id: FundingId, attachment: &str) -> OutlayResult<Funding> {
        let mut funding = self
            .storage
            .funding
            .get(id)?
            .ok_or_else(|| OutlayError::funding_not_found(id.to_string()))?;

        let attachment_id = resolve_attachment(&funding.attachments, attachment)
            .ok_or_else(|| OutlayError::attachment_not_found(attachment))?;
        funding.remove_attachment(attachment_id);

        self.storage.funding.upsert(funding.clone())?;
        self.storage.funding.save()?;

        Ok(funding)
    }

    /// Count funding records
    pub fn count(&self) -> OutlayResult<usize> {
        self.storage.funding.count()
    }
}
