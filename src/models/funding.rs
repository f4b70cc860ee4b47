//! Funding model
//!
//! Represents money received by the business: grants, loans, investments.
//! Repayable funding carries a repayment date and repaid/pending status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::attachment::FileAttachment;
use super::ids::{AttachmentId, FundingId};
use super::money::Money;

/// A funding record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Funding {
    /// Unique identifier
    pub id: FundingId,

    /// Date the funds were received
    pub received_date: NaiveDate,

    /// Who provided the funds
    pub funder_name: String,

    /// Amount received (non-negative)
    pub amount: Money,

    /// Whether the funds must be repaid
    #[serde(default)]
    pub is_repayable: bool,

    /// When repayment is due (repayable funding only)
    pub repayment_date: Option<NaiveDate>,

    /// Whether repayment has been made
    #[serde(default)]
    pub is_repaid: bool,

    /// Free-text description
    pub description: Option<String>,

    /// Attached file metadata
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Funding {
    /// Create a new funding record
    pub fn new(received_date: NaiveDate, funder_name: impl Into<String>, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: FundingId::new(),
            received_date,
            funder_name: funder_name.into(),
            amount,
            is_repayable: false,
            repayment_date: None,
            is_repaid: false,
            description: None,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this funding still has to be paid back
    pub fn is_outstanding(&self) -> bool {
        self.is_repayable && !self.is_repaid
    }

    /// Check if this funding can appear in repayment alerts
    ///
    /// Alert candidates are outstanding repayable funds with a repayment date.
    pub fn is_repayment_candidate(&self) -> bool {
        self.is_outstanding() && self.repayment_date.is_some()
    }

    /// Mark this funding as repayable by the given date
    pub fn set_repayable(&mut self, repayment_date: NaiveDate) {
        self.is_repayable = true;
        self.repayment_date = Some(repayment_date);
        self.updated_at = Utc::now();
    }

    /// Mark the repayment as made
    pub fn mark_repaid(&mut self) {
        self.is_repaid = true;
        self.updated_at = Utc::now();
    }

    /// Add attachment metadata
    pub fn add_attachment(&mut self, attachment: FileAttachment) {
        self.attachments.push(attachment);
        self.updated_at = Utc::now();
    }

    /// Remove attachment metadata; returns true if something was removed
    pub fn remove_attachment(&mut self, attachment_id: AttachmentId) -> bool {
        let before = self.attachments.len();
        self.attachments.retain(|a| a.id != attachment_id);
        let removed = self.attachments.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Validate the funding record
    pub fn validate(&self) -> Result<(), FundingValidationError> {
        if self.funder_name.trim().is_empty() {
            return Err(FundingValidationError::EmptyFunderName);
        }

        if self.amount.is_negative() {
            return Err(FundingValidationError::NegativeAmount(self.amount));
        }

        // Repayment dates only make sense on repayable funding
        if self.repayment_date.is_some() && !self.is_repayable {
            return Err(FundingValidationError::RepaymentDateWithoutRepayable);
        }

        Ok(())
    }
}

impl fmt::Display for Funding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.received_date.format("%Y-%m-%d"),
            self.funder_name,
            self.amount
        )
    }
}

/// Validation errors for funding records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingValidationError {
    EmptyFunderName,
    NegativeAmount(Money),
    RepaymentDateWithoutRepayable,
}

impl fmt::Display for FundingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFunderName => write!(f, "Funder name cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Funding amount cannot be negative ({})", amount)
            }
            Self::RepaymentDateWithoutRepayable => {
                write!(f, "Only repayable funding can have a repayment date")
            }
        }
    }
}

impl std::error::Error for FundingValidationError {}
