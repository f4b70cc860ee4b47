//! Expense model
//!
//! Represents a business expense with optional GST tracking, recurring-bill
//! due dates, and attachment metadata.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::attachment::FileAttachment;
use super::category::Category;
use super::ids::{AttachmentId, ExpenseId};
use super::money::Money;

/// A business expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Date the expense was incurred
    pub date: NaiveDate,

    /// Category label (open, user-extensible set)
    pub category: Category,

    /// Display name, e.g. "Office rent - March"
    pub name: String,

    /// Amount (non-negative)
    pub amount: Money,

    /// Whether GST applies to this expense
    #[serde(default)]
    pub gst_applicable: bool,

    /// Stored GST amount; only meaningful when `gst_applicable` is set
    #[serde(default)]
    pub gst_amount: Money,

    /// Whether this is a recurring bill
    #[serde(default)]
    pub is_recurring: bool,

    /// Due date for the next occurrence (recurring bills only)
    pub due_date: Option<NaiveDate>,

    /// Whether the current occurrence has been paid
    #[serde(default)]
    pub is_paid: bool,

    /// Attached file metadata
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,

    /// When the expense was created
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(date: NaiveDate, category: Category, name: impl Into<String>, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            date,
            category,
            name: name.into(),
            amount,
            gst_applicable: false,
            gst_amount: Money::zero(),
            is_recurring: false,
            due_date: None,
            is_paid: false,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// GST contribution for aggregation
    ///
    /// Zero when the GST flag is not set, regardless of any stray stored
    /// amount.
    pub fn effective_gst(&self) -> Money {
        if self.gst_applicable {
            self.gst_amount
        } else {
            Money::zero()
        }
    }

    /// Check if this expense should appear in payment reminders
    ///
    /// Candidates are recurring bills with a due date that are not yet paid.
    pub fn is_reminder_candidate(&self) -> bool {
        self.is_recurring && self.due_date.is_some() && !self.is_paid
    }

    /// Record GST for this expense
    pub fn set_gst(&mut self, amount: Money) {
        self.gst_applicable = true;
        self.gst_amount = amount;
        self.updated_at = Utc::now();
    }

    /// Mark this expense as a recurring bill due on the given date
    pub fn set_recurring(&mut self, due_date: NaiveDate) {
        self.is_recurring = true;
        self.due_date = Some(due_date);
        self.updated_at = Utc::now();
    }

    /// Mark the current occurrence as paid
    pub fn mark_paid(&mut self) {
        self.is_paid = true;
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

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if self.gst_amount.is_negative() {
            return Err(ExpenseValidationError::NegativeGst(self.gst_amount));
        }

        // Due dates only make sense on recurring bills
        if self.due_date.is_some() && !self.is_recurring {
            return Err(ExpenseValidationError::DueDateWithoutRecurring);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.name,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NegativeAmount(Money),
    NegativeGst(Money),
    DueDateWithoutRecurring,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount cannot be negative ({})", amount)
            }
            Self::NegativeGst(amount) => {
                write!(f, "GST amount cannot be negative ({})", amount)
            }
            Self::DueDateWithoutRecurring => {
                write!(f, "Only recurring expenses can have a due date")
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_category() -> Category {
        Category::new("Rent").unwrap()
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new(test_date(), test_category(), "Office rent", Money::from_cents(120_000));

        assert_eq!(expense.name, "Office rent");
        assert_eq!(expense.amount, Money::from_cents(120_000));
        assert!(!expense.gst_applicable);
        assert!(!expense.is_recurring);
        assert!(!expense.is_paid);
        assert!(expense.attachments.is_empty());
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_effective_gst_respects_flag() {
        let mut expense = Expense::new(test_date(), test_category(), "Supplies", Money::from_cents(5000));

        // Stray stored amount without the flag contributes nothing
        expense.gst_amount = Money::from_cents(500);
        assert_eq!(expense.effective_gst(), Money::zero());

        expense.set_gst(Money::from_cents(500));
        assert_eq!(expense.effective_gst(), Money::from_cents(500));
    }

    #[test]
    fn test_reminder_candidate() {
        let mut expense = Expense::new(test_date(), test_category(), "Internet", Money::from_cents(8000));
        assert!(!expense.is_reminder_candidate());

        expense.set_recurring(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert!(expense.is_reminder_candidate());

        expense.mark_paid();
        assert!(!expense.is_reminder_candidate());
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new(test_date(), test_category(), "Valid", Money::from_cents(100));
        assert!(expense.validate().is_ok());

        expense.name = "  ".to_string();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyName));

        expense.name = "Valid".to_string();
        expense.amount = Money::from_cents(-100);
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeAmount(_))
        ));

        expense.amount = Money::from_cents(100);
        expense.due_date = Some(test_date());
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::DueDateWithoutRecurring)
        );
    }

    #[test]
    fn test_attachments() {
        let mut expense = Expense::new(test_date(), test_category(), "Printer", Money::from_cents(30_000));
        let attachment = FileAttachment::new("receipt.pdf", 2048, "application/pdf", "/tmp/r.pdf");
        let attachment_id = attachment.id;

        expense.add_attachment(attachment);
        assert_eq!(expense.attachments.len(), 1);

        assert!(expense.remove_attachment(attachment_id));
        assert!(expense.attachments.is_empty());
        assert!(!expense.remove_attachment(attachment_id));
    }

    #[test]
    fn test_serialization() {
        let mut expense = Expense::new(test_date(), test_category(), "Hosting", Money::from_cents(2500));
        expense.set_gst(Money::from_cents(250));
        expense.set_recurring(NaiveDate::from_ymd_opt(2025, 2, 15).unwrap());

        let json = serde_json::to_string(&expense).unwrap();
        let deserialized: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense.id, deserialized.id);
        assert_eq!(expense.amount, deserialized.amount);
        assert_eq!(expense.gst_amount, deserialized.gst_amount);
        assert_eq!(expense.due_date, deserialized.due_date);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        // Older files without the newer flags still load
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "date": "2025-01-15",
            "category": "Rent",
            "name": "Office rent",
            "amount": 120000,
            "due_date": null,
            "created_at": "2025-01-15T10:00:00Z",
            "updated_at": "2025-01-15T10:00:00Z"
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert!(!expense.gst_applicable);
        assert_eq!(expense.gst_amount, Money::zero());
        assert!(!expense.is_paid);
        assert!(expense.attachments.is_empty());
    }

    #[test]
    fn test_display() {
        let expense = Expense::new(test_date(), test_category(), "Office rent", Money::from_cents(120_050));
        assert_eq!(format!("{}", expense), "2025-01-15 Office rent $1200.50");
    }
}
