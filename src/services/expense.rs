//! Expense service
//!
//! Provides business logic for expense management: creation with GST and
//! recurring-bill details, partial edits, payment status, and receipt
//! attachments.

use std::path::Path;

use chrono::{NaiveDate, Utc};

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Category, Expense, ExpenseId, Money};
use crate::services::{attachment_from_path, resolve_attachment};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expense listings
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Filter by category
    pub category: Option<Category>,
    /// Filter by date range start
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end
    pub end_date: Option<NaiveDate>,
    /// Keep only recurring (true) or one-off (false) expenses
    pub recurring: Option<bool>,
    /// Keep only paid (true) or pending (false) expenses
    pub paid: Option<bool>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Filter by recurring flag
    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring = Some(recurring);
        self
    }

    /// Filter by paid status
    pub fn paid(mut self, paid: bool) -> Self {
        self.paid = Some(paid);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub date: NaiveDate,
    pub category: Category,
    pub name: String,
    pub amount: Money,
    /// GST amount; present means GST applies to this expense
    pub gst_amount: Option<Money>,
    pub recurring: bool,
    pub due_date: Option<NaiveDate>,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new expense
    pub fn create(&self, input: CreateExpenseInput) -> OutlayResult<Expense> {
        let mut expense = Expense::new(
            input.date,
            input.category,
            input.name.trim().to_string(),
            input.amount,
        );

        expense.gst_applicable = input.gst_amount.is_some();
        expense.gst_amount = input.gst_amount.unwrap_or_else(Money::zero);
        expense.is_recurring = input.recurring;
        expense.due_date = input.due_date;

        expense
            .validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> OutlayResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by identifier
    ///
    /// Accepts a full UUID (with or without the `exp-` prefix) or a unique
    /// prefix of one, as printed in list output.
    pub fn find(&self, identifier: &str) -> OutlayResult<Expense> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            if let Some(expense) = self.storage.expenses.get(id)? {
                return Ok(expense);
            }
        }

        let needle = identifier
            .strip_prefix("exp-")
            .unwrap_or(identifier)
            .to_lowercase();
        if needle.is_empty() {
            return Err(OutlayError::expense_not_found(identifier));
        }

        let matches: Vec<Expense> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| e.id.as_uuid().to_string().starts_with(&needle))
            .collect();

        if matches.len() > 1 {
            return Err(OutlayError::Validation(format!(
                "Expense ID '{}' is ambiguous ({} matches)",
                identifier,
                matches.len()
            )));
        }

        matches
            .into_iter()
            .next()
            .ok_or_else(|| OutlayError::expense_not_found(identifier))
    }

    /// List expenses with optional filtering, most recent first
    pub fn list(&self, filter: ExpenseFilter) -> OutlayResult<Vec<Expense>> {
        let mut expenses = if let Some(category) = &filter.category {
            self.storage.expenses.get_by_category(category)?
        } else if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            self.storage.expenses.get_by_date_range(start, end)?
        } else {
            self.storage.expenses.get_all()?
        };

        // Apply additional filters
        if let Some(start) = filter.start_date {
            expenses.retain(|e| e.date >= start);
        }
        if let Some(end) = filter.end_date {
            expenses.retain(|e| e.date <= end);
        }
        if let Some(recurring) = filter.recurring {
            expenses.retain(|e| e.is_recurring == recurring);
        }
        if let Some(paid) = filter.paid {
            expenses.retain(|e| e.is_paid == paid);
        }

        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        Ok(expenses)
    }

    /// Update an expense
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &self,
        id: ExpenseId,
        date: Option<NaiveDate>,
        category: Option<Category>,
        name: Option<String>,
        amount: Option<Money>,
        gst_amount: Option<Option<Money>>,
        recurring: Option<bool>,
        due_date: Option<Option<NaiveDate>>,
    ) -> OutlayResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;

        // Apply updates
        if let Some(new_date) = date {
            expense.date = new_date;
        }

        if let Some(new_category) = category {
            expense.category = new_category;
        }

        if let Some(new_name) = name {
            expense.name = new_name.trim().to_string();
        }

        if let Some(new_amount) = amount {
            expense.amount = new_amount;
        }

        // gst_amount: Option<Option<Money>>
        // - None: no change
        // - Some(None): GST no longer applies
        // - Some(Some(m)): GST applies with amount m
        if let Some(new_gst) = gst_amount {
            expense.gst_applicable = new_gst.is_some();
            expense.gst_amount = new_gst.unwrap_or_else(Money::zero);
        }

        if let Some(new_recurring) = recurring {
            expense.is_recurring = new_recurring;
            // A one-off expense cannot keep a due date
            if !new_recurring {
                expense.due_date = None;
            }
        }

        if let Some(new_due) = due_date {
            expense.due_date = new_due;
        }

        expense.updated_at = Utc::now();

        expense
            .validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        Ok(expense)
    }

    /// Mark the current occurrence of a recurring expense as paid
    pub fn mark_paid(&self, id: ExpenseId) -> OutlayResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;

        expense.mark_paid();

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        Ok(expense)
    }

    /// Delete an expense along with its attachment metadata
    pub fn delete(&self, id: ExpenseId) -> OutlayResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        Ok(expense)
    }

    /// Attach a file's metadata to an expense
    pub fn attach(&self, id: ExpenseId, file_path: &Path) -> OutlayResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;

        let attachment = attachment_from_path(file_path)?;
        expense.add_attachment(attachment);

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        Ok(expense)
    }

    /// Remove attachment metadata from an expense
    ///
    /// The attachment may be identified by ID, unique ID prefix, or file name.
    pub fn detach(&self, id: ExpenseId, attachment: &str) -> OutlayResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| OutlayError::expense_not_found(id.to_string()))?;

        let attachment_id = resolve_attachment(&expense.attachments, attachment)
            .ok_or_else(|| OutlayError::attachment_not_found(attachment))?;
        expense.remove_attachment(attachment_id);

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        Ok(expense)
    }

    /// Count expenses
    pub fn count(&self) -> OutlayResult<usize> {
        self.storage.expenses.count()
    }
}
