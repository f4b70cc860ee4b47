//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::OutlayError;
use crate::models::{Category, Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a category index
pub struct ExpenseStore {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: category label -> expense_ids
    by_category: RwLock<HashMap<Category, Vec<ExpenseId>>>,
}

impl ExpenseStore {
    /// Create a new expense store
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and build the category index
    pub fn load(&self) -> Result<(), OutlayError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_category.clear();

        for expense in file_data.expenses {
            let id = expense.id;
            by_category
                .entry(expense.category.clone())
                .or_default()
                .push(id);
            data.insert(id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        let file_data = ExpenseData { expenses };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all expenses, newest first by creation time
    pub fn get_all(&self) -> Result<Vec<Expense>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(expenses)
    }

    /// Get expenses for a category
    pub fn get_by_category(&self, category: &Category) -> Result<Vec<Expense>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_category = self
            .by_category
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_category.get(category).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    /// Get expenses incurred in a date range (inclusive both ends)
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, OutlayError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect())
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove from the old index entry if updating
        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_category.get_mut(&old.category) {
                ids.retain(|&id| id != expense.id);
            }
        }

        by_category
            .entry(expense.category.clone())
            .or_default()
            .push(expense.id);

        data.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> Result<bool, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(expense) = data.remove(&id) {
            if let Some(ids) = by_category.get_mut(&expense.category) {
                ids.retain(|&eid| eid != id);
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, ExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let store = ExpenseStore::new(path);
        (temp_dir, store)
    }

    fn category(label: &str) -> Category {
        Category::new(label).unwrap()
    }

    fn expense(label: &str, day: u32, cents: i64) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            category(label),
            format!("{} expense", label),
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();

        let exp = expense("Rent", 15, 120_000);
        let id = exp.id;

        store.upsert(exp).unwrap();

        let retrieved = store.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 120_000);
    }

    #[test]
    fn test_get_by_category() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();

        store.upsert(expense("Rent", 10, 100)).unwrap();
        store.upsert(expense("Rent", 12, 200)).unwrap();
        store.upsert(expense("Utilities", 14, 300)).unwrap();

        let rent = store.get_by_category(&category("Rent")).unwrap();
        assert_eq!(rent.len(), 2);

        let utilities = store.get_by_category(&category("Utilities")).unwrap();
        assert_eq!(utilities.len(), 1);
    }

    #[test]
    fn test_category_index_follows_update() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();

        let mut exp = expense("Rent", 10, 100);
        let id = exp.id;
        store.upsert(exp.clone()).unwrap();

        exp.category = category("Utilities");
        store.upsert(exp).unwrap();

        assert!(store.get_by_category(&category("Rent")).unwrap().is_empty());
        let utilities = store.get_by_category(&category("Utilities")).unwrap();
        assert_eq!(utilities.len(), 1);
        assert_eq!(utilities[0].id, id);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, store) = create_test_store();
        store.load().unwrap();

        let exp = expense("Rent", 15, 120_000);
        let id = exp.id;

        store.upsert(exp).unwrap();
        store.save().unwrap();

        // Create new store and load
        let path = temp_dir.path().join("expenses.json");
        let store2 = ExpenseStore::new(path);
        store2.load().unwrap();

        assert_eq!(store2.count().unwrap(), 1);
        let retrieved = store2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 120_000);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();

        let exp = expense("Rent", 15, 120_000);
        let id = exp.id;

        store.upsert(exp).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        assert!(store.delete(id).unwrap());
        assert_eq!(store.count().unwrap(), 0);
        assert!(!store.delete(id).unwrap());
    }

    #[test]
    fn test_date_range_query() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();

        store.upsert(expense("Rent", 10, 100)).unwrap();
        store.upsert(expense("Rent", 15, 200)).unwrap();
        store.upsert(expense("Rent", 20, 300)).unwrap();

        let range = store
            .get_by_date_range(
                NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 18).unwrap(),
            )
            .unwrap();

        assert_eq!(range.len(), 1);
        assert_eq!(range[0].amount.cents(), 200);
    }

    #[test]
    fn test_date_range_inclusive_bounds() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();

        store.upsert(expense("Rent", 12, 100)).unwrap();
        store.upsert(expense("Rent", 18, 200)).unwrap();

        let range = store
            .get_by_date_range(
                NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 18).unwrap(),
            )
            .unwrap();

        assert_eq!(range.len(), 2);
    }
}
