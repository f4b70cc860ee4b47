//! Financial summary report
//!
//! Aggregates expenses and funding over a report window into the totals,
//! category breakdown, and cash-flow figures used by reports and exports.

use std::collections::HashMap;

use crate::error::OutlayResult;
use crate::models::{Category, Expense, Funding, Money, ReportWindow};
use crate::storage::Storage;

/// Per-category expense totals
#[derive(Debug, Clone)]
pub struct CategoryBreakdown {
    /// Category label
    pub category: Category,
    /// Total amount spent in this category
    pub total: Money,
    /// Number of expenses in this category
    pub count: usize,
    /// Share of the total expense amount, 0-100
    pub percentage: f64,
}

/// A funding record's share of the window's funding
#[derive(Debug, Clone)]
pub struct FundingShare {
    /// Who provided the funds
    pub funder_name: String,
    /// Amount received
    pub amount: Money,
    /// Whether the funds must be repaid
    pub repayable: bool,
    /// Share of the total funding received, 0-100
    pub percentage: f64,
}

/// Financial summary for a report window
#[derive(Debug, Clone)]
pub struct ReportSummary {
    /// The window the summary covers
    pub window: ReportWindow,
    /// Number of expenses in the window
    pub expense_count: usize,
    /// Sum of expense amounts
    pub total_amount: Money,
    /// Sum of GST over expenses where the GST flag is set
    pub total_gst: Money,
    /// Number of funding records in the window
    pub funding_count: usize,
    /// Sum of funding amounts
    pub total_funding: Money,
    /// Funding received minus expenses incurred
    pub net_cash_flow: Money,
    /// Average expense amount; equals the total when the window is empty
    pub average_expense: Money,
    /// Per-category totals, descending by amount
    pub expenses_by_category: Vec<CategoryBreakdown>,
    /// Per-record funding shares, most recent first
    pub funding_shares: Vec<FundingShare>,
}

impl ReportSummary {
    /// Generate a summary for a window from stored records
    pub fn generate(storage: &Storage, window: ReportWindow) -> OutlayResult<Self> {
        let expenses = storage
            .expenses
            .get_by_date_range(window.start, window.end)?;
        let funding = storage
            .funding
            .get_by_date_range(window.start, window.end)?;
        Ok(Self::summarize(&expenses, &funding, window))
    }

    /// Summarize expense and funding slices over a window
    ///
    /// Records outside the window are filtered out here, so both raw and
    /// pre-filtered slices work.
    pub fn summarize(expenses: &[Expense], funding: &[Funding], window: ReportWindow) -> Self {
        let filtered_expenses: Vec<&Expense> = expenses
            .iter()
            .filter(|e| window.contains(e.date))
            .collect();
        let filtered_funding: Vec<&Funding> = funding
            .iter()
            .filter(|f| window.contains(f.received_date))
            .collect();

        let total_amount: Money = filtered_expenses.iter().map(|e| e.amount).sum();
        let total_gst: Money = filtered_expenses.iter().map(|e| e.effective_gst()).sum();
        let total_funding: Money = filtered_funding.iter().map(|f| f.amount).sum();

        let expense_count = filtered_expenses.len();
        let funding_count = filtered_funding.len();

        // Dividing by at least 1 makes the empty-window average equal the total
        let average_expense =
            Money::from_cents(total_amount.cents() / expense_count.max(1) as i64);

        let expenses_by_category = category_breakdown(&filtered_expenses, total_amount);
        let funding_shares = funding_share_list(&filtered_funding, total_funding);

        Self {
            window,
            expense_count,
            total_amount,
            total_gst,
            funding_count,
            total_funding,
            net_cash_flow: total_funding - total_amount,
            average_expense,
            expenses_by_category,
            funding_shares,
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Financial Summary: {}\n", self.window.label()));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!("Total Expenses:   {}\n", self.expense_count));
        output.push_str(&format!("Total Amount:     {}\n", self.total_amount));
        output.push_str(&format!("Total GST:        {}\n", self.total_gst));
        output.push_str(&format!("Total Funding:    {}\n", self.total_funding));
        output.push_str(&format!("Net Cash Flow:    {}\n", self.net_cash_flow));
        output.push_str(&format!("Average Expense:  {}\n", self.average_expense));

        output.push_str("\nExpenses by Category\n");
        output.push_str(&"-".repeat(72));
        output.push('\n');

        if self.expenses_by_category.is_empty() {
            output.push_str("No expenses in this period.\n");
        } else {
            output.push_str(&format!(
                "{:<30} {:>12} {:>8} {:>8}\n",
                "Category", "Amount", "Count", "%"
            ));
            for entry in &self.expenses_by_category {
                output.push_str(&format!(
                    "{:<30} {:>12} {:>8} {:>7.1}%\n",
                    entry.category.as_str(),
                    entry.total.to_string(),
                    entry.count,
                    entry.percentage
                ));
            }
        }

        output.push_str("\nFunding Sources\n");
        output.push_str(&"-".repeat(72));
        output.push('\n');

        if self.funding_shares.is_empty() {
            output.push_str("No funding in this period.\n");
        } else {
            output.push_str(&format!(
                "{:<30} {:>12} {:>10} {:>8}\n",
                "Funder", "Amount", "Repayable", "%"
            ));
            for share in &self.funding_shares {
                output.push_str(&format!(
                    "{:<30} {:>12} {:>10} {:>7.1}%\n",
                    share.funder_name,
                    share.amount.to_string(),
                    if share.repayable { "Yes" } else { "No" },
                    share.percentage
                ));
            }
        }

        output
    }
}

/// Group expenses by category, descending by amount
///
/// The sort is stable, so categories with equal totals keep the order in
/// which they were first encountered.
fn category_breakdown(expenses: &[&Expense], total_amount: Money) -> Vec<CategoryBreakdown> {
    let mut entries: Vec<CategoryBreakdown> = Vec::new();
    let mut index: HashMap<Category, usize> = HashMap::new();

    for expense in expenses {
        match index.get(&expense.category) {
            Some(&i) => {
                entries[i].total += expense.amount;
                entries[i].count += 1;
            }
            None => {
                index.insert(expense.category.clone(), entries.len());
                entries.push(CategoryBreakdown {
                    category: expense.category.clone(),
                    total: expense.amount,
                    count: 1,
                    percentage: 0.0,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.total.cmp(&a.total));

    for entry in &mut entries {
        entry.percentage = percentage_of(entry.total, total_amount);
    }

    entries
}

fn funding_share_list(funding: &[&Funding], total_funding: Money) -> Vec<FundingShare> {
    funding
        .iter()
        .map(|f| FundingShare {
            funder_name: f.funder_name.clone(),
            amount: f.amount,
            repayable: f.is_repayable,
            percentage: percentage_of(f.amount, total_funding),
        })
        .collect()
}

fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}
