//! Dashboard report
//!
//! The at-a-glance view: current-month totals with month-over-month change,
//! funding position, alert counts, recent activity, and the monthly trend.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::OutlayResult;
use crate::models::period::first_of_month;
use crate::models::{Expense, Funding, Money};
use crate::reports::reminders::ReminderReport;
use crate::reports::trend::MonthlyTrend;
use crate::storage::Storage;

/// Number of recent expenses shown on the dashboard
const RECENT_EXPENSES: usize = 5;

/// Number of recent funding records shown on the dashboard
const RECENT_FUNDING: usize = 3;

/// At-a-glance business overview
#[derive(Debug, Clone)]
pub struct DashboardReport {
    /// Reference date the dashboard was built for
    pub today: NaiveDate,
    /// Expense total for the current calendar month
    pub current_month_total: Money,
    /// GST total for the current calendar month (flagged expenses only)
    pub current_month_gst: Money,
    /// Spend change vs the previous month, percent; zero when the previous
    /// month had no spend
    pub expense_change_pct: f64,
    /// GST change vs the previous month, percent; same zero rule
    pub gst_change_pct: f64,
    /// Funding received across all records
    pub total_funding: Money,
    /// Repayable funding not yet repaid
    pub outstanding_repayable: Money,
    /// Unpaid recurring bills past their due date
    pub overdue_bills: usize,
    /// Repayments due within the alert window
    pub repayments_due_soon: usize,
    /// Current-month expenses with the GST flag set
    pub gst_applicable_count: usize,
    /// Current-month GST divided by the number of flagged expenses
    pub average_gst: Money,
    /// Most recent expenses, newest first
    pub recent_expenses: Vec<Expense>,
    /// Most recent funding, newest first
    pub recent_funding: Vec<Funding>,
    /// Six-month expense and GST trend
    pub trend: MonthlyTrend,
}

impl DashboardReport {
    /// Generate the dashboard from stored records
    pub fn generate(storage: &Storage, today: NaiveDate) -> OutlayResult<Self> {
        let expenses = storage.expenses.get_all()?;
        let funding = storage.funding.get_all()?;
        Ok(Self::build(&expenses, &funding, today))
    }

    /// Build the dashboard from expense and funding slices
    pub fn build(expenses: &[Expense], funding: &[Funding], today: NaiveDate) -> Self {
        let this_month = first_of_month(today);
        let prev_month = this_month
            .checked_sub_months(Months::new(1))
            .unwrap_or(this_month);

        let current: Vec<&Expense> = expenses
            .iter()
            .filter(|e| same_month(e.date, this_month))
            .collect();
        let previous: Vec<&Expense> = expenses
            .iter()
            .filter(|e| same_month(e.date, prev_month))
            .collect();

        let current_month_total: Money = current.iter().map(|e| e.amount).sum();
        let current_month_gst: Money = current.iter().map(|e| e.effective_gst()).sum();
        let prev_month_total: Money = previous.iter().map(|e| e.amount).sum();
        let prev_month_gst: Money = previous.iter().map(|e| e.effective_gst()).sum();

        let total_funding: Money = funding.iter().map(|f| f.amount).sum();
        let outstanding_repayable: Money = funding
            .iter()
            .filter(|f| f.is_outstanding())
            .map(|f| f.amount)
            .sum();

        let reminders = ReminderReport::classify(expenses, funding, today);

        let gst_applicable_count = current.iter().filter(|e| e.gst_applicable).count();
        let average_gst =
            Money::from_cents(current_month_gst.cents() / gst_applicable_count.max(1) as i64);

        let mut recent_expenses: Vec<Expense> = expenses.to_vec();
        recent_expenses
            .sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        recent_expenses.truncate(RECENT_EXPENSES);

        let mut recent_funding: Vec<Funding> = funding.to_vec();
        recent_funding.sort_by(|a, b| {
            b.received_date
                .cmp(&a.received_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        recent_funding.truncate(RECENT_FUNDING);

        Self {
            today,
            current_month_total,
            current_month_gst,
            expense_change_pct: change_pct(current_month_total, prev_month_total),
            gst_change_pct: change_pct(current_month_gst, prev_month_gst),
            total_funding,
            outstanding_repayable,
            overdue_bills: reminders.overdue.len(),
            repayments_due_soon: reminders.repayment_alerts.len(),
            gst_applicable_count,
            average_gst,
            recent_expenses,
            recent_funding,
            trend: MonthlyTrend::from_expenses(expenses, today),
        }
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Dashboard {}\n",
            self.today.format("%Y-%m-%d")
        ));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "This Month:        {:>12}  ({:+.1}% vs last month)\n",
            self.current_month_total.to_string(),
            self.expense_change_pct
        ));
        output.push_str(&format!(
            "GST This Month:    {:>12}  ({:+.1}% vs last month)\n",
            self.current_month_gst.to_string(),
            self.gst_change_pct
        ));
        output.push_str(&format!(
            "Total Funding:     {:>12}\n",
            self.total_funding.to_string()
        ));
        output.push_str(&format!(
            "Outstanding:       {:>12}\n",
            self.outstanding_repayable.to_string()
        ));

        if self.overdue_bills > 0 || self.repayments_due_soon > 0 {
            output.push_str(&format!(
                "\nAlerts: {} overdue bill(s), {} repayment(s) due soon\n",
                self.overdue_bills, self.repayments_due_soon
            ));
        }

        output.push_str("\nRecent Expenses\n");
        output.push_str(&"-".repeat(72));
        output.push('\n');
        if self.recent_expenses.is_empty() {
            output.push_str("No expenses yet.\n");
        } else {
            for expense in &self.recent_expenses {
                output.push_str(&format!(
                    "  {}  {:<28} {:<20} {:>12}\n",
                    expense.date.format("%Y-%m-%d"),
                    expense.name,
                    expense.category.as_str(),
                    expense.amount.to_string()
                ));
            }
        }

        output.push_str("\nRecent Funding\n");
        output.push_str(&"-".repeat(72));
        output.push('\n');
        if self.recent_funding.is_empty() {
            output.push_str("No funding records yet.\n");
        } else {
            for funding in &self.recent_funding {
                output.push_str(&format!(
                    "  {}  {:<28} {:>12}  {}\n",
                    funding.received_date.format("%Y-%m-%d"),
                    funding.funder_name,
                    funding.amount.to_string(),
                    if funding.is_repayable {
                        "Repayable"
                    } else {
                        "Non-repayable"
                    }
                ));
            }
        }

        output.push('\n');
        output.push_str(&self.trend.format_terminal());

        output.push_str("\nGST Summary\n");
        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "GST (Current Month):      {}\n",
            self.current_month_gst
        ));
        output.push_str(&format!(
            "GST Applicable Expenses:  {}\n",
            self.gst_applicable_count
        ));
        output.push_str(&format!(
            "Average GST per Expense:  {}\n",
            self.average_gst
        ));

        output
    }
}

fn same_month(date: NaiveDate, month_start: NaiveDate) -> bool {
    date.year() == month_start.year() && date.month() == month_start.month()
}

fn change_pct(current: Money, previous: Money) -> f64 {
    if previous.is_positive() {
        (current.cents() - previous.cents()) as f64 / previous.cents() as f64 * 100.0
    } else {
        0.0
    }
}
