//! Payment reminders and repayment alerts
//!
//! Classifies unpaid recurring bills into overdue/upcoming/later buckets and
//! flags repayable funding that is due back soon.

use chrono::NaiveDate;

use crate::error::OutlayResult;
use crate::models::period::{days_until_due, is_overdue};
use crate::models::{Expense, Funding};
use crate::storage::Storage;

/// Bills due within this many days count as upcoming
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Repayments due within this many days raise an alert
///
/// Narrower than the bill window; repayments get flagged closer to the due
/// date than bills do.
pub const REPAYMENT_ALERT_WINDOW_DAYS: i64 = 5;

/// Reminder buckets for recurring bills plus repayment alerts
///
/// Every unpaid recurring bill with a due date lands in exactly one of the
/// three buckets.
#[derive(Debug, Clone)]
pub struct ReminderReport {
    /// Bills whose due date has passed
    pub overdue: Vec<Expense>,
    /// Bills due today through the next week
    pub upcoming: Vec<Expense>,
    /// Bills due beyond the upcoming window
    pub later: Vec<Expense>,
    /// Outstanding repayable funding due back within the alert window
    pub repayment_alerts: Vec<Funding>,
}

impl ReminderReport {
    /// Generate reminders from stored records
    pub fn generate(storage: &Storage, today: NaiveDate) -> OutlayResult<Self> {
        let expenses = storage.expenses.get_all()?;
        let funding = storage.funding.get_all()?;
        Ok(Self::classify(&expenses, &funding, today))
    }

    /// Classify expense and funding slices relative to a reference date
    pub fn classify(expenses: &[Expense], funding: &[Funding], today: NaiveDate) -> Self {
        let mut overdue = Vec::new();
        let mut upcoming = Vec::new();
        let mut later = Vec::new();

        for expense in expenses {
            if !expense.is_reminder_candidate() {
                continue;
            }
            match expense.due_date {
                Some(due) if is_overdue(due, today) => overdue.push(expense.clone()),
                Some(due) if days_until_due(due, today) <= DUE_SOON_WINDOW_DAYS => {
                    upcoming.push(expense.clone())
                }
                Some(_) => later.push(expense.clone()),
                None => {}
            }
        }

        let repayment_alerts = funding
            .iter()
            .filter(|f| {
                f.is_repayment_candidate()
                    && f.repayment_date.is_some_and(|due| {
                        (0..=REPAYMENT_ALERT_WINDOW_DAYS).contains(&days_until_due(due, today))
                    })
            })
            .cloned()
            .collect();

        Self {
            overdue,
            upcoming,
            later,
            repayment_alerts,
        }
    }

    /// Check whether there is nothing to report
    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty()
            && self.upcoming.is_empty()
            && self.later.is_empty()
            && self.repayment_alerts.is_empty()
    }

    /// Total number of bills across the three buckets
    pub fn bill_count(&self) -> usize {
        self.overdue.len() + self.upcoming.len() + self.later.len()
    }

    /// Format the reminders for terminal display
    pub fn format_terminal(&self, today: NaiveDate) -> String {
        let mut output = String::new();

        output.push_str("Payment Reminders\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.is_empty() {
            output.push_str("Nothing due. All bills and repayments are on track.\n");
            return output;
        }

        let sections: [(&str, &Vec<Expense>); 3] = [
            ("OVERDUE", &self.overdue),
            ("DUE SOON", &self.upcoming),
            ("LATER", &self.later),
        ];

        for (title, bills) in sections {
            if bills.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{} ({})\n", title, bills.len()));
            for bill in bills {
                if let Some(due) = bill.due_date {
                    output.push_str(&format!(
                        "  {}  {:<30} {:>12}  {}\n",
                        due.format("%Y-%m-%d"),
                        bill.name,
                        bill.amount.to_string(),
                        describe_due(days_until_due(due, today))
                    ));
                }
            }
        }

        if !self.repayment_alerts.is_empty() {
            output.push_str("\nRepayment Alerts\n");
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for alert in &self.repayment_alerts {
                if let Some(due) = alert.repayment_date {
                    output.push_str(&format!(
                        "  {}  {:<30} {:>12}  {}\n",
                        due.format("%Y-%m-%d"),
                        alert.funder_name,
                        alert.amount.to_string(),
                        describe_due(days_until_due(due, today))
                    ));
                }
            }
        }

        output
    }
}

/// Human-readable phrase for a days-until-due count
fn describe_due(days: i64) -> String {
    if days < 0 {
        let late = -days;
        if late == 1 {
            "1 day overdue".to_string()
        } else {
            format!("{} days overdue", late)
        }
    } else if days == 0 {
        "due today".to_string()
    } else if days == 1 {
        "due in 1 day".to_string()
    } else {
        format!("due in {} days", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn bill(name: &str, due: NaiveDate) -> Expense {
        let mut expense = Expense::new(
            today() - Duration::days(30),
            Category::new("Utilities").unwrap(),
            name,
            Money::from_cents(8_000),
        );
        expense.set_recurring(due);
        expense
    }

    fn repayable(funder: &str, due: NaiveDate) -> Funding {
        let mut funding = Funding::new(
            today() - Duration::days(60),
            funder,
            Money::from_cents(100_000),
        );
        funding.set_repayable(due);
        funding
    }

    #[test]
    fn test_buckets_are_disjoint_and_exhaustive() {
        let candidates: Vec<Expense> = (-10..=20)
            .map(|offset| bill(&format!("bill {}", offset), today() + Duration::days(offset)))
            .collect();

        let report = ReminderReport::classify(&candidates, &[], today());

        assert_eq!(report.bill_count(), candidates.len());
        assert_eq!(report.overdue.len(), 10); // offsets -10..=-1
        assert_eq!(report.upcoming.len(), 8); // offsets 0..=7
        assert_eq!(report.later.len(), 13); // offsets 8..=20

        // No bill appears in more than one bucket
        for e in &report.overdue {
            assert!(!report.upcoming.iter().any(|u| u.id == e.id));
            assert!(!report.later.iter().any(|l| l.id == e.id));
        }
        for e in &report.upcoming {
            assert!(!report.later.iter().any(|l| l.id == e.id));
        }
    }

    #[test]
    fn test_window_edges() {
        let due_today = bill("today", today());
        let due_in_seven = bill("seven", today() + Duration::days(7));
        let due_in_eight = bill("eight", today() + Duration::days(8));
        let due_yesterday = bill("yesterday", today() - Duration::days(1));

        let report = ReminderReport::classify(
            &[due_today, due_in_seven, due_in_eight, due_yesterday],
            &[],
            today(),
        );

        assert_eq!(report.upcoming.len(), 2);
        assert_eq!(report.later.len(), 1);
        assert_eq!(report.overdue.len(), 1);
        assert_eq!(report.overdue[0].name, "yesterday");
        assert_eq!(report.later[0].name, "eight");
    }

    #[test]
    fn test_non_candidates_excluded() {
        let mut paid = bill("paid", today() + Duration::days(2));
        paid.mark_paid();

        let one_off = Expense::new(
            today(),
            Category::new("Rent").unwrap(),
            "one-off",
            Money::from_cents(1_000),
        );

        let mut recurring_no_due = one_off.clone();
        recurring_no_due.is_recurring = true;
        recurring_no_due.name = "recurring, no due date".to_string();

        let report = ReminderReport::classify(&[paid, one_off, recurring_no_due], &[], today());
        assert!(report.is_empty());
    }

    #[test]
    fn test_repayment_alert_window() {
        let in_three = repayable("three days", today() + Duration::days(3));
        let in_five = repayable("five days", today() + Duration::days(5));
        let in_six = repayable("six days", today() + Duration::days(6));
        let due_today = repayable("today", today());
        let past_due = repayable("past", today() - Duration::days(1));

        let report = ReminderReport::classify(
            &[],
            &[in_three, in_five, in_six, due_today, past_due],
            today(),
        );

        let names: Vec<&str> = report
            .repayment_alerts
            .iter()
            .map(|f| f.funder_name.as_str())
            .collect();
        assert_eq!(names, vec!["three days", "five days", "today"]);
    }

    #[test]
    fn test_repaid_funding_not_alerted() {
        let mut loan = repayable("bank", today() + Duration::days(2));
        loan.mark_repaid();

        let report = ReminderReport::classify(&[], &[loan], today());
        assert!(report.repayment_alerts.is_empty());
    }

    #[test]
    fn test_describe_due() {
        assert_eq!(describe_due(-3), "3 days overdue");
        assert_eq!(describe_due(-1), "1 day overdue");
        assert_eq!(describe_due(0), "due today");
        assert_eq!(describe_due(1), "due in 1 day");
        assert_eq!(describe_due(4), "due in 4 days");
    }

    #[test]
    fn test_format_terminal() {
        let overdue = bill("Internet bill", today() - Duration::days(3));
        let soon = repayable("Community Bank", today() + Duration::days(2));

        let report = ReminderReport::classify(&[overdue], &[soon], today());
        let formatted = report.format_terminal(today());

        assert!(formatted.contains("OVERDUE (1)"));
        assert!(formatted.contains("Internet bill"));
        assert!(formatted.contains("3 days overdue"));
        assert!(formatted.contains("Repayment Alerts"));
        assert!(formatted.contains("Community Bank"));
        assert!(formatted.contains("due in 2 days"));

        let empty = ReminderReport::classify(&[], &[], today());
        assert!(empty.format_terminal(today()).contains("Nothing due"));
    }
}
