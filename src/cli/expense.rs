//! Expense CLI commands
//!
//! Implements CLI commands for expense management.

use chrono::NaiveDate;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{OutlayError, OutlayResult};
use crate::models::{Category, Money};
use crate::services::{CreateExpenseInput, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Expense name
        name: String,
        /// Amount (e.g. "120.50")
        amount: String,
        /// Category label
        #[arg(short, long, default_value = "Other")]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// GST amount; providing one marks the expense GST-applicable
        #[arg(short, long)]
        gst: Option<String>,
        /// Mark as a recurring bill
        #[arg(short, long)]
        recurring: bool,
        /// Due date for a recurring bill (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// List expenses
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Show only recurring bills
        #[arg(long)]
        recurring: bool,
        /// Show only unpaid expenses
        #[arg(long)]
        unpaid: bool,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New GST amount ("none" clears the GST flag)
        #[arg(short, long)]
        gst: Option<String>,
        /// Change the recurring flag
        #[arg(short, long)]
        recurring: Option<bool>,
        /// New due date ("none" clears it)
        #[arg(long)]
        due: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Mark an expense as paid
    #[command(alias = "paid")]
    MarkPaid {
        /// Expense ID
        id: String,
    },
    /// Attach a file to an expense
    Attach {
        /// Expense ID
        id: String,
        /// Path to the file
        file: PathBuf,
    },
    /// Remove an attachment from an expense
    Detach {
        /// Expense ID
        id: String,
        /// Attachment name or ID
        attachment: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> OutlayResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            name,
            amount,
            category,
            date,
            gst,
            recurring,
            due,
        } => {
            let amount = Money::parse(&amount).map_err(|e| {
                OutlayError::Validation(format!(
                    "Invalid amount format: '{}'. Use format like '120.50'. Error: {}",
                    amount, e
                ))
            })?;

            let date = if let Some(date_str) = date {
                NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
                    OutlayError::Validation(format!(
                        "Invalid date format: '{}'. Use YYYY-MM-DD",
                        date_str
                    ))
                })?
            } else {
                chrono::Local::now().date_naive()
            };

            let category =
                Category::new(category).map_err(|e| OutlayError::Validation(e.to_string()))?;

            let gst_amount = if let Some(gst_str) = gst {
                Some(Money::parse(&gst_str).map_err(|e| {
                    OutlayError::Validation(format!("Invalid GST amount: {}", e))
                })?)
            } else {
                None
            };

            let due_date = if let Some(due_str) = due {
                Some(
                    NaiveDate::parse_from_str(&due_str, "%Y-%m-%d").map_err(|_| {
                        OutlayError::Validation(format!(
                            "Invalid due date format: '{}'. Use YYYY-MM-DD",
                            due_str
                        ))
                    })?,
                )
            } else {
                None
            };

            let input = CreateExpenseInput {
                date,
                category,
                name,
                amount,
                gst_amount,
                recurring,
                due_date,
            };

            let expense = service.create(input)?;

            println!("Created expense:");
            println!("  ID:       {}", expense.id);
            println!("  Date:     {}", expense.date.format("%Y-%m-%d"));
            println!("  Name:     {}", expense.name);
            println!("  Category: {}", expense.category);
            println!(
                "  Amount:   {}",
                expense.amount.format_with_symbol(&settings.currency_symbol)
            );
            if expense.gst_applicable {
                println!(
                    "  GST:      {}",
                    expense
                        .gst_amount
                        .format_with_symbol(&settings.currency_symbol)
                );
            }
            if expense.is_recurring {
                match expense.due_date {
                    Some(due) => println!("  Due:      {}", due.format("%Y-%m-%d")),
                    None => println!("  Due:      (not set)"),
                }
            }
        }

        ExpenseCommands::List {
            category,
            from,
            to,
            recurring,
            unpaid,
            limit,
        } => {
            let mut filter = ExpenseFilter::new().limit(limit);

            if let Some(label) = category {
                let category =
                    Category::new(label).map_err(|e| OutlayError::Validation(e.to_string()))?;
                filter = filter.category(category);
            }

            if let Some(from_str) = from {
                let from_date =
                    NaiveDate::parse_from_str(&from_str, "%Y-%m-%d").map_err(|_| {
                        OutlayError::Validation(format!(
                            "Invalid date format: '{}'. Use YYYY-MM-DD",
                            from_str
                        ))
                    })?;
                filter.start_date = Some(from_date);
            }

            if let Some(to_str) = to {
                let to_date = NaiveDate::parse_from_str(&to_str, "%Y-%m-%d").map_err(|_| {
                    OutlayError::Validation(format!(
                        "Invalid date format: '{}'. Use YYYY-MM-DD",
                        to_str
                    ))
                })?;
                filter.end_date = Some(to_date);
            }

            if recurring {
                filter = filter.recurring(true);
            }
            if unpaid {
                filter = filter.paid(false);
            }

            let expenses = service.list(filter)?;

            print!("{}", format_expense_list(&expenses, settings));
            println!("\nShowing {} expense(s)", expenses.len());
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(&id)?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            name,
            amount,
            category,
            date,
            gst,
            recurring,
            due,
        } => {
            let expense = service.find(&id)?;

            let new_amount = if let Some(amt_str) = amount {
                Some(Money::parse(&amt_str).map_err(|e| {
                    OutlayError::Validation(format!("Invalid amount: {}", e))
                })?)
            } else {
                None
            };

            let new_date = if let Some(date_str) = date {
                Some(
                    NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
                        OutlayError::Validation(format!(
                            "Invalid date format: '{}'. Use YYYY-MM-DD",
                            date_str
                        ))
                    })?,
                )
            } else {
                None
            };

            let new_category = if let Some(label) = category {
                Some(Category::new(label).map_err(|e| OutlayError::Validation(e.to_string()))?)
            } else {
                None
            };

            let new_gst = match gst {
                Some(value) if value.is_empty() || value.to_lowercase() == "none" => Some(None),
                Some(value) => Some(Some(Money::parse(&value).map_err(|e| {
                    OutlayError::Validation(format!("Invalid GST amount: {}", e))
                })?)),
                None => None,
            };

            let new_due = match due {
                Some(value) if value.is_empty() || value.to_lowercase() == "none" => Some(None),
                Some(value) => Some(Some(
                    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
                        OutlayError::Validation(format!(
                            "Invalid due date format: '{}'. Use YYYY-MM-DD",
                            value
                        ))
                    })?,
                )),
                None => None,
            };

            let updated = service.update(
                expense.id,
                new_date,
                new_category,
                name,
                new_amount,
                new_gst,
                recurring,
                new_due,
            )?;

            println!("Updated expense: {}", updated.id);
            println!("  Date:     {}", updated.date.format("%Y-%m-%d"));
            println!("  Name:     {}", updated.name);
            println!(
                "  Amount:   {}",
                updated.amount.format_with_symbol(&settings.currency_symbol)
            );
        }

        ExpenseCommands::Delete { id, force } => {
            let expense = service.find(&id)?;

            if !force {
                println!("About to delete expense:");
                println!("  Date:   {}", expense.date.format("%Y-%m-%d"));
                println!("  Name:   {}", expense.name);
                println!(
                    "  Amount: {}",
                    expense.amount.format_with_symbol(&settings.currency_symbol)
                );
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(expense.id)?;
            println!(
                "Deleted expense: {} ({} {})",
                deleted.id,
                deleted.date.format("%Y-%m-%d"),
                deleted.name
            );
        }

        ExpenseCommands::MarkPaid { id } => {
            let expense = service.find(&id)?;
            let paid = service.mark_paid(expense.id)?;
            println!("Marked expense as paid: {} ({})", paid.id, paid.name);
        }

        ExpenseCommands::Attach { id, file } => {
            let expense = service.find(&id)?;
            let updated = service.attach(expense.id, &file)?;

            if let Some(attachment) = updated.attachments.last() {
                println!(
                    "Attached to expense {}: {} ({})",
                    updated.id,
                    attachment.name,
                    attachment.formatted_size()
                );
            }
        }

        ExpenseCommands::Detach { id, attachment } => {
            let expense = service.find(&id)?;
            let updated = service.detach(expense.id, &attachment)?;
            println!(
                "Removed attachment '{}' from expense {}",
                attachment, updated.id
            );
        }
    }

    Ok(())
}
