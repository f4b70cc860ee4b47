//! Funding CLI commands
//!
//! Implements CLI commands for funding record management.

use chrono::NaiveDate;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Settings;
use crate::display::funding::{format_funding_details, format_funding_list};
use crate::error::{OutlayError, OutlayResult};
use crate::models::Money;
use crate::services::{CreateFundingInput, FundingFilter, FundingService};
use crate::storage::Storage;

/// Funding subcommands
#[derive(Subcommand)]
pub enum FundingCommands {
    /// Record received funding
    Add {
        /// Funder name
        funder: String,
        /// Amount (e.g. "5000.00")
        amount: String,
        /// Date received (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Mark as repayable
        #[arg(short, long)]
        repayable: bool,
        /// Repayment due date (YYYY-MM-DD)
        #[arg(long)]
        repayment: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List funding records
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Show only repayable funding
        #[arg(long)]
        repayable: bool,
        /// Show only repayable funding not yet repaid
        #[arg(long)]
        outstanding: bool,
        /// Number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show funding details
    Show {
        /// Funding ID
        id: String,
    },
    /// Edit a funding record
    Edit {
        /// Funding ID
        id: String,
        /// New funder name
        #[arg(short, long)]
        funder: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New received date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Change the repayable flag
        #[arg(short, long)]
        repayable: Option<bool>,
        /// New repayment date ("none" clears it)
        #[arg(long)]
        repayment: Option<String>,
        /// New description ("none" clears it)
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a funding record
    Delete {
        /// Funding ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Mark repayable funding as repaid
    #[command(alias = "repaid")]
    MarkRepaid {
        /// Funding ID
        id: String,
    },
    /// Attach a file to a funding record
    Attach {
        /// Funding ID
        id: String,
        /// Path to the file
        file: PathBuf,
    },
    /// Remove an attachment from a funding record
    Detach {
        /// Funding ID
        id: String,
        /// Attachment name or ID
        attachment: String,
    },
}

/// Handle a funding command
pub fn handle_funding_command(
    storage: &Storage,
    settings: &Settings,
    cmd: FundingCommands,
) -> OutlayResult<()> {
    let service = FundingService::new(storage);

    match cmd {
        FundingCommands::Add {
            funder,
            amount,
            date,
            repayable,
            repayment,
            description,
        } => {
            let amount = Money::parse(&amount).map_err(|e| {
                OutlayError::Validation(format!(
                    "Invalid amount format: '{}'. Use format like '5000.00'. Error: {}",
                    amount, e
                ))
            })?;

            let received_date = if let Some(date_str) = date {
                NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
                    OutlayError::Validation(format!(
                        "Invalid date format: '{}'. Use YYYY-MM-DD",
                        date_str
                    ))
                })?
            } else {
                chrono::Local::now().date_naive()
            };

            let repayment_date = if let Some(due_str) = repayment {
                Some(
                    NaiveDate::parse_from_str(&due_str, "%Y-%m-%d").map_err(|_| {
                        OutlayError::Validation(format!(
                            "Invalid repayment date format: '{}'. Use YYYY-MM-DD",
                            due_str
                        ))
                    })?,
                )
            } else {
                None
            };

            let input = CreateFundingInput {
                received_date,
                funder_name: funder,
                amount,
                repayable,
                repayment_date,
                description,
            };

            let funding = service.create(input)?;

            println!("Recorded funding:");
            println!("  ID:       {}", funding.id);
            println!("  Received: {}", funding.received_date.format("%Y-%m-%d"));
            println!("  Funder:   {}", funding.funder_name);
            println!(
                "  Amount:   {}",
                funding.amount.format_with_symbol(&settings.currency_symbol)
            );
            if funding.is_repayable {
                match funding.repayment_date {
                    Some(due) => println!("  Repay by: {}", due.format("%Y-%m-%d")),
                    None => println!("  Repay by: (not set)"),
                }
            }
        }

        FundingCommands::List {
            from,
            to,
            repayable,
            outstanding,
            limit,
        } => {
            let mut filter = FundingFilter::new().limit(limit);

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

            if repayable {
                filter = filter.repayable(true);
            }
            if outstanding {
                filter = filter.outstanding();
            }

            let records = service.list(filter)?;

            print!("{}", format_funding_list(&records, settings));
            println!("\nShowing {} funding record(s)", records.len());
        }

        FundingCommands::Show { id } => {
            let funding = service.find(&id)?;
            print!("{}", format_funding_details(&funding, settings));
        }

        FundingCommands::Edit {
            id,
            funder,
            amount,
            date,
            repayable,
            repayment,
            description,
        } => {
            let funding = service.find(&id)?;

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

            let new_repayment = match repayment {
                Some(value) if value.is_empty() || value.to_lowercase() == "none" => Some(None),
                Some(value) => Some(Some(
                    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
                        OutlayError::Validation(format!(
                            "Invalid repayment date format: '{}'. Use YYYY-MM-DD",
                            value
                        ))
                    })?,
                )),
                None => None,
            };

            let new_description = match description {
                Some(value) if value.is_empty() || value.to_lowercase() == "none" => Some(None),
                Some(value) => Some(Some(value)),
                None => None,
            };

            let updated = service.update(
                funding.id,
                new_date,
                funder,
                new_amount,
                repayable,
                new_repayment,
                new_description,
            )?;

            println!("Updated funding: {}", updated.id);
            println!("  Received: {}", updated.received_date.format("%Y-%m-%d"));
            println!("  Funder:   {}", updated.funder_name);
            println!(
                "  Amount:   {}",
                updated.amount.format_with_symbol(&settings.currency_symbol)
            );
        }

        FundingCommands::Delete { id, force } => {
            let funding = service.find(&id)?;

            if !force {
                println!("About to delete funding record:");
                println!("  Received: {}", funding.received_date.format("%Y-%m-%d"));
                println!("  Funder:   {}", funding.funder_name);
                println!(
                    "  Amount:   {}",
                    funding.amount.format_with_symbol(&settings.currency_symbol)
                );
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(funding.id)?;
            println!(
                "Deleted funding: {} ({} {})",
                deleted.id,
                deleted.received_date.format("%Y-%m-%d"),
                deleted.funder_name
            );
        }

        FundingCommands::MarkRepaid { id } => {
            let funding = service.find(&id)?;
            let repaid = service.mark_repaid(funding.id)?;
            println!(
                "Marked funding as repaid: {} ({})",
                repaid.id, repaid.funder_name
            );
        }

        FundingCommands::Attach { id, file } => {
            let funding = service.find(&id)?;
            let updated = service.attach(funding.id, &file)?;

            if let Some(attachment) = updated.attachments.last() {
                println!(
                    "Attached to funding {}: {} ({})",
                    updated.id,
                    attachment.name,
                    attachment.formatted_size()
                );
            }
        }

        FundingCommands::Detach { id, attachment } => {
            let funding = service.find(&id)?;
            let updated = service.detach(funding.id, &attachment)?;
            println!(
                "Removed attachment '{}' from funding {}",
                attachment, updated.id
            );
        }
    }

    Ok(())
}
