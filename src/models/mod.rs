//! Core data models for OutlayCLI
//!
//! This module contains all the data structures that represent the tracking
//! domain: expenses, funding records, categories, attachments, and report
//! periods.

pub mod attachment;
pub mod category;
pub mod expense;
pub mod funding;
pub mod ids;
pub mod money;
pub mod period;

pub use attachment::FileAttachment;
pub use category::{Category, STARTER_CATEGORIES};
pub use expense::Expense;
pub use funding::Funding;
pub use ids::{AttachmentId, ExpenseId, FundingId};
pub use money::Money;
pub use period::{PeriodKind, ReportWindow};
