//! OutlayCLI - Terminal-based expense and funding tracker for small businesses
//!
//! This library provides the core functionality for the OutlayCLI expense
//! tracker. It records day-to-day business expenses with their GST amounts,
//! tracks incoming funding such as grants and loans with repayment dates, and
//! produces summary reports, reminders, and XLSX exports from the command
//! line.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, funding, categories, etc.)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Summary, dashboard, trend, and reminder reports
//! - `export`: XLSX report export
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use outlay::config::{paths::OutlayPaths, settings::Settings};
//!
//! let paths = OutlayPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{OutlayError, OutlayResult};
