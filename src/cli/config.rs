//! CLI commands for configuration
//!
//! Shows and updates the user settings stored in config.json.

use clap::Subcommand;

use crate::config::{OutlayPaths, ReportPeriodType, Settings};
use crate::error::{OutlayError, OutlayResult};

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,
    /// Set a configuration value
    Set {
        /// Setting key (default_period, currency_symbol, date_format)
        key: String,
        /// New value
        value: String,
    },
}

/// Handle config commands
pub fn handle_config_command(
    paths: &OutlayPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> OutlayResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("OutlayCLI Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  default_period:  {}", settings.default_period.as_str());
            println!("  currency_symbol: {}", settings.currency_symbol);
            println!("  date_format:     {}", settings.date_format);
        }
        ConfigCommands::Set { key, value } => {
            let stored = match key.as_str() {
                "default_period" => {
                    let period = ReportPeriodType::parse(&value).ok_or_else(|| {
                        OutlayError::Validation(format!(
                            "Invalid period '{}'. Use monthly, weekly, or yearly",
                            value
                        ))
                    })?;
                    settings.default_period = period;
                    period.as_str().to_string()
                }
                "currency_symbol" => {
                    let symbol = value.trim();
                    if symbol.is_empty() {
                        return Err(OutlayError::Validation(
                            "Currency symbol cannot be empty".to_string(),
                        ));
                    }
                    settings.currency_symbol = symbol.to_string();
                    settings.currency_symbol.clone()
                }
                "date_format" => {
                    validate_date_format(&value)?;
                    settings.date_format = value.clone();
                    value.clone()
                }
                _ => {
                    return Err(OutlayError::Validation(format!(
                        "Unknown setting '{}'. Valid keys: default_period, currency_symbol, date_format",
                        key
                    )));
                }
            };

            settings.save(paths)?;
            println!("Set {} = {}", key, stored);
        }
    }

    Ok(())
}

/// Reject format strings chrono cannot render
fn validate_date_format(format: &str) -> OutlayResult<()> {
    use std::fmt::Write as _;

    let sample = chrono::Local::now().date_naive();
    let mut rendered = String::new();
    if write!(rendered, "{}", sample.format(format)).is_err() {
        return Err(OutlayError::Validation(format!(
            "Invalid date format string: '{}'",
            format
        )));
    }

    Ok(())
}
