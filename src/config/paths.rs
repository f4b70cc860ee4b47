//! Filesystem layout for OutlayCLI
//!
//! Everything lives under one base directory:
//!
//! ```text
//! ~/.config/outlay-cli/
//! ├── config.json        user settings
//! └── data/
//!     ├── expenses.json
//!     └── funding.json
//! ```
//!
//! The base resolves from `OUTLAY_CLI_DATA_DIR` when set, otherwise from the
//! platform convention (XDG on Unix, `%APPDATA%` on Windows).

use std::path::PathBuf;

use crate::error::OutlayError;

/// Resolved locations of the settings file and record stores
#[derive(Debug, Clone)]
pub struct OutlayPaths {
    base_dir: PathBuf,
}

impl OutlayPaths {
    /// Resolve the base directory for this process
    ///
    /// # Errors
    ///
    /// Fails when neither the override variable nor a home directory is
    /// available.
    pub fn new() -> Result<Self, OutlayError> {
        let base_dir = match std::env::var("OUTLAY_CLI_DATA_DIR") {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory, bypassing resolution (tests)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn funding_file(&self) -> PathBuf {
        self.data_dir().join("funding.json")
    }

    /// Create the base and data directories if they are missing
    pub fn ensure_directories(&self) -> Result<(), OutlayError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| OutlayError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| OutlayError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, OutlayError> {
    // XDG_CONFIG_HOME wins; fall back to ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                OutlayError::Config("Could not determine home directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("outlay-cli"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, OutlayError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| OutlayError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("outlay-cli"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_base_dir() {
        let dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), dir.path());
        assert_eq!(paths.data_dir(), dir.path().join("data"));
    }

    #[test]
    fn test_env_var_override() {
        let dir = TempDir::new().unwrap();
        env::set_var("OUTLAY_CLI_DATA_DIR", dir.path());

        let paths = OutlayPaths::new().unwrap();
        assert_eq!(paths.base_dir(), dir.path());

        env::remove_var("OUTLAY_CLI_DATA_DIR");
    }

    #[test]
    fn test_ensure_directories_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(dir.path().to_path_buf());

        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_store_files_live_under_data() {
        let dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), dir.path().join("config.json"));
        assert_eq!(
            paths.expenses_file(),
            dir.path().join("data").join("expenses.json")
        );
        assert_eq!(
            paths.funding_file(),
            dir.path().join("data").join("funding.json")
        );
    }
}
