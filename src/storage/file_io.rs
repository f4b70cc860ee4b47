//! JSON file helpers shared by the expense and funding stores
//!
//! Writes go through a temp file and rename so a crash mid-write leaves the
//! previous ledger intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::OutlayError;

/// Load JSON from `path`, treating a missing file as an empty store
pub fn read_json<T, P>(path: P) -> Result<T, OutlayError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| OutlayError::Storage(format!("Cannot open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| OutlayError::Storage(format!("Cannot parse {}: {}", path.display(), e)))
}

/// Write `data` as pretty JSON, atomically
///
/// The payload lands in a sibling temp file first and is renamed over the
/// target only after a successful flush and fsync, so readers never observe
/// a half-written ledger.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), OutlayError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            OutlayError::Storage(format!("Cannot create {}: {}", parent.display(), e))
        })?;
    }

    // Temp file must live next to the target for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| {
        OutlayError::Storage(format!("Cannot create {}: {}", temp_path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| OutlayError::Storage(format!("Cannot serialize records: {}", e)))?;

    writer
        .flush()
        .map_err(|e| OutlayError::Storage(format!("Cannot flush records: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| OutlayError::Storage(format!("Cannot sync records: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        OutlayError::Storage(format!("Cannot replace {}: {}", path.display(), e))
    })?;

    Ok(())
}
