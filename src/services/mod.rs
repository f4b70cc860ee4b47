//! Service layer for Outlay
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, partial updates, and attachment handling.

use std::fs;
use std::path::Path;

use crate::error::{OutlayError, OutlayResult};
use crate::models::attachment::mime_type_for_path;
use crate::models::{AttachmentId, FileAttachment};

pub mod expense;
pub mod funding;

pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService};
pub use funding::{CreateFundingInput, FundingFilter, FundingService};

/// Build attachment metadata from a file on disk
///
/// The file itself is not copied; its name, size, and MIME type are recorded
/// along with the original path.
pub fn attachment_from_path(path: &Path) -> OutlayResult<FileAttachment> {
    let metadata = fs::metadata(path)
        .map_err(|e| OutlayError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;

    if !metadata.is_file() {
        return Err(OutlayError::Validation(format!(
            "'{}' is not a file",
            path.display()
        )));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(FileAttachment::new(
        name,
        metadata.len(),
        mime_type_for_path(path),
        path.display().to_string(),
    ))
}

/// Resolve an attachment identifier against a record's attachments
///
/// Accepts an exact file name, a full UUID (with or without the `att-`
/// prefix), or a unique prefix of one.
pub fn resolve_attachment(
    attachments: &[FileAttachment],
    identifier: &str,
) -> Option<AttachmentId> {
    if let Some(found) = attachments.iter().find(|a| a.name == identifier) {
        return Some(found.id);
    }

    let needle = identifier
        .strip_prefix("att-")
        .unwrap_or(identifier)
        .to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let mut matches = attachments
        .iter()
        .filter(|a| a.id.as_uuid().to_string().starts_with(&needle));

    match (matches.next(), matches.next()) {
        (Some(found), None) => Some(found.id),
        _ => None,
    }
}
