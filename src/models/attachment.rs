//! File attachment metadata
//!
//! Records carry attachment metadata only (name, size, MIME type, reference
//! path); the file bytes themselves stay wherever the user keeps them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::ids::AttachmentId;

/// Metadata for a file attached to an expense or funding record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Unique identifier
    pub id: AttachmentId,

    /// Original file name
    pub name: String,

    /// File size in bytes
    pub size: u64,

    /// MIME type guessed from the file extension
    pub mime_type: String,

    /// Where the file lives (path or URL)
    pub reference: String,

    /// When the attachment was recorded
    pub uploaded_at: DateTime<Utc>,
}

impl FileAttachment {
    /// Create attachment metadata
    pub fn new(
        name: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            id: AttachmentId::new(),
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            reference: reference.into(),
            uploaded_at: Utc::now(),
        }
    }

    /// Human-readable size, e.g. "1.5 KB"
    pub fn formatted_size(&self) -> String {
        format_file_size(self.size)
    }

    /// Validate the attachment metadata
    pub fn validate(&self) -> Result<(), AttachmentValidationError> {
        if self.name.trim().is_empty() {
            return Err(AttachmentValidationError::EmptyName);
        }

        if self.reference.trim().is_empty() {
            return Err(AttachmentValidationError::EmptyReference);
        }

        Ok(())
    }
}

impl fmt::Display for FileAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.formatted_size())
    }
}

/// Format a byte count for display (1024 base, trailing zeros trimmed)
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).log(1024.0).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}

/// Guess a MIME type from a file extension
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("csv") => "text/csv",
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// Validation errors for attachments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentValidationError {
    EmptyName,
    EmptyReference,
}

impl fmt::Display for AttachmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Attachment name cannot be empty"),
            Self::EmptyReference => write!(f, "Attachment reference cannot be empty"),
        }
    }
}

impl std::error::Error for AttachmentValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attachment() {
        let attachment =
            FileAttachment::new("invoice.pdf", 2048, "application/pdf", "/tmp/invoice.pdf");
        assert_eq!(attachment.name, "invoice.pdf");
        assert_eq!(attachment.size, 2048);
        assert!(attachment.validate().is_ok());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn test_mime_type_lookup() {
        assert_eq!(mime_type_for_path(Path::new("a/b/receipt.PDF")), "application/pdf");
        assert_eq!(mime_type_for_path(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(
            mime_type_for_path(Path::new("unknown.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            mime_type_for_path(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_validation() {
        let mut attachment = FileAttachment::new("a.txt", 10, "text/plain", "/tmp/a.txt");
        attachment.name = String::new();
        assert_eq!(
            attachment.validate(),
            Err(AttachmentValidationError::EmptyName)
        );

        attachment.name = "a.txt".to_string();
        attachment.reference = "  ".to_string();
        assert_eq!(
            attachment.validate(),
            Err(AttachmentValidationError::EmptyReference)
        );
    }

    #[test]
    fn test_display() {
        let attachment = FileAttachment::new("invoice.pdf", 1536, "application/pdf", "/x");
        assert_eq!(format!("{}", attachment), "invoice.pdf (1.5 KB)");
    }

    #[test]
    fn test_serialization() {
        let attachment = FileAttachment::new("a.png", 99, "image/png", "/tmp/a.png");
        let json = serde_json::to_string(&attachment).unwrap();
        let deserialized: FileAttachment = serde_json::from_str(&json).unwrap();
        assert_eq!(attachment.id, deserialized.id);
        assert_eq!(attachment.size, deserialized.size);
    }
}
