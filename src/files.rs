//! File attachments, encoded into a transferable data-URI representation.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;

/// A file staged for the next chat turn, ready for the wire.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// File name shown in the message text.
    pub name: String,
    /// Media type inferred from the file extension.
    pub media_type: String,
    /// `data:<media type>;base64,<payload>` URI.
    pub data: String,
}

impl Attachment {
    /// Read a file from disk and encode it as a data URI.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = media_type_for(path).to_string();
        let data = format!("data:{};base64,{}", media_type, STANDARD.encode(&bytes));

        Ok(Self {
            name,
            media_type,
            data,
        })
    }
}

fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}
