//! Document reader: turns a file on disk into `(text, display_name)`.
//!
//! The format is chosen by file-name suffix. Plain-text formats are decoded
//! as UTF-8 with invalid sequences replaced; binary office formats are
//! rejected with [`MemoryError::UnsupportedFormat`].

use ressa_core::error::MemoryError;
use std::path::Path;
use tracing::debug;

/// Suffixes that need a dedicated extractor this crate does not ship.
const BINARY_SUFFIXES: &[&str] = &["pdf", "docx"];

/// Read a document and return its text along with a display name.
pub async fn read_document(path: &Path) -> Result<(String, String), MemoryError> {
    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let suffix = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if BINARY_SUFFIXES.contains(&suffix.as_str()) {
        return Err(MemoryError::UnsupportedFormat {
            path: path.display().to_string(),
            suffix: format!(".{suffix}"),
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| MemoryError::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let text = String::from_utf8_lossy(&bytes).into_owned();
    debug!(file = %display_name, chars = text.chars().count(), "Read document");
    Ok((text, display_name))
}
