//! File Operations for Sejour
//!
//! Native file dialogs through the `rfd` crate: picking listing images and
//! saving what the API hands back (booking receipts, verification QR codes).

use std::path::{Path, PathBuf};

use rfd::AsyncFileDialog;
use sejour_client::UploadFile;
use thiserror::Error;

// ============================================================================
// File Filter Constants
// ============================================================================

/// Image extensions accepted by the picker
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Extension of booking receipts
pub const RECEIPT_EXTENSION: &str = "pdf";

/// Extension of exported QR codes
pub const QR_EXTENSION: &str = "svg";

// ============================================================================
// Errors
// ============================================================================

/// Errors of file operations
#[derive(Debug, Error)]
pub enum FileError {
    /// The user closed the dialog
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// File Dialog Functions
// ============================================================================

/// Let the user pick listing images
///
/// Files are read at upload time, so only their paths are kept here.
/// Returns an empty list when the dialog was cancelled.
pub async fn pick_images() -> Vec<UploadFile> {
    let files = AsyncFileDialog::new()
        .set_title("Select images")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_files()
        .await
        .unwrap_or_default();

    files
        .iter()
        .map(|f| UploadFile::from_path(f.path()))
        .collect()
}

/// Ask where to save a file with the given suggested name
pub async fn show_save_dialog(title: &str, default_name: &str, extension: &str) -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title(title)
        .add_filter(extension.to_uppercase(), &[extension])
        .set_file_name(default_name)
        .save_file()
        .await?;

    Some(ensure_extension(file.path().to_path_buf(), extension))
}

/// Save a booking receipt, asking for the destination
pub async fn save_receipt(reference: &str, pdf: &[u8]) -> Result<PathBuf, FileError> {
    let name = receipt_file_name(reference);
    let path = show_save_dialog("Save receipt", &name, RECEIPT_EXTENSION)
        .await
        .ok_or(FileError::Cancelled)?;
    write_file(&path, pdf)?;
    Ok(path)
}

/// Save a verification QR code, asking for the destination
pub async fn save_qr(owner: &str, svg: &str) -> Result<PathBuf, FileError> {
    let name = format!("verification-{}.{}", slug(owner), QR_EXTENSION);
    let path = show_save_dialog("Save QR code", &name, QR_EXTENSION)
        .await
        .ok_or(FileError::Cancelled)?;
    write_file(&path, svg.as_bytes())?;
    Ok(path)
}

/// Write bytes to a path
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    std::fs::write(path, bytes).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "File saved");
    Ok(())
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Ensure a path has the given extension
pub fn ensure_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == extension) {
        path
    } else {
        let mut new_path = path.clone();
        let new_name = format!(
            "{}.{}",
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("download"),
            extension
        );
        new_path.set_file_name(new_name);
        new_path
    }
}

/// Suggested file name of a receipt
pub fn receipt_file_name(reference: &str) -> String {
    format!("receipt-{}.{}", slug(reference), RECEIPT_EXTENSION)
}

fn slug(text: &str) -> String {
    let slug: String = text
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() { "file".to_string() } else { slug }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_extension() {
        let result = ensure_extension(PathBuf::from("receipt"), "pdf");
        assert_eq!(result.to_str().unwrap(), "receipt.pdf");

        let with_ext = PathBuf::from("receipt.pdf");
        assert_eq!(ensure_extension(with_ext.clone(), "pdf"), with_ext);
    }

    #[test]
    fn test_receipt_file_name() {
        assert_eq!(receipt_file_name("BK-0012"), "receipt-bk-0012.pdf");
        assert_eq!(receipt_file_name("  "), "receipt-file.pdf");
    }

    #[test]
    fn test_write_file_reports_path() {
        let err = write_file(Path::new("/nonexistent-dir/receipt.pdf"), b"%PDF").unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/receipt.pdf"));
    }
}
