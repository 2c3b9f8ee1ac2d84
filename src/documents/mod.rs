//! Document Text Extraction
//!
//! Turns an uploaded file into plain text for prompting. The parser is picked
//! from the file extension:
//!
//! - `.pdf`  - page text via `lopdf`, one line break per page, trimmed
//! - `.docx` - body paragraphs via `docx-rust`, newline-joined, trimmed
//! - `.txt`  - UTF-8 contents, returned verbatim

pub mod docx;
pub mod pdf;

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::types::{AppError, AppResult};

/// File formats the extractor (and the upload endpoint) accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] = [DocumentFormat::Pdf, DocumentFormat::Docx, DocumentFormat::Txt];

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }

    /// Case-insensitive lookup of a bare extension (no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL.into_iter().find(|format| format.extension() == ext)
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::from_extension(&ext).ok_or_else(|| {
            if ext.is_empty() {
                AppError::UnsupportedFormat("(no extension)".to_string())
            } else {
                AppError::UnsupportedFormat(format!(".{}", ext.to_ascii_lowercase()))
            }
        })
    }

    /// Comma-separated list used in client-facing error messages.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|format| format.extension())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Extract plain text from the file at `path`.
///
/// Never returns partial text: any parser or I/O failure is an
/// [`AppError::Extraction`] carrying the underlying message.
pub fn extract_text(path: &Path) -> AppResult<String> {
    let format = DocumentFormat::from_path(path)?;
    debug!(path = %path.display(), %format, "Extracting document text");

    match format {
        DocumentFormat::Pdf => pdf::extract(path),
        DocumentFormat::Docx => docx::extract(path),
        DocumentFormat::Txt => read_txt(path),
    }
}

fn read_txt(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| AppError::Extraction(format!("Error reading text file: {}", e)))
}
