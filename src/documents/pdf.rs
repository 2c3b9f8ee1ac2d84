// PDF text extraction backed by lopdf

use std::path::Path;

use lopdf::Document;

use crate::types::{AppError, AppResult};

/// Extract the text of every page in page order, one trailing newline per
/// page, trimmed as a whole.
pub fn extract(path: &Path) -> AppResult<String> {
    let doc = Document::load(path).map_err(parse_error)?;

    let mut text = String::new();
    // get_pages is a BTreeMap keyed by page number, so iteration is in document order
    for page_num in doc.get_pages().keys() {
        let content = doc.extract_text(&[*page_num]).map_err(parse_error)?;
        text.push_str(&content);
        text.push('\n');
    }

    Ok(text.trim().to_string())
}

fn parse_error(e: lopdf::Error) -> AppError {
    AppError::Extraction(format!("Error parsing PDF: {}", e))
}
