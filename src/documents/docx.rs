// DOCX text extraction backed by docx-rust

use std::path::Path;

use docx_rust::document::BodyContent;
use docx_rust::DocxFile;

use crate::types::{AppError, AppResult};

/// Join the text of every top-level body paragraph with newlines.
///
/// Tables and other block content are skipped.
pub fn extract(path: &Path) -> AppResult<String> {
    let file = DocxFile::from_file(path).map_err(parse_error)?;
    let docx = file.parse().map_err(parse_error)?;

    let paragraphs: Vec<String> = docx
        .document
        .body
        .content
        .iter()
        .filter_map(|content| match content {
            BodyContent::Paragraph(paragraph) => Some(
                paragraph
                    .iter_text()
                    .map(|text| text.to_string())
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n").trim().to_string())
}

fn parse_error(e: impl std::fmt::Display) -> AppError {
    AppError::Extraction(format!("Error parsing DOCX: {}", e))
}
