use log::debug;

use crate::errors::{AppError, SchemaError};
use crate::labels::TranslationDocument;
use crate::line_codec;

// @module: Label text extraction to the side-car text file

/// Escaped source texts, one entry per label, in label order
pub fn extract_lines(doc: &TranslationDocument) -> Result<Vec<String>, SchemaError> {
    let lines: Vec<String> = doc
        .labels()?
        .iter()
        .map(|label| line_codec::escape(label.text()))
        .collect();

    debug!("Extracted {} label texts", lines.len());
    Ok(lines)
}

/// Full content of the side-car text file for `doc`.
///
/// Each label contributes one line terminated by a line feed, so a document
/// with labels always produces content ending in `\n` and an empty label
/// array produces an empty string.
pub fn extract(doc: &TranslationDocument) -> Result<String, SchemaError> {
    Ok(line_codec::join_lines(extract_lines(doc)?))
}

/// Parse `json` and extract it
pub fn extract_str(json: &str) -> Result<String, AppError> {
    let doc = TranslationDocument::parse(json)?;
    Ok(extract(&doc)?)
}
