/*!
 * Tests for label text extraction
 */

use jsonextractor::errors::{AppError, SchemaError};
use jsonextractor::extractor::{extract, extract_lines, extract_str};
use jsonextractor::labels::TranslationDocument;
use crate::common;

#[test]
fn test_extract_withEmbeddedLineFeed_shouldEscapeAndTerminateEveryLine() {
    let json = common::document_with_texts(&["hello", "line1\nline2"]);
    assert_eq!(extract_str(&json).unwrap(), "hello\nline1\\nline2\n");
}

#[test]
fn test_extract_withSampleDocument_shouldIgnoreOtherFields() {
    let doc = TranslationDocument::parse(common::SAMPLE_DOCUMENT).unwrap();
    assert_eq!(extract(&doc).unwrap(), "hello\nline1\\nline2\n");
}

#[test]
fn test_extract_withoutTranslationFields_shouldSucceed() {
    let json = r#"{"TranslationLabels": [{"Text": "a"}, {"Text": "b"}]}"#;
    assert_eq!(extract_str(json).unwrap(), "a\nb\n");
}

#[test]
fn test_extract_withEmptyTexts_shouldKeepOneLinePerLabel() {
    let json = common::document_with_texts(&["", "x", ""]);
    assert_eq!(extract_str(&json).unwrap(), "\nx\n\n");
}

#[test]
fn test_extract_withNoLabels_shouldReturnEmptyString() {
    assert_eq!(extract_str(r#"{"TranslationLabels": []}"#).unwrap(), "");
}

#[test]
fn test_extractLines_shouldMatchLabelCount() {
    let json = common::document_with_texts(&["a\n\nb", "c"]);
    let doc = TranslationDocument::parse(&json).unwrap();
    assert_eq!(extract_lines(&doc).unwrap(), vec!["a\\n\\nb", "c"]);
}

#[test]
fn test_extract_withMissingLabels_shouldFailWithSchemaError() {
    let result = extract_str(r#"{"Version": 2}"#);
    assert!(matches!(result, Err(AppError::Schema(SchemaError::MissingLabels))));
}

#[test]
fn test_extract_withOneBadLabel_shouldProduceNoOutput() {
    let json = r#"{"TranslationLabels": [{"Text": "a"}, {"Text": "b"}, {"Other": "c"}]}"#;
    let err = extract_str(json).unwrap_err();
    assert!(matches!(
        err,
        AppError::Schema(SchemaError::MissingField { index: 2, field: "Text" })
    ));
}
