/*!
 * Common test utilities for the jsonextractor test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use serde_json::Value;
use tempfile::TempDir;

/// A document with two labels, an embedded line feed and an extra top-level field
pub const SAMPLE_DOCUMENT: &str = r#"{
  "Version": 2,
  "TranslationLabels": [
    { "Id": 1, "Text": "hello", "Translation": "" },
    { "Id": 2, "Text": "line1\nline2", "Translation": "", "Context": "menu" }
  ],
  "Language": "fr"
}"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a document whose labels have the given texts and empty translations
pub fn document_with_texts(texts: &[&str]) -> String {
    let labels: Vec<Value> = texts
        .iter()
        .map(|text| serde_json::json!({ "Text": text, "Translation": "" }))
        .collect();
    serde_json::json!({ "TranslationLabels": labels }).to_string()
}

/// Reads the `Translation` of every label of a serialized document
pub fn translations(json: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(json)?;
    Ok(value["TranslationLabels"]
        .as_array()
        .map(|labels| labels.iter().map(|label| label["Translation"].clone()).collect())
        .unwrap_or_default())
}
