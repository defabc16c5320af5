/*!
 * Tests for translation reinjection
 */

use anyhow::Result;
use serde_json::Value;
use jsonextractor::app_config::ReinjectConfig;
use jsonextractor::errors::{AppError, SchemaError};
use jsonextractor::labels::{MissingTranslation, TranslationDocument};
use jsonextractor::reinjector::{reinject, Alignment, Reinjector};
use crate::common;

fn strict() -> Reinjector {
    Reinjector::new(ReinjectConfig {
        alignment: Alignment::Strict,
        ..ReinjectConfig::default()
    })
}

#[test]
fn test_reinject_withEqualLengths_shouldSetEveryTranslationInOrder() -> Result<()> {
    let json = common::document_with_texts(&["hello", "hi"]);
    let (updated, report) = Reinjector::default().reinject_str(&json, &["Bonjour", "Salut"])?;

    assert_eq!(common::translations(&updated)?, vec!["Bonjour", "Salut"]);
    assert_eq!(report.applied, 2);
    assert!(report.is_aligned());
    Ok(())
}

#[test]
fn test_reinject_withFewerLines_shouldLeaveRemainingLabelsUnchanged() -> Result<()> {
    let json = r#"{"TranslationLabels":[
        {"Text":"a","Translation":"old a"},
        {"Text":"b","Translation":"old b"},
        {"Text":"c","Translation":"old c"}]}"#;
    let (updated, report) = Reinjector::default().reinject_str(json, &["A", "B"])?;

    assert_eq!(common::translations(&updated)?, vec!["A", "B", "old c"]);
    assert_eq!(report.untouched_labels(), 1);
    assert_eq!(report.unused_lines(), 0);
    Ok(())
}

#[test]
fn test_reinject_withMoreLines_shouldIgnoreExtraLines() -> Result<()> {
    let json = common::document_with_texts(&["a", "b"]);
    let (updated, report) = Reinjector::default().reinject_str(&json, &["A", "B", "C"])?;

    assert_eq!(common::translations(&updated)?, vec!["A", "B"]);
    assert_eq!(report.applied, 2);
    assert_eq!(report.unused_lines(), 1);
    Ok(())
}

#[test]
fn test_reinject_withNoLines_shouldLeaveDocumentUnchanged() -> Result<()> {
    let doc = TranslationDocument::parse(common::SAMPLE_DOCUMENT)?;
    let updated = reinject(doc.clone(), &Vec::<String>::new())?;
    assert_eq!(updated, doc);
    Ok(())
}

#[test]
fn test_reinject_withExtraTopLevelField_shouldPreserveIt() -> Result<()> {
    let json = r#"{"TranslationLabels":[{"Text":"a","Translation":""}],"Version":2}"#;
    let (updated, _) = Reinjector::default().reinject_str(json, &["A"])?;

    assert_eq!(updated, r#"{"TranslationLabels":[{"Text":"a","Translation":"A"}],"Version":2}"#);
    Ok(())
}

#[test]
fn test_reinject_withSampleDocument_shouldOnlyChangeTranslations() -> Result<()> {
    let doc = TranslationDocument::parse(common::SAMPLE_DOCUMENT)?;
    let updated = reinject(doc.clone(), &["Bonjour", "ligne1\\nligne2"])?;

    let mut expected: Value = doc.into_value();
    expected["TranslationLabels"][0]["Translation"] = "Bonjour".into();
    expected["TranslationLabels"][1]["Translation"] = "ligne1\\nligne2".into();
    assert_eq!(updated.into_value(), expected);
    Ok(())
}

#[test]
fn test_reinject_withEscapedLineFeed_shouldNotUnescape() -> Result<()> {
    let json = common::document_with_texts(&["line1\nline2"]);
    let (updated, _) = Reinjector::default().reinject_str(&json, &["ligne1\\nligne2"])?;

    let translation = &common::translations(&updated)?[0];
    assert_eq!(translation, "ligne1\\nligne2");
    assert!(!translation.as_str().unwrap_or_default().contains('\n'));
    Ok(())
}

#[test]
fn test_reinject_withMissingLabels_shouldFailWithSchemaError() {
    let result = Reinjector::default().reinject_str(r#"{"Version":2}"#, &["A"]);
    assert!(matches!(result, Err(AppError::Schema(SchemaError::MissingLabels))));
}

#[test]
fn test_reinject_withMissingTranslationAndDefaultPolicy_shouldCreateField() -> Result<()> {
    let json = r#"{"TranslationLabels":[{"Text":"a"}]}"#;
    let (updated, _) = Reinjector::default().reinject_str(json, &["A"])?;
    assert_eq!(updated, r#"{"TranslationLabels":[{"Text":"a","Translation":"A"}]}"#);
    Ok(())
}

#[test]
fn test_reinject_withRequirePolicy_shouldNotMutateOnFailure() -> Result<()> {
    let reinjector = Reinjector::new(ReinjectConfig {
        missing_translation: MissingTranslation::Require,
        ..ReinjectConfig::default()
    });
    let mut doc = TranslationDocument::parse(r#"{"TranslationLabels":[{"Text":"a","Translation":""},{"Text":"b"}]}"#)?;
    let before = doc.clone();

    let err = reinjector.reinject(&mut doc, &["A", "B"]).unwrap_err();

    assert!(matches!(
        err,
        AppError::Schema(SchemaError::MissingField { index: 1, field: "Translation" })
    ));
    assert_eq!(doc, before);
    Ok(())
}

#[test]
fn test_reinject_withRequirePolicy_shouldIgnoreLabelsBeyondLines() -> Result<()> {
    let reinjector = Reinjector::new(ReinjectConfig {
        missing_translation: MissingTranslation::Require,
        ..ReinjectConfig::default()
    });
    let json = r#"{"TranslationLabels":[{"Text":"a","Translation":""},{"Text":"b"}]}"#;
    let (updated, report) = reinjector.reinject_str(json, &["A"])?;

    assert_eq!(report.applied, 1);
    assert_eq!(updated, r#"{"TranslationLabels":[{"Text":"a","Translation":"A"},{"Text":"b"}]}"#);
    Ok(())
}

#[test]
fn test_reinject_withNonStringTranslation_shouldNotMutateOnFailure() -> Result<()> {
    let mut doc = TranslationDocument::parse(r#"{"TranslationLabels":[{"Text":"a","Translation":""},{"Text":"b","Translation":[]}]}"#)?;
    let before = doc.clone();

    let err = Reinjector::default().reinject(&mut doc, &["A", "B"]).unwrap_err();

    assert!(matches!(
        err,
        AppError::Schema(SchemaError::FieldNotString { index: 1, field: "Translation" })
    ));
    assert_eq!(doc, before);
    Ok(())
}

#[test]
fn test_reinject_withStrictAlignmentAndMismatch_shouldReject() -> Result<()> {
    let mut doc = TranslationDocument::parse(&common::document_with_texts(&["a", "b"]))?;
    let before = doc.clone();

    let err = strict().reinject(&mut doc, &["A"]).unwrap_err();

    assert!(matches!(err, AppError::LengthMismatch { labels: 2, lines: 1 }));
    assert_eq!(doc, before);
    Ok(())
}

#[test]
fn test_reinject_withStrictAlignmentAndEqualLengths_shouldSucceed() -> Result<()> {
    let json = common::document_with_texts(&["a", "b"]);
    let (updated, _) = strict().reinject_str(&json, &["A", "B"])?;
    assert_eq!(common::translations(&updated)?, vec!["A", "B"]);
    Ok(())
}

#[test]
fn test_reinject_withPrettyOutput_shouldIndent() -> Result<()> {
    let json = common::document_with_texts(&["a"]);
    let (updated, _) = Reinjector::default()
        .with_pretty_output(true)
        .reinject_str(&json, &["A"])?;

    assert!(updated.contains("\n  \"TranslationLabels\": ["));
    assert_eq!(common::translations(&updated)?, vec!["A"]);
    Ok(())
}
