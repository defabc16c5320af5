/*!
 * Reinjection of translated lines into a translation document.
 *
 * Lines are matched to labels by position: line N becomes the translation of
 * label N. With the default lenient alignment a length mismatch is not an
 * error; the extra entries on the longer side are left alone. Lines are
 * written verbatim, so an escaped `\n` from extraction stays escaped.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::app_config::ReinjectConfig;
use crate::errors::AppError;
use crate::labels::TranslationDocument;

/// How label and line counts must relate
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Apply the first `min(labels, lines)` entries and ignore the rest
    #[default]
    Lenient,
    /// Reject the document when the counts differ
    Strict,
}

/// Outcome of one reinjection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReinjectReport {
    /// Number of labels in the document
    pub label_count: usize,
    /// Number of lines supplied
    pub line_count: usize,
    /// Number of translations written
    pub applied: usize,
}

impl ReinjectReport {
    /// Lines that had no label to go to
    pub fn unused_lines(&self) -> usize {
        self.line_count - self.applied
    }

    /// Labels that kept their previous translation
    pub fn untouched_labels(&self) -> usize {
        self.label_count - self.applied
    }

    pub fn is_aligned(&self) -> bool {
        self.label_count == self.line_count
    }
}

/// Writes translated lines into documents according to a [`ReinjectConfig`]
#[derive(Debug, Clone, Default)]
pub struct Reinjector {
    config: ReinjectConfig,
    pretty: bool,
}

impl Reinjector {
    pub fn new(config: ReinjectConfig) -> Self {
        Self {
            config,
            pretty: false,
        }
    }

    /// Pretty print documents returned by [`reinject_str`](Self::reinject_str)
    pub fn with_pretty_output(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Write `lines` into the translations of `doc`.
    ///
    /// Every label that will be written is checked before the first write,
    /// so on error `doc` is left exactly as it was.
    pub fn reinject<S: AsRef<str>>(
        &self,
        doc: &mut TranslationDocument,
        lines: &[S],
    ) -> Result<ReinjectReport, AppError> {
        let policy = self.config.missing_translation;
        let mut labels = doc.labels_mut()?;

        let report = ReinjectReport {
            label_count: labels.len(),
            line_count: lines.len(),
            applied: labels.len().min(lines.len()),
        };

        if self.config.alignment == Alignment::Strict && !report.is_aligned() {
            return Err(AppError::LengthMismatch {
                labels: report.label_count,
                lines: report.line_count,
            });
        }

        for label in &labels[..report.applied] {
            label.check_writable(policy)?;
        }

        for (label, line) in labels.iter_mut().zip(lines) {
            let line: &str = line.as_ref();
            label.set_translation(line, policy)?;
        }

        if !report.is_aligned() {
            warn!(
                "Label count {} differs from line count {}: {} label(s) left unchanged, {} line(s) ignored",
                report.label_count,
                report.line_count,
                report.untouched_labels(),
                report.unused_lines()
            );
        }
        debug!("Reinjected {} translations", report.applied);

        Ok(report)
    }

    /// Parse `json`, reinject `lines` and serialize the result
    pub fn reinject_str<S: AsRef<str>>(
        &self,
        json: &str,
        lines: &[S],
    ) -> Result<(String, ReinjectReport), AppError> {
        let mut doc = TranslationDocument::parse(json)?;
        let report = self.reinject(&mut doc, lines)?;
        Ok((doc.to_json(self.pretty)?, report))
    }
}

/// Reinject with the default lenient settings, returning the updated document
pub fn reinject<S: AsRef<str>>(
    mut doc: TranslationDocument,
    lines: &[S],
) -> Result<TranslationDocument, AppError> {
    Reinjector::default().reinject(&mut doc, lines)?;
    Ok(doc)
}
