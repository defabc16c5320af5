use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::extractor;
use crate::file_utils::FileManager;
use crate::reinjector::{ReinjectReport, Reinjector};
use crate::workflow::{Effect, Workflow, WorkflowEvent, WorkflowState};

// @module: Application controller binding the core operations to files

// @const: Extension of the per-document text files written in folder mode
const FOLDER_TEXT_EXTENSION: &str = "txt";

/// Result of extracting every document in a folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    /// Documents whose text file was written
    pub extracted: usize,
    /// Documents skipped because the text file already existed
    pub skipped: usize,
    /// Documents that could not be extracted
    pub failed: usize,
}

/// Files written by a full workflow session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub extracted_path: Option<PathBuf>,
    pub updated_path: Option<PathBuf>,
    pub report: Option<ReinjectReport>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Files folder mode never treats as documents
    excluded_files: Vec<PathBuf>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config, excluded_files: Vec::new() })
    }

    /// Leave `path` out of folder extraction, typically the active config file
    pub fn excluding<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.excluded_files.push(normalize_path(path.as_ref()));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn is_excluded(&self, file: &Path) -> bool {
        let file = normalize_path(file);
        if self.excluded_files.contains(&file) {
            debug!("Skipping excluded file: {:?}", file);
            return true;
        }
        false
    }

    fn reinjector(&self) -> Reinjector {
        Reinjector::new(self.config.reinject).with_pretty_output(self.config.output.pretty_json)
    }

    /// Extract the texts of one document.
    ///
    /// The text file goes to `output`, or next to the input under the
    /// configured name. Returns `None` when an existing file was kept.
    pub fn extract_file(&self, input_file: &Path, output: Option<PathBuf>, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let output_path = output.unwrap_or_else(|| {
            parent_dir(input_file).join(&self.config.output.extract_file_name)
        });

        let json = FileManager::read_to_string(input_file)?;
        let content = extractor::extract_str(&json)
            .with_context(|| format!("Failed to extract texts from {:?}", input_file))?;

        if self.persist(&output_path, &content, force_overwrite)? {
            Ok(Some(output_path))
        } else {
            Ok(None)
        }
    }

    /// Extract every `*.json` document under `input_dir` to `<stem>.txt` beside it
    pub fn extract_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        info!("Extracting label texts for directory: {:?}", input_dir);

        let files: Vec<PathBuf> = FileManager::find_files(input_dir, "json")?
            .into_iter()
            .filter(|file| !self.is_excluded(file))
            .collect();
        let mut summary = FolderSummary::default();

        let progress_bar = ProgressBar::new(files.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for file in &files {
            progress_bar.set_message(file_label(file));
            let output_path = FileManager::generate_output_path(file, parent_dir(file), FOLDER_TEXT_EXTENSION);

            match self.extract_file(file, Some(output_path), force_overwrite) {
                Ok(Some(_)) => summary.extracted += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    progress_bar.suspend(|| error!("Error processing file {:?}: {:#}", file, e));
                    summary.failed += 1;
                }
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        info!(
            "Finished processing {} files: {} extracted, {} skipped, {} failed",
            files.len(),
            summary.extracted,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    /// Write the translated lines into a document.
    ///
    /// The updated document goes to `output`, or next to the input under the
    /// configured name. Returns `None` when an existing file was kept.
    pub fn reinject_file(
        &self,
        json_file: &Path,
        translation_file: &Path,
        output: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<Option<(PathBuf, ReinjectReport)>> {
        let output_path = output.unwrap_or_else(|| {
            parent_dir(json_file).join(&self.config.output.reinject_file_name)
        });

        let lines = FileManager::read_lines(translation_file)?;
        let json = FileManager::read_to_string(json_file)?;

        let (updated, report) = self
            .reinjector()
            .reinject_str(&json, &lines)
            .with_context(|| format!("Failed to reinject translations into {:?}", json_file))?;

        if self.persist(&output_path, &updated, force_overwrite)? {
            Ok(Some((output_path, report)))
        } else {
            Ok(None)
        }
    }

    /// Drive a whole session: extract, load the translations, reinject.
    ///
    /// Both artifacts are saved in `output_dir` under their configured names.
    pub fn run_session(
        &self,
        json_file: &Path,
        translation_file: &Path,
        output_dir: &Path,
        force_overwrite: bool,
    ) -> Result<SessionOutcome> {
        FileManager::ensure_dir(output_dir)?;

        let mut workflow = Workflow::new(&self.config);
        let mut outcome = SessionOutcome {
            extracted_path: None,
            updated_path: None,
            report: None,
        };

        let source = FileManager::read_to_string(json_file)?;
        let effect = workflow.handle(WorkflowEvent::SourceSelected(source))?;
        outcome.extracted_path = self.apply_effect(effect, output_dir, force_overwrite)?;

        let translations = FileManager::read_to_string(translation_file)?;
        workflow.handle(WorkflowEvent::TranslationSelected(translations))?;

        let effect = workflow.handle(WorkflowEvent::Execute)?;
        outcome.updated_path = self.apply_effect(effect, output_dir, force_overwrite)?;

        // The report describes the written document, so a kept file has none
        if outcome.updated_path.is_some() {
            if let WorkflowState::Done { report, .. } = workflow.state() {
                outcome.report = Some(*report);
            }
        }

        Ok(outcome)
    }

    fn apply_effect(&self, effect: Option<Effect>, output_dir: &Path, force_overwrite: bool) -> Result<Option<PathBuf>> {
        match effect {
            Some(Effect::Persist { file_name, content }) => {
                let path = output_dir.join(file_name);
                Ok(self.persist(&path, &content, force_overwrite)?.then_some(path))
            }
            None => Ok(None),
        }
    }

    // @returns: false when an existing file was left in place
    fn persist(&self, path: &Path, content: &str, force_overwrite: bool) -> Result<bool> {
        if path.exists() && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", path);
            return Ok(false);
        }

        FileManager::write_to_file(path, content)?;
        debug!("Wrote {} bytes", content.len());
        info!("Success: {:?}", path);

        Ok(true)
    }
}

// Canonical form when the file exists, the path as given otherwise
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new("."))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
