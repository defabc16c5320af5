use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::labels::MissingTranslation;
use crate::reinjector::Alignment;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Reinjection behaviour
    #[serde(default)]
    pub reinject: ReinjectConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output file settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    // @field: Suggested name of the extracted text file
    #[serde(default = "default_extract_file_name")]
    pub extract_file_name: String,

    // @field: Suggested name of the updated document
    #[serde(default = "default_reinject_file_name")]
    pub reinject_file_name: String,

    // @field: Pretty print the updated document
    #[serde(default)]
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extract_file_name: default_extract_file_name(),
            reinject_file_name: default_reinject_file_name(),
            pretty_json: false,
        }
    }
}

/// Reinjection settings
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReinjectConfig {
    /// Whether label and line counts must match
    #[serde(default)]
    pub alignment: Alignment,

    /// Whether a missing `Translation` field is created or rejected
    #[serde(default)]
    pub missing_translation: MissingTranslation,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_extract_file_name() -> String {
    "extracted_texts.txt".to_string()
}

fn default_reinject_file_name() -> String {
    "updated_translation.json".to_string()
}

impl Config {
    /// Load the configuration at `path`, writing a default one when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;

            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        validate_file_name("extract_file_name", &self.output.extract_file_name)?;
        validate_file_name("reinject_file_name", &self.output.reinject_file_name)?;

        if self.output.extract_file_name == self.output.reinject_file_name {
            return Err(anyhow!(
                "extract_file_name and reinject_file_name must differ, both are '{}'",
                self.output.extract_file_name
            ));
        }

        Ok(())
    }
}

// Output names are joined onto a directory, so they must be bare file names
fn validate_file_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("{} must not be empty", field));
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(anyhow!("{} must be a plain file name, got '{}'", field, name));
    }

    Ok(())
}
