/*!
 * Error types for the jsonextractor application.
 *
 * This module contains custom error types for the label document, the
 * workflow and the application shell, using the thiserror crate for
 * ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised when a document does not have the expected label layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The document root is not a JSON object
    #[error("document root is not an object")]
    RootNotObject,

    /// The root object has no `TranslationLabels` field
    #[error("missing `TranslationLabels` field")]
    MissingLabels,

    /// `TranslationLabels` exists but is not an array
    #[error("`TranslationLabels` is not an array")]
    LabelsNotArray,

    /// An element of `TranslationLabels` is not an object
    #[error("label {index} is not an object")]
    LabelNotObject {
        /// Position of the label in the array
        index: usize,
    },

    /// A required field is absent from a label
    #[error("label {index} is missing the `{field}` field")]
    MissingField {
        /// Position of the label in the array
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },

    /// A field exists but does not hold a string
    #[error("label {index} field `{field}` is not a string")]
    FieldNotString {
        /// Position of the label in the array
        index: usize,
        /// Name of the offending field
        field: &'static str,
    },
}

/// Errors raised by the host workflow when an event arrives out of order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// The event is not accepted in the current state
    #[error("cannot handle {event} while {state}")]
    InvalidTransition {
        /// Name of the state the workflow was in
        state: &'static str,
        /// Name of the rejected event
        event: &'static str,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The document does not have the expected shape
    #[error("malformed input: {0}")]
    Schema(#[from] SchemaError),

    /// The document is not valid JSON, or could not be serialized
    #[error("JSON error: {0}")]
    Json(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Strict alignment was requested and the two sides differ in length
    #[error("label count {labels} does not match line count {lines}")]
    LengthMismatch {
        /// Number of labels in the document
        labels: usize,
        /// Number of translation lines supplied
        lines: usize,
    },

    /// An event was sent to the workflow in the wrong state
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
