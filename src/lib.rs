/*!
 * # jsonextractor - Label text extraction and reinjection
 *
 * A Rust library for moving the texts of a JSON translation document out to
 * a plain text file and bringing the translated lines back in.
 *
 * ## Features
 *
 * - Extract the `Text` of every label in `TranslationLabels`, one per line
 * - Escape embedded line feeds so each label stays on a single line
 * - Reinject translated lines into the `Translation` fields by position
 * - Tolerate partial translation files, or reject them in strict mode
 * - Preserve every other field and the key order of the document
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `line_codec`: Escaping and line splitting for the side-car text file
 * - `labels`: Document parsing and access to the label array
 * - `extractor`: Document to text lines
 * - `reinjector`: Document and text lines to updated document
 * - `workflow`: State machine for a full extract and reinject session
 * - `app_config`: Configuration management
 * - `app_controller`: Binds the operations to files for the CLI
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod extractor;
pub mod file_utils;
pub mod labels;
pub mod line_codec;
pub mod reinjector;
pub mod workflow;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, SchemaError, WorkflowError};
pub use extractor::{extract, extract_str};
pub use labels::{Label, MissingTranslation, TranslationDocument};
pub use line_codec::escape;
pub use reinjector::{reinject, Alignment, ReinjectReport, Reinjector};
pub use workflow::{Effect, Workflow, WorkflowEvent, WorkflowState};
