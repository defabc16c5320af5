/*!
 * Access to the label array of a translation document.
 *
 * A document is any JSON object with a `TranslationLabels` array. Each label
 * is an object holding a string `Text` and, usually, a string `Translation`.
 * Labels are identified only by their position in the array; every other
 * field of the document is carried through untouched.
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{AppError, SchemaError};

/// Name of the root field holding the label array
pub const LABELS_FIELD: &str = "TranslationLabels";

/// Name of the source text field of a label
pub const TEXT_FIELD: &str = "Text";

/// Name of the translated text field of a label
pub const TRANSLATION_FIELD: &str = "Translation";

/// What to do when a label being written has no `Translation` field
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingTranslation {
    /// Insert the field
    #[default]
    Create,
    /// Reject the document
    Require,
}

/// A parsed translation document
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationDocument {
    root: Value,
}

impl TranslationDocument {
    /// Parse a document from JSON text.
    ///
    /// Only the syntax is checked here; the label layout is checked when the
    /// labels are accessed.
    pub fn parse(json: &str) -> Result<Self, AppError> {
        let root: Value = serde_json::from_str(json)?;
        Ok(Self { root })
    }

    /// Wrap an already parsed JSON value
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Serialize the document, compact or pretty printed
    pub fn to_json(&self, pretty: bool) -> Result<String, AppError> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.root)?
        } else {
            serde_json::to_string(&self.root)?
        };
        Ok(json)
    }

    /// Get the ordered labels, checking every element of the array first.
    pub fn labels(&self) -> Result<Vec<Label<'_>>, SchemaError> {
        label_array(&self.root)?
            .iter()
            .enumerate()
            .map(|(index, value)| -> Result<_, SchemaError> {
                let fields = value
                    .as_object()
                    .ok_or(SchemaError::LabelNotObject { index })?;
                let text = read_text(fields, index)?;
                Ok(Label { index, fields, text })
            })
            .collect()
    }

    /// Get the ordered labels for writing, with the same checks as [`labels`](Self::labels).
    pub fn labels_mut(&mut self) -> Result<Vec<LabelMut<'_>>, SchemaError> {
        label_array_mut(&mut self.root)?
            .iter_mut()
            .enumerate()
            .map(|(index, value)| -> Result<_, SchemaError> {
                let fields = value
                    .as_object_mut()
                    .ok_or(SchemaError::LabelNotObject { index })?;
                read_text(fields, index)?;
                Ok(LabelMut { index, fields })
            })
            .collect()
    }
}

/// Read-only view of one label
#[derive(Debug, Clone, Copy)]
pub struct Label<'a> {
    index: usize,
    fields: &'a Map<String, Value>,
    text: &'a str,
}

impl<'a> Label<'a> {
    /// Position of the label in the array
    pub fn index(&self) -> usize {
        self.index
    }

    /// The source text
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The current translation, `None` when the field is absent
    pub fn translation(&self) -> Result<Option<&'a str>, SchemaError> {
        match self.fields.get(TRANSLATION_FIELD) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(SchemaError::FieldNotString {
                index: self.index,
                field: TRANSLATION_FIELD,
            }),
        }
    }
}

/// Writable view of one label
#[derive(Debug)]
pub struct LabelMut<'a> {
    index: usize,
    fields: &'a mut Map<String, Value>,
}

impl LabelMut<'_> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check that [`set_translation`](Self::set_translation) would succeed.
    pub fn check_writable(&self, policy: MissingTranslation) -> Result<(), SchemaError> {
        match (self.fields.get(TRANSLATION_FIELD), policy) {
            (Some(Value::String(_)), _) => Ok(()),
            (Some(_), _) => Err(SchemaError::FieldNotString {
                index: self.index,
                field: TRANSLATION_FIELD,
            }),
            (None, MissingTranslation::Create) => Ok(()),
            (None, MissingTranslation::Require) => Err(SchemaError::MissingField {
                index: self.index,
                field: TRANSLATION_FIELD,
            }),
        }
    }

    /// Overwrite the translation with `value`, taken verbatim.
    pub fn set_translation(
        &mut self,
        value: impl Into<String>,
        policy: MissingTranslation,
    ) -> Result<(), SchemaError> {
        self.check_writable(policy)?;
        self.fields
            .insert(TRANSLATION_FIELD.to_string(), Value::String(value.into()));
        Ok(())
    }
}

fn label_array(root: &Value) -> Result<&Vec<Value>, SchemaError> {
    let object = root.as_object().ok_or(SchemaError::RootNotObject)?;
    let labels = object.get(LABELS_FIELD).ok_or(SchemaError::MissingLabels)?;
    labels.as_array().ok_or(SchemaError::LabelsNotArray)
}

fn label_array_mut(root: &mut Value) -> Result<&mut Vec<Value>, SchemaError> {
    let object = root.as_object_mut().ok_or(SchemaError::RootNotObject)?;
    let labels = object
        .get_mut(LABELS_FIELD)
        .ok_or(SchemaError::MissingLabels)?;
    labels.as_array_mut().ok_or(SchemaError::LabelsNotArray)
}

fn read_text(fields: &Map<String, Value>, index: usize) -> Result<&str, SchemaError> {
    match fields.get(TEXT_FIELD) {
        None => Err(SchemaError::MissingField {
            index,
            field: TEXT_FIELD,
        }),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(SchemaError::FieldNotString {
            index,
            field: TEXT_FIELD,
        }),
    }
}
