/*!
 * Host workflow for a full extract and reinject session.
 *
 * The interactive flow is: select a source document (its texts are
 * extracted and handed out for saving), select the translated text file,
 * optionally select the document again, then execute the reinjection and
 * save the result. Each step is an event; `Workflow::handle` applies it and
 * returns the file the host should persist, if any. A rejected event leaves
 * the state unchanged.
 */

use log::debug;

use crate::app_config::Config;
use crate::errors::{AppError, WorkflowError};
use crate::extractor;
use crate::line_codec;
use crate::reinjector::{ReinjectReport, Reinjector};

/// Where the session currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// No source document selected yet
    AwaitingSource,
    /// Texts extracted, waiting for the translated file
    AwaitingTranslation {
        source: String,
    },
    /// Source and translations are known
    ReadyToReinject {
        source: String,
        lines: Vec<String>,
    },
    /// The updated document has been produced
    Done {
        output: String,
        report: ReinjectReport,
    },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingSource => "awaiting source",
            Self::AwaitingTranslation { .. } => "awaiting translation",
            Self::ReadyToReinject { .. } => "ready to reinject",
            Self::Done { .. } => "done",
        }
    }
}

/// Something that happened on the host side
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// A source document was selected; its texts get extracted
    SourceSelected(String),
    /// The source document was selected again before reinjecting
    SourceReselected(String),
    /// The translated text file was selected
    TranslationSelected(String),
    /// The user asked for the reinjection to run
    Execute,
    /// Start over
    Reset,
}

impl WorkflowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SourceSelected(_) => "source selected",
            Self::SourceReselected(_) => "source reselected",
            Self::TranslationSelected(_) => "translation selected",
            Self::Execute => "execute",
            Self::Reset => "reset",
        }
    }
}

/// Work the host has to carry out after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Save `content` under the suggested `file_name`
    Persist { file_name: String, content: String },
}

/// Explicit state machine over one extract and reinject session
#[derive(Debug, Clone)]
pub struct Workflow {
    state: WorkflowState,
    extract_file_name: String,
    reinject_file_name: String,
    reinjector: Reinjector,
}

impl Workflow {
    pub fn new(config: &Config) -> Self {
        Self {
            state: WorkflowState::AwaitingSource,
            extract_file_name: config.output.extract_file_name.clone(),
            reinject_file_name: config.output.reinject_file_name.clone(),
            reinjector: Reinjector::new(config.reinject)
                .with_pretty_output(config.output.pretty_json),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Apply `event`, returning the effect the host must perform
    pub fn handle(&mut self, event: WorkflowEvent) -> Result<Option<Effect>, AppError> {
        let (next, effect) = self.transition(event)?;
        debug!("Workflow: {} -> {}", self.state.name(), next.name());
        self.state = next;
        Ok(effect)
    }

    fn transition(
        &self,
        event: WorkflowEvent,
    ) -> Result<(WorkflowState, Option<Effect>), AppError> {
        use WorkflowEvent as E;
        use WorkflowState as S;

        match (&self.state, event) {
            (_, E::Reset) => Ok((S::AwaitingSource, None)),

            (_, E::SourceSelected(source)) => {
                let content = extractor::extract_str(&source)?;
                let effect = Effect::Persist {
                    file_name: self.extract_file_name.clone(),
                    content,
                };
                Ok((S::AwaitingTranslation { source }, Some(effect)))
            }

            (S::AwaitingTranslation { .. }, E::SourceReselected(source)) => {
                Ok((S::AwaitingTranslation { source }, None))
            }
            (S::ReadyToReinject { lines, .. }, E::SourceReselected(source)) => Ok((
                S::ReadyToReinject {
                    source,
                    lines: lines.clone(),
                },
                None,
            )),

            (
                S::AwaitingTranslation { source } | S::ReadyToReinject { source, .. },
                E::TranslationSelected(text),
            ) => Ok((
                S::ReadyToReinject {
                    source: source.clone(),
                    lines: line_codec::split_lines(&text),
                },
                None,
            )),

            (S::ReadyToReinject { source, lines }, E::Execute) => {
                let (output, report) = self.reinjector.reinject_str(source, lines)?;
                let effect = Effect::Persist {
                    file_name: self.reinject_file_name.clone(),
                    content: output.clone(),
                };
                Ok((S::Done { output, report }, Some(effect)))
            }

            (state, event) => Err(WorkflowError::InvalidTransition {
                state: state.name(),
                event: event.name(),
            }
            .into()),
        }
    }
}
