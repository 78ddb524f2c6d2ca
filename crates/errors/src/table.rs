//! Ring orchestration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum TableError {
    #[error("agent task failed: {message}")]
    AgentFailed { message: String },

    #[error("producer task failed: {message}")]
    ProducerFailed { message: String },

    #[error("resource {resource} missing from slot {slot} after the run")]
    ResourceLost { slot: usize, resource: usize },

    #[error("expected {expected} agents to finish, {finished} did")]
    IncompleteRun { expected: usize, finished: usize },
}

impl UserFacingError for TableError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::AgentFailed { .. } | Self::ProducerFailed { .. } => {
                Some("Re-run with --debug to capture the task failure.")
            }
            Self::ResourceLost { .. } | Self::IncompleteRun { .. } => {
                Some("This indicates a protocol violation; please report it.")
            }
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::AgentFailed { .. } | Self::ProducerFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::AgentFailed { .. } => Some("table.agent_failed"),
            Self::ProducerFailed { .. } => Some("table.producer_failed"),
            Self::ResourceLost { .. } => Some("table.resource_lost"),
            Self::IncompleteRun { .. } => Some("table.incomplete_run"),
        }
    }
}
