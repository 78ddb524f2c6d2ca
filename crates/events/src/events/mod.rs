use serde::{Deserialize, Serialize};

use crate::EventSource;

// Declare all domain modules
pub mod agent;
pub mod general;
pub mod table;

// Re-export all domain events
pub use agent::*;
pub use general::*;
pub use table::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Failures outside the agent protocol
    General(GeneralEvent),

    /// Ring lifecycle events (build, stock, launch, drain)
    Table(TableEvent),

    /// Acquisition protocol steps of individual agents
    Agent(AgentEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::General,
            Self::Table(_) => EventSource::Table,
            Self::Agent(_) => EventSource::Agent,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(_) => Level::ERROR,

            Self::Table(TableEvent::AdvisoryRaised { .. }) => Level::WARN,

            // Per-step protocol chatter
            Self::Agent(
                AgentEvent::TookFirst { .. }
                | AgentEvent::TookBoth { .. }
                | AgentEvent::Released { .. }
                | AgentEvent::BackedOff { .. }
                | AgentEvent::Thinking { .. }
                | AgentEvent::DoneThinking { .. },
            ) => Level::TRACE,

            Self::Agent(_)
            | Self::Table(TableEvent::ResourcePlaced { .. } | TableEvent::AgentFinished { .. }) => {
                Level::DEBUG
            }

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "dine::events::general",
            Self::Table(_) => "dine::events::table",
            Self::Agent(_) => "dine::events::agent",
        }
    }
}
