use dine_types::{AgentId, ResourceId, Side};
use serde::{Deserialize, Serialize};

/// Why an agent put a resource back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseReason {
    /// The partner resource was not immediately available
    PartnerUnavailable,
    /// A serving was consumed
    AteServing,
    /// The source is exhausted
    NoMoreFood,
}

impl ReleaseReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PartnerUnavailable => "unable to get partner",
            Self::AteServing => "ate serving",
            Self::NoMoreFood => "no more food",
        }
    }
}

/// Per-agent protocol steps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AgentEvent {
    /// First resource obtained from the race
    TookFirst {
        agent: AgentId,
        resource: ResourceId,
        side: Side,
    },

    /// Partner obtained without waiting
    TookBoth {
        agent: AgentId,
        resource: ResourceId,
        side: Side,
        tries: u64,
    },

    /// Resource put back into its slot
    Released {
        agent: AgentId,
        resource: ResourceId,
        side: Side,
        reason: ReleaseReason,
    },

    /// A full acquisition attempt failed
    BackedOff { agent: AgentId, attempts: u64 },

    /// A serving was consumed
    Ate { agent: AgentId, eaten: u64 },

    /// Pausing before the next attempt
    Thinking { agent: AgentId, eaten: u64 },

    /// The pause is over; about to become hungry again
    DoneThinking { agent: AgentId },

    /// The source reported exhaustion
    FoundSourceEmpty { agent: AgentId },

    /// Terminal state reached
    Left {
        agent: AgentId,
        eaten: u64,
        waits: u64,
    },
}

impl AgentEvent {
    /// Agent the event is about
    #[must_use]
    pub fn agent(&self) -> AgentId {
        match self {
            Self::TookFirst { agent, .. }
            | Self::TookBoth { agent, .. }
            | Self::Released { agent, .. }
            | Self::BackedOff { agent, .. }
            | Self::Ate { agent, .. }
            | Self::Thinking { agent, .. }
            | Self::DoneThinking { agent }
            | Self::FoundSourceEmpty { agent }
            | Self::Left { agent, .. } => *agent,
        }
    }
}
