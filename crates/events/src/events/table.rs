use dine_types::{AgentId, ResourceId};
use serde::{Deserialize, Serialize};

/// Ring lifecycle events emitted by the orchestrator and the producer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TableEvent {
    /// Topology wired, nothing running yet
    RingBuilt { agents: usize },

    /// The configuration runs but has a predictable bad outcome
    AdvisoryRaised { message: String },

    /// A fresh resource was put into its slot
    ResourcePlaced {
        resource: ResourceId,
        right_of: AgentId,
    },

    /// All agent tasks spawned
    AgentsLaunched { agents: usize },

    /// Producer began filling the source
    ServingStarted { servings: u64 },

    /// Producer finished; no more servings will ever appear
    SourceExhausted { servings: u64 },

    /// One agent reported Done
    AgentFinished { agent: AgentId, remaining: usize },

    /// Every agent is Done and every resource is back in its slot
    RunCompleted {
        agents: usize,
        servings_eaten: u64,
        starved: usize,
        elapsed_ms: u64,
    },
}
