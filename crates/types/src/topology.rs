//! Ring wiring descriptions
//!
//! Agent `i` sits between resource `i - 1` (on its left) and resource `i`
//! (on its right). Resource `i` is therefore shared by agents `i` and `i + 1`.

use crate::{AgentId, ResourceId};
use serde::{Deserialize, Serialize};

/// Which hand (and which neighbouring slot) of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The other hand
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lowercase name for log lines
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Where one agent sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatTopology {
    pub agent: AgentId,
    pub left_resource: ResourceId,
    pub right_resource: ResourceId,
}

/// Which agents share one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTopology {
    pub resource: ResourceId,
    pub left_agent: AgentId,
    pub right_agent: AgentId,
}

impl SeatTopology {
    /// Seat for agent `index` in a ring of `size`
    #[must_use]
    pub fn for_seat(index: usize, size: usize) -> Self {
        Self {
            agent: AgentId(index),
            left_resource: ResourceId((size + index - 1) % size),
            right_resource: ResourceId(index),
        }
    }
}

impl SlotTopology {
    /// Neighbours of slot `index` in a ring of `size`
    #[must_use]
    pub fn for_slot(index: usize, size: usize) -> Self {
        Self {
            resource: ResourceId(index),
            left_agent: AgentId(index),
            right_agent: AgentId((index + 1) % size),
        }
    }
}
