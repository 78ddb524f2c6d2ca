//! Identifiers for agents and resources
//!
//! Both are positions around the ring, so they are plain indices wrapped in
//! newtypes to keep the two namespaces apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat index of an agent around the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub usize);

/// Index of a resource (and of the slot it is stocked into)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub usize);

impl AgentId {
    /// Raw seat index
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl ResourceId {
    /// Raw resource index
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<usize> for AgentId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<usize> for ResourceId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_short_prefixes() {
        assert_eq!(AgentId(4).to_string(), "p4");
        assert_eq!(ResourceId(11).to_string(), "c11");
    }

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let json = serde_json::to_string(&AgentId(7)).unwrap();
        assert_eq!(json, "7");
        let id: ResourceId = serde_json::from_str("3").unwrap();
        assert_eq!(id, ResourceId(3));
    }
}
