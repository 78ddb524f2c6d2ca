//! End-of-run report types

use crate::{AgentId, ResourceId};
use serde::{Deserialize, Serialize};

/// Final statistics for one agent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReport {
    /// Seat of the agent
    pub id: AgentId,
    /// Failed acquisition attempts (had to put a resource back)
    pub wait_count: u64,
    /// Servings consumed
    pub eaten_count: u64,
    /// True when the agent finished without eating anything
    pub starved: bool,
}

/// Final statistics for one resource
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReport {
    /// Resource identity
    pub id: ResourceId,
    /// Times the resource was picked up
    pub grab_count: u64,
    /// Times the resource was used to consume a serving
    pub use_count: u64,
}

/// Complete report of one simulation run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    /// Per-agent statistics, ordered by id
    pub agents: Vec<AgentReport>,
    /// Per-resource statistics, ordered by id
    pub resources: Vec<ResourceReport>,
    /// Servings put into the source
    pub servings_total: u64,
    /// Servings handed out by the source
    pub servings_eaten: u64,
    /// Wall-clock duration of the run
    pub elapsed_ms: u64,
}

impl AgentReport {
    /// Build a report, deriving the starved flag from the eaten count
    #[must_use]
    pub fn new(id: AgentId, wait_count: u64, eaten_count: u64) -> Self {
        Self {
            id,
            wait_count,
            eaten_count,
            starved: eaten_count == 0,
        }
    }
}

impl RunReport {
    /// Sum of servings eaten across all agents
    #[must_use]
    pub fn total_eaten(&self) -> u64 {
        self.agents.iter().map(|a| a.eaten_count).sum()
    }

    /// Sum of failed acquisition attempts across all agents
    #[must_use]
    pub fn total_waits(&self) -> u64 {
        self.agents.iter().map(|a| a.wait_count).sum()
    }

    /// Agents that never ate
    pub fn starved_agents(&self) -> impl Iterator<Item = &AgentReport> {
        self.agents.iter().filter(|a| a.starved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunReport {
        RunReport {
            agents: vec![
                AgentReport::new(AgentId(0), 3, 2),
                AgentReport::new(AgentId(1), 5, 0),
                AgentReport::new(AgentId(2), 0, 1),
            ],
            resources: vec![ResourceReport {
                id: ResourceId(0),
                grab_count: 4,
                use_count: 2,
            }],
            servings_total: 3,
            servings_eaten: 3,
            elapsed_ms: 1,
        }
    }

    #[test]
    fn totals_sum_over_agents() {
        let report = sample();
        assert_eq!(report.total_eaten(), 3);
        assert_eq!(report.total_waits(), 8);
    }

    #[test]
    fn starved_flag_follows_eaten_count() {
        let report = sample();
        let starved: Vec<_> = report.starved_agents().map(|a| a.id).collect();
        assert_eq!(starved, vec![AgentId(1)]);
    }

    #[test]
    fn report_serializes_with_flat_ids() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["agents"][1]["id"], 1);
        assert_eq!(json["agents"][1]["starved"], true);
        assert_eq!(json["resources"][0]["grab_count"], 4);
    }
}
