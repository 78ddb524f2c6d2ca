//! Table (simulation) configuration and its preconditions

use crate::constants::{
    DEFAULT_AGENT_COUNT, DEFAULT_SERVING_COUNT, DEFAULT_THINK_MS, MAX_BOWL_CAPACITY,
    MIN_AGENT_COUNT,
};
use dine_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_agent_count")]
    pub agent_count: usize,
    #[serde(default = "default_serving_count")]
    pub serving_count: u64,
    #[serde(default = "default_think_ms")]
    pub think_ms: u64,
    /// Buffered servings; `None` buffers the whole supply, up to
    /// [`MAX_BOWL_CAPACITY`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowl_capacity: Option<usize>,
}

/// Non-fatal findings about a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAdvisory {
    /// Fewer servings than agents: somebody will certainly go hungry
    StarvationCertain { agents: usize, servings: u64 },
}

impl fmt::Display for ConfigAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StarvationCertain { agents, servings } => write!(
                f,
                "only {servings} servings for {agents} agents; at least {} will starve",
                (*agents as u64).saturating_sub(*servings)
            ),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            agent_count: DEFAULT_AGENT_COUNT,
            serving_count: DEFAULT_SERVING_COUNT,
            think_ms: DEFAULT_THINK_MS,
            bowl_capacity: None,
        }
    }
}

impl TableConfig {
    /// Convenience constructor used by tests and embedders
    #[must_use]
    pub fn new(agent_count: usize, serving_count: u64, think_ms: u64) -> Self {
        Self {
            agent_count,
            serving_count,
            think_ms,
            bowl_capacity: None,
        }
    }

    /// Check hard preconditions
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two agents are configured, or if the
    /// bowl capacity is explicitly set to zero or above [`MAX_BOWL_CAPACITY`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_count < MIN_AGENT_COUNT {
            return Err(ConfigError::TooFewAgents {
                count: self.agent_count,
                minimum: MIN_AGENT_COUNT,
            });
        }
        if let Some(bowl) = self.bowl_capacity {
            if bowl == 0 || bowl > MAX_BOWL_CAPACITY {
                return Err(ConfigError::InvalidValue {
                    field: "bowl_capacity".to_string(),
                    value: bowl.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Advisory conditions that do not prevent a run
    #[must_use]
    pub fn advisories(&self) -> Vec<ConfigAdvisory> {
        let mut found = Vec::new();
        if self.serving_count < self.agent_count as u64 {
            found.push(ConfigAdvisory::StarvationCertain {
                agents: self.agent_count,
                servings: self.serving_count,
            });
        }
        found
    }

    /// Pause taken after each meal
    #[must_use]
    pub fn think_duration(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }

    /// Channel buffer for the serving source, in `1..=MAX_BOWL_CAPACITY`
    #[must_use]
    pub fn effective_bowl_capacity(&self) -> usize {
        self.bowl_capacity
            .unwrap_or_else(|| usize::try_from(self.serving_count).unwrap_or(usize::MAX))
            .clamp(1, MAX_BOWL_CAPACITY)
    }
}

fn default_agent_count() -> usize {
    DEFAULT_AGENT_COUNT
}

fn default_serving_count() -> u64 {
    DEFAULT_SERVING_COUNT
}

fn default_think_ms() -> u64 {
    DEFAULT_THINK_MS
}
