#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! The table: agents, their acquisition protocol, and the ring that runs them
//!
//! A [`Ring`] seats N [`Agent`]s between N slots, stocks one resource per
//! slot, launches one task per agent plus a serving producer, waits for every
//! agent to observe exhaustion and reports per-agent and per-resource
//! statistics.

pub mod agent;
pub mod ring;

pub use agent::{Agent, AgentContext, AgentState};
pub use ring::Ring;

use dine_config::TableConfig;
use dine_errors::Error;
use dine_events::EventSender;
use dine_types::RunReport;

/// Build a ring from `config` and run it to completion
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the run fails.
pub async fn simulate(
    config: &TableConfig,
    events: Option<EventSender>,
) -> Result<RunReport, Error> {
    Ring::build(config)?.run(events).await
}
