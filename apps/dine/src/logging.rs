//! Structured logging integration for events
//!
//! Mirrors every domain event into the tracing pipeline with structured
//! fields, so `--debug` logs carry the full protocol history even when the
//! terminal narration is off.

use dine_events::{AgentEvent, AppEvent, EventMessage, GeneralEvent, TableEvent};
use tracing::{debug, error, info, trace};

/// Log an `AppEvent` using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    match &message.event {
        AppEvent::General(GeneralEvent::TaskFailed { task, message }) => {
            error!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                task = %task,
                "{task} task failed: {message}"
            );
        }

        AppEvent::Table(table) => match table {
            TableEvent::RingBuilt { agents } => {
                info!(source = meta.source.as_str(), agents = agents, "Ring built");
            }
            TableEvent::AdvisoryRaised { message } => {
                // dine_table already logs advisories at warn
                debug!(source = meta.source.as_str(), "Advisory: {message}");
            }
            TableEvent::ResourcePlaced { resource, right_of } => {
                debug!(
                    source = meta.source.as_str(),
                    resource = %resource,
                    right_of = %right_of,
                    "Resource placed"
                );
            }
            TableEvent::AgentsLaunched { agents } => {
                info!(source = meta.source.as_str(), agents = agents, "Agents launched");
            }
            TableEvent::ServingStarted { servings } => {
                info!(source = meta.source.as_str(), servings = servings, "Serving started");
            }
            TableEvent::SourceExhausted { servings } => {
                info!(source = meta.source.as_str(), servings = servings, "Source exhausted");
            }
            TableEvent::AgentFinished { agent, remaining } => {
                debug!(
                    source = meta.source.as_str(),
                    agent = %agent,
                    remaining = remaining,
                    "Agent finished"
                );
            }
            TableEvent::RunCompleted {
                agents,
                servings_eaten,
                starved,
                elapsed_ms,
            } => {
                info!(
                    source = meta.source.as_str(),
                    agents = agents,
                    servings_eaten = servings_eaten,
                    starved = starved,
                    elapsed_ms = elapsed_ms,
                    "Run completed"
                );
            }
        },

        AppEvent::Agent(step) => match step {
            AgentEvent::TookFirst {
                agent,
                resource,
                side,
            } => {
                trace!(
                    correlation = ?meta.correlation_id,
                    agent = %agent,
                    resource = %resource,
                    side = side.as_str(),
                    "Took first resource"
                );
            }
            AgentEvent::TookBoth {
                agent,
                resource,
                side,
                tries,
            } => {
                trace!(
                    correlation = ?meta.correlation_id,
                    agent = %agent,
                    resource = %resource,
                    side = side.as_str(),
                    tries = tries,
                    "Took both resources"
                );
            }
            AgentEvent::Released {
                agent,
                resource,
                side,
                reason,
            } => {
                trace!(
                    correlation = ?meta.correlation_id,
                    agent = %agent,
                    resource = %resource,
                    side = side.as_str(),
                    reason = reason.as_str(),
                    "Released resource"
                );
            }
            AgentEvent::BackedOff { agent, attempts } => {
                trace!(
                    correlation = ?meta.correlation_id,
                    agent = %agent,
                    attempts = attempts,
                    "Backed off"
                );
            }
            AgentEvent::Thinking { agent, eaten } => {
                trace!(correlation = ?meta.correlation_id, agent = %agent, eaten = eaten, "Thinking");
            }
            AgentEvent::DoneThinking { agent } => {
                trace!(correlation = ?meta.correlation_id, agent = %agent, "Done thinking");
            }
            AgentEvent::Ate { agent, eaten } => {
                debug!(correlation = ?meta.correlation_id, agent = %agent, eaten = eaten, "Ate");
            }
            AgentEvent::FoundSourceEmpty { agent } => {
                debug!(correlation = ?meta.correlation_id, agent = %agent, "Found source empty");
            }
            AgentEvent::Left {
                agent,
                eaten,
                waits,
            } => {
                debug!(
                    correlation = ?meta.correlation_id,
                    agent = %agent,
                    eaten = eaten,
                    waits = waits,
                    "Left the table"
                );
            }
        },
    }
}
