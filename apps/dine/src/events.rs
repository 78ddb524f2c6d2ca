//! Event handling and run narration

use crate::logging::log_event_with_tracing;
use dine_events::{AgentEvent, AppEvent, EventMessage, TableEvent};
use dine_types::AgentId;

/// Event handler for user feedback while a run is in flight
///
/// Every event is mirrored into tracing (task failures reach stderr
/// through the subscriber; advisories are logged by the table itself). With `verbose` set, table and agent events are
/// also narrated on stdout, one line per step.
pub struct EventHandler {
    verbose: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);

        if !self.verbose {
            return;
        }
        match message.event {
            AppEvent::Table(event) => narrate_table(&event),
            AppEvent::Agent(event) => narrate_agent(&event),
            AppEvent::General(_) => {}
        }
    }
}

fn narrate_table(event: &TableEvent) {
    match event {
        TableEvent::ResourcePlaced { resource, right_of } => {
            println!("Placing resource {resource} to the right of agent {right_of}.");
        }
        TableEvent::AgentsLaunched { agents } => println!("{agents} agents started."),
        TableEvent::ServingStarted { servings } => println!("Now serving {servings}."),
        TableEvent::SourceExhausted { servings } => {
            println!("All {servings} servings are out.");
        }
        TableEvent::RunCompleted { .. } => println!("All done."),
        TableEvent::RingBuilt { .. }
        | TableEvent::AdvisoryRaised { .. }
        | TableEvent::AgentFinished { .. } => {}
    }
}

fn narrate_agent(event: &AgentEvent) {
    let who = indented(event.agent());
    match event {
        AgentEvent::TookFirst { resource, side, .. } => {
            println!("{who} takes {} ({resource}).", side.as_str());
        }
        AgentEvent::TookBoth {
            resource,
            side,
            tries,
            ..
        } => {
            println!(
                "{who} takes {} ({resource}); now has both ({tries} tries).",
                side.as_str()
            );
        }
        AgentEvent::Released {
            resource,
            side,
            reason,
            ..
        } => {
            println!(
                "{who} releases {} ({resource}); {}.",
                side.as_str(),
                reason.as_str()
            );
        }
        AgentEvent::BackedOff { attempts, .. } => {
            println!("{who} unable to get both resources in {attempts} consecutive attempts.");
        }
        AgentEvent::Ate { .. } => println!("{who} took a serving."),
        AgentEvent::Thinking { eaten, .. } => {
            println!("{who} has eaten {eaten} servings; starting to think.");
        }
        AgentEvent::DoneThinking { .. } => println!("{who} done thinking."),
        AgentEvent::FoundSourceEmpty { .. } => {
            println!("{who} finds no more food, quitting.");
        }
        AgentEvent::Left { eaten, waits, .. } => {
            println!("{who} leaves after {eaten} servings and {waits} waits.");
        }
    }
}

/// Agent id indented by its seat so interleaved lines read as columns
fn indented(agent: AgentId) -> String {
    format!("{:width$}{agent}", "", width = 2 * (agent.index() + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narration_indents_by_seat() {
        assert_eq!(indented(AgentId(0)), "  p0");
        assert_eq!(indented(AgentId(2)), "      p2");
    }
}
