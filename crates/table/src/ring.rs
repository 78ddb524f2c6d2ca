//! Ring orchestration: build, stock, run, drain, report

use crate::agent::{Agent, AgentContext};
use dine_config::TableConfig;
use dine_errors::{Error, TableError};
use dine_events::{EventEmitter, EventSender, TableEvent};
use dine_resources::{serving_source, Resource, Slot};
use dine_types::{AgentReport, ResourceReport, RunReport, SeatTopology, SlotTopology};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// N agents and N slots wired into a circle
///
/// Agent `i` takes slot `i - 1` as its left and slot `i` as its right, so
/// every slot is shared by exactly two neighbours.
#[derive(Debug)]
pub struct Ring {
    config: TableConfig,
    slots: Vec<Arc<Slot>>,
    agents: Vec<Agent>,
}

impl Ring {
    /// Allocate and wire the ring; nothing is stocked or running yet
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation (fewer than
    /// two agents).
    pub fn build(config: &TableConfig) -> Result<Self, Error> {
        config.validate()?;
        let size = config.agent_count;

        let slots: Vec<Arc<Slot>> = (0..size)
            .map(|i| Arc::new(Slot::new(SlotTopology::for_slot(i, size))))
            .collect();

        let agents = (0..size)
            .map(|i| {
                let seat = SeatTopology::for_seat(i, size);
                Agent::new(
                    seat,
                    Arc::clone(&slots[seat.left_resource.index()]),
                    Arc::clone(&slots[seat.right_resource.index()]),
                )
            })
            .collect();

        debug!(agents = size, "ring built");
        Ok(Self {
            config: config.clone(),
            slots,
            agents,
        })
    }

    /// Number of seats
    #[must_use]
    pub fn size(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Seat wiring, in seat order
    #[must_use]
    pub fn seats(&self) -> Vec<SeatTopology> {
        self.agents.iter().map(Agent::seat).collect()
    }

    /// Slot wiring, in slot order
    #[must_use]
    pub fn slot_topology(&self) -> Vec<SlotTopology> {
        self.slots.iter().map(|slot| slot.topology()).collect()
    }

    /// Place one fresh resource into every slot
    ///
    /// Until this runs every acquisition attempt blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if a slot is already stocked.
    #[allow(clippy::ref_option)]
    pub fn stock(&self, events: &Option<EventSender>) -> Result<(), Error> {
        for slot in &self.slots {
            slot.place(Resource::new(slot.id()))?;
            events.emit_table(TableEvent::ResourcePlaced {
                resource: slot.id(),
                right_of: slot.left_agent(),
            });
        }
        Ok(())
    }

    /// Run the whole simulation and collect the report
    ///
    /// # Errors
    ///
    /// Returns an error if stocking fails, an agent or the producer task
    /// fails, or a resource is missing from its slot after every agent has
    /// finished.
    pub async fn run(self, events: Option<EventSender>) -> Result<RunReport, Error> {
        let started = Instant::now();
        let size = self.size();

        events.emit_table(TableEvent::RingBuilt { agents: size });
        for advisory in self.config.advisories() {
            warn!(%advisory, "configuration advisory");
            events.emit_table(TableEvent::AdvisoryRaised {
                message: advisory.to_string(),
            });
        }

        self.stock(&events)?;
        let Ring {
            config,
            slots,
            agents,
        } = self;

        let (producer, source) = serving_source(config.effective_bowl_capacity());
        let ctx = AgentContext {
            source: source.clone(),
            think: config.think_duration(),
            events: events.clone(),
        };

        let mut tasks = JoinSet::new();
        for agent in agents {
            tasks.spawn(agent.run(ctx.clone()));
        }
        drop(ctx);
        events.emit_table(TableEvent::AgentsLaunched { agents: size });

        let servings = config.serving_count;
        let producing = tokio::spawn({
            let events = events.clone();
            async move {
                events.emit_table(TableEvent::ServingStarted { servings });
                let produced = producer.produce(servings).await;
                events.emit_table(TableEvent::SourceExhausted {
                    servings: produced,
                });
                produced
            }
        });

        let mut finished = Vec::with_capacity(size);
        while let Some(joined) = tasks.join_next().await {
            let agent = match joined {
                Ok(outcome) => outcome?,
                Err(e) => {
                    events.emit_task_failed("agent", e.to_string());
                    return Err(TableError::AgentFailed {
                        message: e.to_string(),
                    }
                    .into());
                }
            };
            debug!(agent = %agent.id(), eaten = agent.eaten_count(), "agent done");
            events.emit_table(TableEvent::AgentFinished {
                agent: agent.id(),
                remaining: size - finished.len() - 1,
            });
            finished.push(agent);
        }
        if finished.len() != size {
            return Err(TableError::IncompleteRun {
                expected: size,
                finished: finished.len(),
            }
            .into());
        }

        let produced = producing.await.map_err(|e| {
            events.emit_task_failed("producer", e.to_string());
            TableError::ProducerFailed {
                message: e.to_string(),
            }
        })?;

        let resources = reclaim(&slots)?;
        let mut agents: Vec<AgentReport> = finished.iter().map(Agent::report).collect();
        agents.sort_by_key(|a| a.id);

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let report = RunReport {
            agents,
            resources,
            servings_total: produced,
            servings_eaten: source.served(),
            elapsed_ms,
        };

        let starved = report.starved_agents().count();
        info!(
            agents = size,
            servings = config.serving_count,
            eaten = report.servings_eaten,
            starved,
            elapsed_ms,
            "run completed"
        );
        events.emit_table(TableEvent::RunCompleted {
            agents: size,
            servings_eaten: report.servings_eaten,
            starved,
            elapsed_ms,
        });
        Ok(report)
    }
}

/// Take every resource back out of its slot once all agents are done
fn reclaim(slots: &[Arc<Slot>]) -> Result<Vec<ResourceReport>, Error> {
    slots
        .iter()
        .map(|slot| -> Result<ResourceReport, Error> {
            let resource = slot.try_take()?.ok_or(TableError::ResourceLost {
                slot: slot.id().index(),
                resource: slot.id().index(),
            })?;
            Ok(resource.report())
        })
        .collect()
}
