//! Agent state machine and the acquisition protocol
//!
//! Each cycle an agent races both neighbour slots, takes whichever resource
//! shows up first, then tries the other slot without waiting. If the partner
//! is not there it puts the first resource straight back and starts over.
//! An agent therefore never waits while holding anything, which rules out
//! circular wait. Bounded waiting is not guaranteed; failed attempts are
//! counted in `wait_count`.

use dine_errors::ResourceError;
use dine_events::{AgentEvent, EventEmitter, EventSender, ReleaseReason};
use dine_resources::{Resource, ServingSource, Slot, TakeOutcome};
use dine_types::{AgentId, AgentReport, SeatTopology, Side};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Protocol states of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Hungry,
    HasOne,
    HasBoth,
    Eating,
    Thinking,
    Done,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hungry => "hungry",
            Self::HasOne => "has-one",
            Self::HasBoth => "has-both",
            Self::Eating => "eating",
            Self::Thinking => "thinking",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Everything an agent shares with the rest of the table
#[derive(Debug, Clone)]
pub struct AgentContext {
    pub source: ServingSource,
    pub think: Duration,
    pub events: Option<EventSender>,
}

/// Both neighbour resources, held at once
#[derive(Debug)]
struct Pair {
    left: Resource,
    right: Resource,
}

/// One seat at the table
#[derive(Debug)]
pub struct Agent {
    seat: SeatTopology,
    left: Arc<Slot>,
    right: Arc<Slot>,
    state: AgentState,
    wait_count: u64,
    eaten_count: u64,
}

impl Agent {
    /// Seat an agent between two slots
    #[must_use]
    pub fn new(seat: SeatTopology, left: Arc<Slot>, right: Arc<Slot>) -> Self {
        Self {
            seat,
            left,
            right,
            state: AgentState::Hungry,
            wait_count: 0,
            eaten_count: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> AgentId {
        self.seat.agent
    }

    #[must_use]
    pub fn seat(&self) -> SeatTopology {
        self.seat
    }

    #[must_use]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[must_use]
    pub fn wait_count(&self) -> u64 {
        self.wait_count
    }

    #[must_use]
    pub fn eaten_count(&self) -> u64 {
        self.eaten_count
    }

    #[must_use]
    pub fn report(&self) -> AgentReport {
        AgentReport::new(self.id(), self.wait_count, self.eaten_count)
    }

    /// Run the eat/think cycle until the source is exhausted
    ///
    /// Consumes the agent and hands it back in the `Done` state, with both
    /// resources returned to their slots.
    ///
    /// # Errors
    ///
    /// Returns an error only if a slot is closed underneath the agent or a
    /// release finds its slot occupied, both of which are protocol violations.
    pub async fn run(mut self, ctx: AgentContext) -> Result<Self, ResourceError> {
        loop {
            let mut pair = self.acquire(&ctx).await?;

            match ctx.source.take_one().await {
                TakeOutcome::Served => {
                    self.transition(AgentState::Eating);
                    pair.left.record_use();
                    pair.right.record_use();
                    self.eaten_count += 1;
                    ctx.events.emit_agent(AgentEvent::Ate {
                        agent: self.id(),
                        eaten: self.eaten_count,
                    });
                    self.release_pair(pair, ReleaseReason::AteServing, &ctx)?;
                    self.think(&ctx).await;
                }
                TakeOutcome::Exhausted => {
                    ctx.events
                        .emit_agent(AgentEvent::FoundSourceEmpty { agent: self.id() });
                    self.release_pair(pair, ReleaseReason::NoMoreFood, &ctx)?;
                    self.transition(AgentState::Done);
                    ctx.events.emit_agent(AgentEvent::Left {
                        agent: self.id(),
                        eaten: self.eaten_count,
                        waits: self.wait_count,
                    });
                    return Ok(self);
                }
            }
        }
    }

    /// Hungry → `HasBoth`
    async fn acquire(&mut self, ctx: &AgentContext) -> Result<Pair, ResourceError> {
        let mut attempts = 0u64;
        loop {
            self.transition(AgentState::Hungry);

            // The only blocking point of acquisition.
            let (side, mut first) = tokio::select! {
                taken = self.left.take() => (Side::Left, taken?),
                taken = self.right.take() => (Side::Right, taken?),
            };
            first.record_grab();
            self.transition(AgentState::HasOne);
            ctx.events.emit_agent(AgentEvent::TookFirst {
                agent: self.id(),
                resource: first.id(),
                side,
            });

            let partner = side.opposite();
            if let Some(mut second) = self.slot(partner).try_take()? {
                second.record_grab();
                self.transition(AgentState::HasBoth);
                ctx.events.emit_agent(AgentEvent::TookBoth {
                    agent: self.id(),
                    resource: second.id(),
                    side: partner,
                    tries: attempts,
                });
                return Ok(match side {
                    Side::Left => Pair {
                        left: first,
                        right: second,
                    },
                    Side::Right => Pair {
                        left: second,
                        right: first,
                    },
                });
            }

            self.release(side, first, ReleaseReason::PartnerUnavailable, ctx)?;
            self.wait_count += 1;
            attempts += 1;
            ctx.events.emit_agent(AgentEvent::BackedOff {
                agent: self.id(),
                attempts,
            });
            // Let the neighbour holding our partner make progress.
            tokio::task::yield_now().await;
        }
    }

    async fn think(&mut self, ctx: &AgentContext) {
        self.transition(AgentState::Thinking);
        ctx.events.emit_agent(AgentEvent::Thinking {
            agent: self.id(),
            eaten: self.eaten_count,
        });
        if ctx.think.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(ctx.think).await;
        }
        ctx.events
            .emit_agent(AgentEvent::DoneThinking { agent: self.id() });
    }

    fn release_pair(
        &self,
        pair: Pair,
        reason: ReleaseReason,
        ctx: &AgentContext,
    ) -> Result<(), ResourceError> {
        self.release(Side::Left, pair.left, reason, ctx)?;
        self.release(Side::Right, pair.right, reason, ctx)
    }

    fn release(
        &self,
        side: Side,
        resource: Resource,
        reason: ReleaseReason,
        ctx: &AgentContext,
    ) -> Result<(), ResourceError> {
        let id = resource.id();
        self.slot(side).place(resource)?;
        ctx.events.emit_agent(AgentEvent::Released {
            agent: self.id(),
            resource: id,
            side,
            reason,
        });
        Ok(())
    }

    fn slot(&self, side: Side) -> &Slot {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn transition(&mut self, next: AgentState) {
        trace!(agent = %self.id(), from = %self.state, to = %next, "agent state");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dine_resources::serving_source;
    use dine_types::{ResourceId, SlotTopology};

    /// Two slots and one agent seated at position 1 of a two-seat ring.
    fn seat_one() -> (Agent, Arc<Slot>, Arc<Slot>) {
        let left = Arc::new(Slot::new(SlotTopology::for_slot(0, 2)));
        let right = Arc::new(Slot::new(SlotTopology::for_slot(1, 2)));
        let agent = Agent::new(
            SeatTopology::for_seat(1, 2),
            Arc::clone(&left),
            Arc::clone(&right),
        );
        (agent, left, right)
    }

    fn context(source: ServingSource) -> AgentContext {
        AgentContext {
            source,
            think: Duration::ZERO,
            events: None,
        }
    }

    #[tokio::test]
    async fn lone_agent_eats_everything_then_leaves() {
        let (agent, left, right) = seat_one();
        left.place(Resource::new(ResourceId(0))).unwrap();
        right.place(Resource::new(ResourceId(1))).unwrap();

        let (producer, source) = serving_source(4);
        assert_eq!(producer.produce(4).await, 4);

        let agent = agent.run(context(source)).await.unwrap();
        assert_eq!(agent.state(), AgentState::Done);
        assert_eq!(agent.eaten_count(), 4);
        assert_eq!(agent.wait_count(), 0);

        // Both resources are back, grabbed five times (four meals plus the
        // final attempt that found the source empty) and used four times.
        for slot in [&left, &right] {
            let resource = slot.try_take().unwrap().unwrap();
            assert_eq!(resource.grab_count(), 5);
            assert_eq!(resource.use_count(), 4);
        }
    }

    #[tokio::test]
    async fn exhausted_source_releases_both_resources() {
        let (agent, left, right) = seat_one();
        left.place(Resource::new(ResourceId(0))).unwrap();
        right.place(Resource::new(ResourceId(1))).unwrap();

        let (producer, source) = serving_source(1);
        producer.exhaust();

        let agent = agent.run(context(source)).await.unwrap();
        assert!(agent.report().starved);
        assert!(left.is_occupied());
        assert!(right.is_occupied());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn missing_partner_causes_back_off_not_blocking() {
        let (agent, left, right) = seat_one();
        left.place(Resource::new(ResourceId(0))).unwrap();

        let (producer, source) = serving_source(1);
        let (events, mut rx) = dine_events::channel();
        let ctx = AgentContext {
            source,
            think: Duration::ZERO,
            events: Some(events),
        };
        let running = tokio::spawn(agent.run(ctx));

        // Wait until the agent has backed off at least once.
        loop {
            let message = rx.recv().await.unwrap();
            if matches!(
                message.event,
                dine_events::AppEvent::Agent(AgentEvent::BackedOff { .. })
            ) {
                break;
            }
        }

        right.place(Resource::new(ResourceId(1))).unwrap();
        producer.produce(1).await;

        let agent = running.await.unwrap().unwrap();
        assert_eq!(agent.eaten_count(), 1);
        assert!(agent.wait_count() >= 1);
        assert!(left.is_occupied());
        assert!(right.is_occupied());
    }

    #[tokio::test]
    async fn thinking_is_bracketed_by_start_and_end_steps() {
        let (agent, left, right) = seat_one();
        left.place(Resource::new(ResourceId(0))).unwrap();
        right.place(Resource::new(ResourceId(1))).unwrap();

        let (producer, source) = serving_source(1);
        assert_eq!(producer.produce(1).await, 1);
        let (events, mut rx) = dine_events::channel();
        let ctx = AgentContext {
            source,
            think: Duration::from_millis(1),
            events: Some(events),
        };
        agent.run(ctx).await.unwrap();

        let mut steps = Vec::new();
        while let Ok(message) = rx.try_recv() {
            if let dine_events::AppEvent::Agent(step) = message.event {
                steps.push(step);
            }
        }
        let started = steps
            .iter()
            .position(|s| matches!(s, AgentEvent::Thinking { eaten: 1, .. }))
            .unwrap();
        assert!(matches!(
            &steps[started + 1],
            AgentEvent::DoneThinking { agent } if *agent == AgentId(1)
        ));
        assert!(matches!(steps.last(), Some(AgentEvent::Left { eaten: 1, .. })));
    }

    #[tokio::test]
    async fn closed_slot_surfaces_as_error() {
        let (agent, left, right) = seat_one();
        left.close();
        right.close();
        let (_producer, source) = serving_source(1);
        let result = agent.run(context(source)).await;
        assert!(matches!(result, Err(ResourceError::SlotClosed { .. })));
    }
}
