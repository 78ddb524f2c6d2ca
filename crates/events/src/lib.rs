#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in dine
//!
//! All narration of a run goes through events; agents and the ring never
//! print. The CLI drains the channel, mirrors events into `tracing` and
//! optionally renders them as progress lines.
//!
//! ## Architecture
//!
//! - **Domain-driven events**: grouped by functional domain (General, Table, Agent)
//! - **Unified `EventEmitter` trait**: single API for all emissions
//! - **Metadata envelope**: every event travels with an [`EventMeta`]

pub mod meta;
pub use meta::{EventLevel, EventMeta, EventSource};

pub mod events;
pub use events::{AgentEvent, AppEvent, GeneralEvent, ReleaseReason, TableEvent};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// An event together with its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub meta: EventMeta,
    pub event: AppEvent,
}

impl EventMessage {
    #[must_use]
    pub fn new(meta: EventMeta, event: AppEvent) -> Self {
        Self { meta, event }
    }
}

/// Type alias for the event sender
pub type EventSender = UnboundedSender<EventMessage>;

/// Type alias for the event receiver
pub type EventReceiver = UnboundedReceiver<EventMessage>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout dine
///
/// This trait provides a single, consistent API for emitting events regardless of
/// whether you have a raw `EventSender` or a struct that contains one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event with explicit metadata
    fn emit_with_meta(&self, meta: EventMeta, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(EventMessage::new(meta, event));
        }
    }

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        let meta = EventMeta::new(event.log_level(), event.event_source());
        self.emit_with_meta(meta, event);
    }

    /// Report a spawned task that failed (panicked or was cancelled)
    fn emit_task_failed(&self, task: impl Into<String>, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::task_failed(task, message)));
    }

    /// Emit a ring lifecycle event
    fn emit_table(&self, event: TableEvent) {
        self.emit(AppEvent::Table(event));
    }

    /// Emit an agent protocol event, labelled with the agent's seat
    fn emit_agent(&self, event: AgentEvent) {
        let seat = event.agent().to_string();
        let app = AppEvent::Agent(event);
        let meta =
            EventMeta::new(app.log_level(), app.event_source()).with_correlation_id(seat);
        self.emit_with_meta(meta, app);
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
/// This allows `EventSender` to be used directly where `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

/// Implementation for an optional sender, so callers can run silently
impl EventEmitter for Option<EventSender> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.as_ref()
    }
}
