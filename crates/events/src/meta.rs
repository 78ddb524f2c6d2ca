use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Level;
use uuid::Uuid;

/// Envelope data attached to every emitted event.
///
/// Agent steps carry the seat (`p3`) as correlation id so a single agent's
/// history can be filtered out of an interleaved log.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMeta {
    pub event_id: Uuid,
    pub correlation_id: Option<String>,
    /// Wall-clock time at emission.
    pub timestamp: DateTime<Utc>,
    pub level: EventLevel,
    pub source: EventSource,
}

impl EventMeta {
    #[must_use]
    pub fn new(level: impl Into<EventLevel>, source: EventSource) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            correlation_id: None,
            timestamp: Utc::now(),
            level: level.into(),
            source,
        }
    }

    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }
}

/// Serializable mirror of [`tracing::Level`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EventLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<Level> for EventLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::TRACE => EventLevel::Trace,
            Level::DEBUG => EventLevel::Debug,
            Level::INFO => EventLevel::Info,
            Level::WARN => EventLevel::Warn,
            Level::ERROR => EventLevel::Error,
        }
    }
}

/// Part of the simulator an event came from.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    General,
    Table,
    Agent,
}

impl EventSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Table => "table",
            Self::Agent => "agent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_levels_convert() {
        assert_eq!(EventLevel::from(Level::WARN), EventLevel::Warn);
        assert_eq!(EventLevel::from(Level::TRACE), EventLevel::Trace);
        assert!(EventLevel::Error > EventLevel::Debug);
    }

    #[test]
    fn meta_serializes_in_camel_case() {
        let meta = EventMeta::new(Level::INFO, EventSource::Table).with_correlation_id("p1");
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["source"], "table");
        assert_eq!(json["level"], "info");
        assert_eq!(json["correlationId"], "p1");
        assert!(json.get("eventId").is_some());
    }
}
