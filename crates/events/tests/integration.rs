//! Integration tests for events

#[cfg(test)]
mod tests {
    use dine_events::*;
    use dine_types::AgentId;

    #[tokio::test]
    async fn test_event_sender_emitter() {
        let (tx, mut rx) = channel();

        tx.emit_task_failed("agent", "panicked");
        tx.emit_table(TableEvent::AdvisoryRaised {
            message: "someone will starve".into(),
        });

        let first = rx.recv().await.unwrap();
        assert!(matches!(
            first.event,
            AppEvent::General(GeneralEvent::TaskFailed { ref task, .. }) if task == "agent"
        ));
        assert_eq!(first.meta.level, EventLevel::Error);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.meta.level, EventLevel::Warn);
        assert_eq!(second.meta.source, EventSource::Table);
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_task_failed("producer", "ignored");
    }

    #[tokio::test]
    async fn test_agent_events_carry_seat_correlation() {
        let (tx, mut rx) = channel();
        tx.emit_agent(AgentEvent::Ate {
            agent: AgentId(3),
            eaten: 1,
        });

        let message = rx.recv().await.unwrap();
        assert_eq!(message.meta.correlation_id.as_deref(), Some("p3"));
        assert_eq!(message.meta.source, EventSource::Agent);
    }

    #[test]
    fn test_silent_emitter_drops_events() {
        let silent: Option<EventSender> = None;
        assert!(silent.event_sender().is_none());
        silent.emit_table(TableEvent::AgentsLaunched { agents: 2 });
    }

    #[test]
    fn test_release_reason_serialization() {
        let json = serde_json::to_string(&ReleaseReason::NoMoreFood).unwrap();
        assert_eq!(json, r#""no_more_food""#);
    }
}
