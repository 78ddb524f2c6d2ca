//! Integration tests for error types

#[cfg(test)]
mod tests {
    use dine_errors::*;

    #[test]
    fn test_error_conversion() {
        let cfg_err = ConfigError::TooFewAgents {
            count: 1,
            minimum: 2,
        };
        let err: Error = cfg_err.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ResourceError::SlotOccupied {
            slot: 3,
            held: 3,
            placed: 4,
        };
        assert_eq!(
            err.to_string(),
            "slot 3 already holds resource 3; cannot place resource 4"
        );
    }

    #[test]
    fn test_error_clone() {
        let err = TableError::ResourceLost {
            slot: 1,
            resource: 1,
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
    }

    #[test]
    fn test_user_facing_delegation() {
        let err: Error = ConfigError::TooFewAgents {
            count: 0,
            minimum: 2,
        }
        .into();
        assert_eq!(err.user_code(), Some("config.too_few_agents"));
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());

        let err: Error = TableError::AgentFailed {
            message: "panicked".into(),
        }
        .into();
        assert!(err.is_retryable());
    }
}
