use serde::{Deserialize, Serialize};

/// Failures that surface outside the regular protocol flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeneralEvent {
    /// A spawned task died before it could hand back its result
    TaskFailed { task: String, message: String },
}

impl GeneralEvent {
    pub fn task_failed(task: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TaskFailed {
            task: task.into(),
            message: message.into(),
        }
    }
}
