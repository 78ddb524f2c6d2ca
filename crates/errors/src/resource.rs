//! Slot and serving-source error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    #[error("slot {slot} already holds resource {held}; cannot place resource {placed}")]
    SlotOccupied {
        slot: usize,
        held: usize,
        placed: usize,
    },

    #[error("slot {slot} is closed")]
    SlotClosed { slot: usize },

    #[error("slot {slot} signalled availability but was empty")]
    SlotDesynchronized { slot: usize },
}

impl UserFacingError for ResourceError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SlotOccupied { .. } | Self::SlotDesynchronized { .. } => {
                Some("This indicates a protocol violation; please report it.")
            }
            Self::SlotClosed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::SlotOccupied { .. } => Some("resource.slot_occupied"),
            Self::SlotClosed { .. } => Some("resource.slot_closed"),
            Self::SlotDesynchronized { .. } => Some("resource.slot_desynchronized"),
        }
    }
}
