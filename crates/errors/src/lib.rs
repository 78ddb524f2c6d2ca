#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the dine simulator
//!
//! One enum per domain (configuration, slots, the running table) plus a
//! cross-crate [`Error`] that wraps them. Everything is `Clone` so an
//! agent's failure can be carried out of its task and reported later.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod resource;
pub mod table;

// Re-export all error types at the root
pub use config::ConfigError;
pub use resource::ResourceError;
pub use table::TableError;

/// Error returned across crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("table error: {0}")]
    Table(#[from] TableError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl Error {
    fn domain(&self) -> Option<&dyn UserFacingError> {
        match self {
            Error::Config(err) => Some(err),
            Error::Resource(err) => Some(err),
            Error::Table(err) => Some(err),
            Error::Internal(_) | Error::Io { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(ConfigError::SerializeError {
            error: err.to_string(),
        })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// What the CLI needs to print an error: a message, an optional hint, a
/// stable code, and whether trying again could help.
pub trait UserFacingError {
    fn user_message(&self) -> Cow<'_, str>;

    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match (self.domain(), self) {
            (Some(err), _) => err.user_message(),
            (None, Error::Io { message, .. }) => Cow::Borrowed(message.as_str()),
            (None, _) => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        self.domain().and_then(UserFacingError::user_hint)
    }

    fn is_retryable(&self) -> bool {
        match self.domain() {
            Some(err) => err.is_retryable(),
            None => matches!(self, Error::Io { .. }),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Internal(_) => Some("error.internal"),
            Error::Io { .. } => Some("error.io"),
            _ => self.domain().and_then(UserFacingError::user_code),
        }
    }
}
