//! Error types for single-table inheritance
//!
//! Parent resolution failures are fatal and surface at the first use of a
//! misconfigured model. Fillable merge failures never reach this type as a
//! returned error; they are carried inside `FillableMerge::Degraded`.

use crate::config::ConfigError;
use crate::event_error::EventError;

/// Result type alias for inheritance operations
pub type StiResult<T> = Result<T, StiError>;

/// Error types for single-table inheritance operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum StiError {
    /// The parent type of a model could not be resolved
    #[error("Cannot resolve parent of '{model}': {reason}")]
    Resolution { model: String, reason: String },

    /// A transient model instance could not be constructed
    #[error("Cannot instantiate '{model}': {message}")]
    Instantiation { model: String, message: String },

    /// Two distinct types map to the same discriminator alias
    #[error("Discriminator alias '{alias}' is claimed by both '{first}' and '{second}'")]
    AliasCollision {
        alias: String,
        first: String,
        second: String,
    },

    /// Lifecycle hook failed
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl StiError {
    pub fn resolution(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            model: model.into(),
            reason: reason.into(),
        }
    }

    pub fn instantiation(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Instantiation {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Check if this is a parent resolution failure
    pub fn is_resolution(&self) -> bool {
        matches!(self, StiError::Resolution { .. })
    }
}
