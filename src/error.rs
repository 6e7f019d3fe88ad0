//! Error types for the life simulation engine

use crate::property::LifeStage;
use thiserror::Error;

/// Main error type for the life simulation engine
///
/// Loading errors (conditions, catalog, config) are hard failures. The
/// gameplay variants are soft rejections: the request was ignored and no
/// state changed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LifeSimError {
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Unknown stat: {0}")]
    UnknownStat(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Game is over")]
    GameOver,

    #[error("Event {0} is waiting for a choice")]
    EventPending(String),

    #[error("No event is waiting for a choice")]
    NoPendingEvent,

    #[error("Choice {index} is out of range for event {event_id}")]
    ChoiceOutOfRange { event_id: String, index: usize },

    #[error("Choice {index} of event {event_id} is not available")]
    ChoiceUnavailable { event_id: String, index: usize },

    #[error("Action {action} is not available during {stage}")]
    ActionGated { action: String, stage: LifeStage },
}

impl From<serde_json::Error> for LifeSimError {
    fn from(err: serde_json::Error) -> Self {
        LifeSimError::DeserializationError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<LifeSimError> for pyo3::PyErr {
    fn from(err: LifeSimError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};

        match err {
            LifeSimError::InvalidCondition(_)
            | LifeSimError::InvalidEvent(_)
            | LifeSimError::DeserializationError(_)
            | LifeSimError::ChoiceOutOfRange { .. } => PyValueError::new_err(err.to_string()),
            LifeSimError::EventNotFound(_)
            | LifeSimError::UnknownStat(_)
            | LifeSimError::UnknownAction(_) => PyKeyError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the life simulation engine
pub type Result<T> = std::result::Result<T, LifeSimError>;
