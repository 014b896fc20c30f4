use thiserror::Error;

use crate::constants::{BoxError, HandlerId};

/// Errors that can occur in the events manager.
///
/// - `UnknownEvent`: Tried to deregister from an event with no registered handlers.
/// - `InvalidSelector`: A dynamic value could not be turned into a handler selector.
/// - `Handler`: A handler failed during emission; remaining handlers were skipped.
#[derive(Debug, Error)]
pub enum EventError {
    /// Removing Handlers:
    /// - The event key has no handler records in the registry.
    #[error("event {event} does not exist in {manager}")]
    UnknownEvent {
        /// Debug rendering of the event key.
        event: String,
        /// Display name of the manager that was asked.
        manager: String,
    },

    /// Removing Handlers:
    /// - The selector was neither absent, a handler, nor a non-negative handler id.
    #[error("deregister requires a handler or a handler id, got {0}")]
    InvalidSelector(String),

    /// Emitting Event:
    /// - A handler returned an error. It is passed through unchanged.
    #[error("handler {handler_id} failed: {source}")]
    Handler {
        /// Id of the failing handler record.
        handler_id: HandlerId,
        /// The error the handler returned.
        #[source]
        source: BoxError,
    },
}

impl EventError {
    /// Returns a short stable label for use in logs.
    ///
    /// # Example
    /// ```
    /// use rs_events_manager::EventError;
    ///
    /// let err = EventError::InvalidSelector("\"abc\"".to_string());
    /// assert_eq!(err.as_label(), "invalid_selector");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EventError::UnknownEvent { .. } => "unknown_event",
            EventError::InvalidSelector(_) => "invalid_selector",
            EventError::Handler { .. } => "handler_failed",
        }
    }
}

impl PartialEq for EventError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                EventError::UnknownEvent { event: a, manager: m1 },
                EventError::UnknownEvent { event: b, manager: m2 },
            ) => a == b && m1 == m2,
            (EventError::InvalidSelector(a), EventError::InvalidSelector(b)) => a == b,
            (
                EventError::Handler { handler_id: a, source: e1 },
                EventError::Handler { handler_id: b, source: e2 },
            ) => a == b && e1.to_string() == e2.to_string(),
            _ => false,
        }
    }
}
impl Eq for EventError {}
