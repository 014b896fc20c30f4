use std::collections::HashMap;
use std::sync::Arc;

use crate::arguments::Arguments;
use crate::constants::{Callback, HandlerId};
use crate::error::EventError;
use crate::record::{HandlerRecord, Selector};

/// Defines the contract for registries that map event keys to handler records and dispatch them.
///
/// # Type Parameters
/// * `K`: The event key type. Any value with equality and hashing; see [`Identity`](crate::Identity) for object identity.
/// * `V`: The argument value type.
///
/// # Thread Safety
/// All implementors must be `Send + Sync`; every method takes `&self`.
pub trait EventRegistry<K, V>: Send + Sync {
    /// Gets the keys of events that currently have one or more handler records.
    fn list_events(&self) -> Vec<K>;

    /// Registers `handler` under `event` with captured default arguments.
    ///
    /// The record gets the smallest handler id not in use by another record of `event`
    /// and is appended after the existing records.
    ///
    /// # Returns
    /// The allocated handler id.
    fn register(&self, event: K, handler: Callback<V>, defaults: Arguments<V>) -> HandlerId;

    /// Removes the records of `event` that match `selector` and `narrowing`.
    ///
    /// `narrowing` only restricts the halves it carries: non-empty positional
    /// arguments must equal a record's default positional arguments exactly, and
    /// non-empty named arguments must equal its default named arguments exactly.
    /// Survivors keep their order. An event left with no records is dropped.
    ///
    /// # Returns
    /// * `Ok(Vec<Arc<HandlerRecord<V>>>)` with the removed records, possibly none.
    /// * `Err(EventError::UnknownEvent)` if `event` has no records.
    fn deregister(
        &self,
        event: &K,
        selector: Selector<V>,
        narrowing: Arguments<V>,
    ) -> Result<Vec<Arc<HandlerRecord<V>>>, EventError>;

    /// Synchronously invokes every record of `event` in registration order.
    ///
    /// Each record is called with its defaults resolved against `overrides`
    /// (see [`Arguments::resolve`]). Emitting an event with no records does nothing.
    ///
    /// # Returns
    /// * `Ok(())` once every handler returned successfully.
    /// * `Err(EventError::Handler)` with the first failure; later handlers are not called.
    fn emit(&self, event: &K, overrides: Arguments<V>) -> Result<(), EventError>;

    /// Gets the records of `event`, or `None` if it has none.
    fn get_handlers(&self, event: &K) -> Option<Vec<Arc<HandlerRecord<V>>>>;

    /// Gets every event with its records.
    fn all_handlers(&self) -> HashMap<K, Vec<Arc<HandlerRecord<V>>>>;

    /// Gets the number of records registered under `event`; zero for unknown events.
    fn handler_count(&self, event: &K) -> usize {
        self.get_handlers(event).map_or(0, |records| records.len())
    }

    /// Returns `true` if `event` has any records.
    fn has_event(&self, event: &K) -> bool {
        self.handler_count(event) > 0
    }
}
