use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, trace};

use crate::arguments::Arguments;
use crate::config::Settings;
use crate::constants::{Callback, HandlerId};
use crate::error::EventError;
use crate::record::{HandlerRecord, Selector};
use crate::registry::EventRegistry;
use crate::value::Value;

type Records<V> = Vec<Arc<HandlerRecord<V>>>;

/// A registry of handler records keyed by event, implementing [`EventRegistry`].
///
/// # Type Parameters
/// * `K` - The event key type, `String` by default.
/// * `V` - The argument value type, [`Value`] by default.
///
/// # Implementation Notes
/// - Uses `DashMap` for concurrent event storage; each event maps to its records in registration order.
/// - An event present in the map always has at least one record.
/// - Clones share the same registry, so one instance can be handed to several owners or threads.
/// - With `thread_safe` enabled, `register` and `deregister` are serialized by one registry-wide lock.
///   `emit` never takes that lock and releases the map before invoking handlers, so handlers may
///   register, deregister or emit re-entrantly. Changes made during a dispatch apply from the next emit.
pub struct EventsManager<K = String, V = Value> {
    settings: Settings,
    /// The concurrent map of event keys to their handler records.
    events: Arc<DashMap<K, Records<V>>>,
    /// Registry-wide lock for register/deregister, present only in thread-safe mode.
    exclusive: Option<Arc<Mutex<()>>>,
}

impl<K: Eq + Hash, V> EventsManager<K, V> {
    /// Creates a new `EventsManager` with a display name and thread-safety mode.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_events_manager::EventsManager;
    ///
    /// let events: EventsManager = EventsManager::new("Main Events Manager", true);
    /// assert_eq!(events.name(), "Main Events Manager");
    /// assert!(events.is_thread_safe());
    /// ```
    pub fn new(name: impl Into<String>, thread_safe: bool) -> Self {
        Self::with_settings(Settings::default().name(name).thread_safe(thread_safe))
    }

    /// Creates a new `EventsManager` from prepared [`Settings`].
    ///
    /// # Example
    ///
    /// ```
    /// use rs_events_manager::{EventsManager, Settings};
    ///
    /// let events: EventsManager = EventsManager::with_settings(Settings::default().thread_safe(true));
    /// assert_eq!(events.settings(), &Settings::default().thread_safe(true));
    /// ```
    pub fn with_settings(settings: Settings) -> Self {
        let exclusive = settings
            .is_thread_safe()
            .then(|| Arc::new(Mutex::new(())));
        Self {
            settings,
            events: Arc::new(DashMap::new()),
            exclusive,
        }
    }
}

impl<K, V> EventsManager<K, V> {
    /// Display name used in logs, errors and `Display`.
    pub fn name(&self) -> &str {
        self.settings.display_name()
    }

    /// Whether register and deregister are serialized by the registry-wide lock.
    pub fn is_thread_safe(&self) -> bool {
        self.settings.is_thread_safe()
    }

    /// The settings this manager was constructed with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn lock_exclusive(&self) -> Option<MutexGuard<'_, ()>> {
        self.exclusive.as_ref().map(|lock| lock.lock())
    }
}

impl<K, V> EventsManager<K, V>
where
    K: Eq + Hash + Debug,
{
    fn unknown_event(&self, event: &K) -> EventError {
        EventError::UnknownEvent {
            event: format!("{event:?}"),
            manager: self.name().to_string(),
        }
    }
}

/// Smallest handler id not taken by any of `records`.
fn next_free_id<V>(records: &[Arc<HandlerRecord<V>>]) -> HandlerId {
    let mut taken: Vec<HandlerId> = records.iter().map(|record| record.handler_id()).collect();
    taken.sort_unstable();

    let mut candidate = 0;
    for id in taken {
        if id == candidate {
            candidate += 1;
        } else if id > candidate {
            break;
        }
    }
    candidate
}

impl<K, V> EventRegistry<K, V> for EventsManager<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: PartialEq + Clone + Send + Sync + 'static,
{
    /// Returns the keys of all events that currently have records, in no particular order.
    ///
    /// # Example
    /// ```
    /// use rs_events_manager::{handler, Arguments, EventRegistry, EventsManager};
    ///
    /// let events: EventsManager = EventsManager::default();
    /// events.register("event_one".to_string(), handler(|_| Ok(())), Arguments::new());
    /// events.register("event_two".to_string(), handler(|_| Ok(())), Arguments::new());
    ///
    /// let names = events.list_events();
    /// assert_eq!(names.len(), 2);
    /// assert!(names.contains(&"event_one".to_string()));
    /// ```
    fn list_events(&self) -> Vec<K> {
        self.events
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// # Example
    /// ```
    /// use rs_events_manager::{handler, Arguments, EventRegistry, EventsManager};
    ///
    /// let events: EventsManager<&str> = EventsManager::default();
    /// let cb = handler(|_| Ok(()));
    /// assert_eq!(events.register("k", cb.clone(), Arguments::new()), 0);
    /// assert_eq!(events.register("k", cb.clone(), Arguments::new()), 1);
    /// assert_eq!(events.register("other", cb, Arguments::new()), 0);
    /// ```
    fn register(&self, event: K, handler: Callback<V>, defaults: Arguments<V>) -> HandlerId {
        let _exclusive = self.lock_exclusive();

        let mut records = self.events.entry(event).or_default();
        let handler_id = next_free_id(records.as_slice());
        records.push(Arc::new(HandlerRecord::new(handler, handler_id, defaults)));

        debug!(
            manager = self.name(),
            event = ?records.key(),
            handler_id,
            "registered handler"
        );
        handler_id
    }

    /// # Example
    /// ```
    /// use rs_events_manager::{handler, Arguments, EventRegistry, EventsManager, Selector};
    ///
    /// let events: EventsManager<&str> = EventsManager::default();
    /// let cb = handler(|_| Ok(()));
    /// events.register("k", cb.clone(), Arguments::new().arg("A"));
    /// events.register("k", cb.clone(), Arguments::new().arg("B"));
    ///
    /// let removed = events.deregister(&"k", Selector::from(&cb), Arguments::new().arg("A")).unwrap();
    /// assert_eq!(removed.len(), 1);
    /// assert_eq!(events.handler_count(&"k"), 1);
    ///
    /// events.deregister(&"k", Selector::Any, Arguments::new()).unwrap();
    /// assert!(events.list_events().is_empty());
    /// assert!(events.deregister(&"k", Selector::Any, Arguments::new()).is_err());
    /// ```
    fn deregister(
        &self,
        event: &K,
        selector: Selector<V>,
        narrowing: Arguments<V>,
    ) -> Result<Vec<Arc<HandlerRecord<V>>>, EventError> {
        let _exclusive = self.lock_exclusive();

        let Entry::Occupied(mut records) = self.events.entry(event.clone()) else {
            return Err(self.unknown_event(event));
        };

        // Partition and removal share one shard guard, so no reader sees an empty list.
        let (removed, kept): (Records<V>, Records<V>) = records
            .get_mut()
            .drain(..)
            .partition(|record| record.matches(&selector, &narrowing));
        if kept.is_empty() {
            records.remove();
        } else {
            *records.get_mut() = kept;
        }

        debug!(
            manager = self.name(),
            event = ?event,
            selector = ?selector,
            removed = removed.len(),
            "deregistered handlers"
        );
        Ok(removed)
    }

    /// # Example
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use rs_events_manager::{handler, Arguments, EventRegistry, EventsManager, Value};
    ///
    /// let events: EventsManager<&str> = EventsManager::default();
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    /// events.register("k", handler(move |call| {
    ///     sink.lock().unwrap().push(call.args().to_vec());
    ///     Ok(())
    /// }), Arguments::new().arg("A"));
    ///
    /// events.emit(&"k", Arguments::new()).unwrap();
    /// events.emit(&"k", Arguments::new().arg("B")).unwrap();
    /// events.emit(&"missing", Arguments::new()).unwrap();
    /// assert_eq!(*seen.lock().unwrap(), vec![vec![Value::from("A")], vec![Value::from("B")]]);
    /// ```
    fn emit(&self, event: &K, overrides: Arguments<V>) -> Result<(), EventError> {
        let Some(records) = self.get_handlers(event) else {
            return Ok(());
        };

        for record in &records {
            trace!(
                manager = self.name(),
                event = ?event,
                handler_id = record.handler_id(),
                "dispatching"
            );
            record
                .dispatch(&overrides)
                .map_err(|source| EventError::Handler {
                    handler_id: record.handler_id(),
                    source,
                })?;
        }
        Ok(())
    }

    fn get_handlers(&self, event: &K) -> Option<Vec<Arc<HandlerRecord<V>>>> {
        self.events.get(event).map(|entry| entry.value().clone())
    }

    fn all_handlers(&self) -> HashMap<K, Vec<Arc<HandlerRecord<V>>>> {
        self.events
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl<K: Eq + Hash, V> Default for EventsManager<K, V> {
    /// Creates a new `EventsManager` named "Events Manager" without thread-safe mode.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_events_manager::EventsManager;
    ///
    /// let events: EventsManager = EventsManager::default();
    /// assert_eq!(events.name(), "Events Manager");
    /// assert!(!events.is_thread_safe());
    /// ```
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl<K, V> Clone for EventsManager<K, V> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            events: Arc::clone(&self.events),
            exclusive: self.exclusive.as_ref().map(Arc::clone),
        }
    }
}

impl<K: Eq + Hash, V> Debug for EventsManager<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsManager")
            .field("name", &self.name())
            .field("thread_safe", &self.is_thread_safe())
            .field("events", &self.events.len())
            .finish()
    }
}

/// Lists each event with its number of records:
///
/// ```text
/// Main Events Manager:
///     "received input": 1
/// ```
impl<K: Eq + Hash + Display, V> Display for EventsManager<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.name())?;
        for (i, entry) in self.events.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " \n    \"{}\": {}", entry.key(), entry.value().len())?;
        }
        writeln!(f)
    }
}
