use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::arguments::{Arguments, Invocation};
use crate::constants::{Callback, HandlerId, HandlerResult, Kwargs};
use crate::error::EventError;
use crate::value::Value;

/// Wraps a closure into a [`Callback`].
///
/// Spelling the closure through this function lets its argument type be inferred.
///
/// # Example
/// ```
/// use rs_events_manager::{handler, Callback, Value};
///
/// let cb: Callback<Value> = handler(|call| {
///     println!("{:?}", call.args());
///     Ok(())
/// });
/// ```
pub fn handler<V, F>(f: F) -> Callback<V>
where
    F: Fn(&Invocation<V>) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A handler registered under one event key.
///
/// Records are immutable once created; registries share them as `Arc<HandlerRecord<V>>`.
///
/// # Example
/// ```
/// use rs_events_manager::{handler, Arguments, HandlerRecord, Value};
///
/// let record = HandlerRecord::new(handler(|_| Ok(())), 0, Arguments::<Value>::new().arg("A"));
/// assert_eq!(record.handler_id(), 0);
/// assert_eq!(record.default_args(), &[Value::from("A")]);
/// assert!(record.default_kwargs().is_empty());
/// ```
pub struct HandlerRecord<V> {
    handler: Callback<V>,
    handler_id: HandlerId,
    defaults: Arguments<V>,
}

impl<V> HandlerRecord<V> {
    /// Creates a record; registries pick `handler_id` as the smallest one free under the event.
    pub fn new(handler: Callback<V>, handler_id: HandlerId, defaults: Arguments<V>) -> Self {
        Self { handler, handler_id, defaults }
    }

    /// The registered callback.
    pub fn handler(&self) -> &Callback<V> {
        &self.handler
    }

    /// Id unique among the records of this record's event.
    pub fn handler_id(&self) -> HandlerId {
        self.handler_id
    }

    /// Positional defaults captured at registration.
    pub fn default_args(&self) -> &[V] {
        self.defaults.args()
    }

    /// Named defaults captured at registration.
    pub fn default_kwargs(&self) -> &Kwargs<V> {
        self.defaults.kwargs()
    }

    /// Defaults captured at registration.
    pub fn defaults(&self) -> &Arguments<V> {
        &self.defaults
    }

    /// Whether `callback` is the very handler of this record (same `Arc` allocation).
    pub fn is_handler(&self, callback: &Callback<V>) -> bool {
        Arc::ptr_eq(&self.handler, callback)
    }

    /// Synchronously invoke the handler with already resolved arguments.
    #[inline]
    pub fn call(&self, invocation: &Invocation<V>) -> HandlerResult {
        (self.handler)(invocation)
    }
}

impl<V: Clone> HandlerRecord<V> {
    /// Invoke the handler with this record's defaults resolved against `overrides`.
    ///
    /// # Example
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use rs_events_manager::{handler, Arguments, HandlerRecord, Value};
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    /// let record = HandlerRecord::new(
    ///     handler(move |call| {
    ///         sink.lock().unwrap().push(call.clone());
    ///         Ok(())
    ///     }),
    ///     0,
    ///     Arguments::<Value>::new().arg("A"),
    /// );
    ///
    /// record.dispatch(&Arguments::new().arg("B")).unwrap();
    /// assert_eq!(seen.lock().unwrap()[0].args(), &[Value::from("B")]);
    /// ```
    pub fn dispatch(&self, overrides: &Arguments<V>) -> HandlerResult {
        self.call(&self.defaults.resolve(overrides))
    }
}

impl<V: PartialEq> HandlerRecord<V> {
    /// Whether this record is picked by `selector` and, further, by `narrowing`.
    pub fn matches(&self, selector: &Selector<V>, narrowing: &Arguments<V>) -> bool {
        let selected = match selector {
            Selector::Any => true,
            Selector::Handler(callback) => self.is_handler(callback),
            Selector::Id(id) => self.handler_id == *id,
        };
        selected && narrowing.narrows(&self.defaults)
    }
}

impl<V> Debug for HandlerRecord<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRecord")
            .field("handler", &Arc::as_ptr(&self.handler))
            .field("handler_id", &self.handler_id)
            .field("default_args", &self.defaults.args())
            .field("default_kwargs", &self.defaults.kwargs())
            .finish()
    }
}

/// Picks the handler records of an event for removal.
pub enum Selector<V> {
    /// Every record of the event.
    Any,
    /// Records whose handler is this very callback.
    Handler(Callback<V>),
    /// The record with this handler id.
    Id(HandlerId),
}

impl<V> Clone for Selector<V> {
    fn clone(&self) -> Self {
        match self {
            Selector::Any => Selector::Any,
            Selector::Handler(callback) => Selector::Handler(Arc::clone(callback)),
            Selector::Id(id) => Selector::Id(*id),
        }
    }
}

impl<V> Debug for Selector<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Any => write!(f, "Any"),
            Selector::Handler(callback) => write!(f, "Handler({:p})", Arc::as_ptr(callback)),
            Selector::Id(id) => write!(f, "Id({id})"),
        }
    }
}

impl<V> From<HandlerId> for Selector<V> {
    fn from(id: HandlerId) -> Self {
        Selector::Id(id)
    }
}

impl<V> From<Callback<V>> for Selector<V> {
    fn from(callback: Callback<V>) -> Self {
        Selector::Handler(callback)
    }
}

impl<V> From<&Callback<V>> for Selector<V> {
    fn from(callback: &Callback<V>) -> Self {
        Selector::Handler(Arc::clone(callback))
    }
}

impl<V> TryFrom<Value> for Selector<V> {
    type Error = EventError;

    /// Converts a dynamic value: `Unit` selects every record, a non-negative
    /// `Int` selects by handler id, anything else is rejected.
    ///
    /// # Example
    /// ```
    /// use rs_events_manager::{EventError, Selector, Value};
    ///
    /// assert!(matches!(Selector::<Value>::try_from(Value::Unit), Ok(Selector::Any)));
    /// assert!(matches!(Selector::<Value>::try_from(Value::Int(3)), Ok(Selector::Id(3))));
    /// assert!(matches!(
    ///     Selector::<Value>::try_from(Value::from("oops")),
    ///     Err(EventError::InvalidSelector(_))
    /// ));
    /// ```
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Unit => Ok(Selector::Any),
            Value::Int(id) => HandlerId::try_from(id)
                .map(Selector::Id)
                .map_err(|_| EventError::InvalidSelector(format!("negative id {id}"))),
            other => Err(EventError::InvalidSelector(format!(
                "{} value {:?}",
                other.type_name(),
                other
            ))),
        }
    }
}
