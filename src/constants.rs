use std::collections::BTreeMap;
use std::sync::Arc;

use crate::arguments::Invocation;

/// Type alias for the error a handler may fail with.
///
/// Any `std::error::Error + Send + Sync` can be boxed into it with `?` or `.into()`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for the outcome of a single handler invocation.
pub type HandlerResult = Result<(), BoxError>;

/// Identifier of a handler record, unique among the records of one event key.
pub type HandlerId = usize;

/// Named arguments. Keys are unique and their order carries no meaning.
pub type Kwargs<V> = BTreeMap<String, V>;

/// Type alias for a handler pointer.
///
/// - Requires `Send + Sync` so a registry can be shared across threads.
/// - Two callbacks are the same handler iff they are the same `Arc` allocation.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use rs_events_manager::{Callback, Invocation, Value};
///
/// let callback: Callback<Value> = Arc::new(|call: &Invocation<Value>| {
///     println!("Received call: {:?}", call);
///     Ok(())
/// });
/// ```
pub type Callback<V> = Arc<dyn Fn(&Invocation<V>) -> HandlerResult + Send + Sync>;
