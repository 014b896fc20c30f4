use std::sync::{Arc, Mutex};

use crate::{handler, Callback, Invocation, Value};

mod keys;
mod threaded;

/// Calls seen by a recording handler, in order.
pub(crate) type Calls = Arc<Mutex<Vec<Invocation<Value>>>>;

/// A handler that records every invocation it receives.
pub(crate) fn recorder() -> (Callback<Value>, Calls) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let cb = handler(move |call: &Invocation<Value>| {
        sink.lock().unwrap().push(call.clone());
        Ok(())
    });
    (cb, calls)
}

/// A handler that records its calls under a shared log with a label.
pub(crate) fn labelled(label: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Callback<Value> {
    let log = Arc::clone(log);
    handler(move |_: &Invocation<Value>| {
        log.lock().unwrap().push(label);
        Ok(())
    })
}

pub(crate) fn taken(calls: &Calls) -> Vec<Invocation<Value>> {
    calls.lock().unwrap().drain(..).collect()
}
