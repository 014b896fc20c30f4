use std::sync::{Arc, Mutex};

use super::{labelled, recorder, taken};
use crate::{Arguments, EventRegistry, EventsManager, Identity, Invocation, Selector, Value};

/// An event object with a type name, compared by identity only
#[derive(Debug)]
struct Event {
    kind: &'static str,
}

#[test]
fn identity_keys_are_distinct_objects() {
    let events: EventsManager<Identity<Event>> = EventsManager::default();
    let first = Identity::new(Event { kind: "input event" });
    let second = Identity::new(Event { kind: "input event" });
    let log = Arc::new(Mutex::new(Vec::new()));

    events.register(first.clone(), labelled("first", &log), Arguments::new());
    events.register(second.clone(), labelled("second", &log), Arguments::new());
    assert_eq!(events.list_events().len(), 2);

    events.emit(&first, Arguments::new()).unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["first"]);
    assert_eq!(first.kind, "input event");

    events.deregister(&first, Selector::Any, Arguments::new()).unwrap();
    events.deregister(&second, Selector::Any, Arguments::new()).unwrap();
    assert!(events.list_events().is_empty());
}

#[test]
fn identity_from_shared_arc() {
    let shared = Arc::new(Event { kind: "shared" });
    let a = Identity::from_arc(Arc::clone(&shared));
    let b = Identity::from_arc(shared);
    assert_eq!(a, b);
    assert!(Arc::ptr_eq(a.as_arc(), b.as_arc()));
}

#[test]
fn integer_and_boolean_keys() {
    let numbers: EventsManager<i64> = EventsManager::default();
    let (cb, calls) = recorder();
    numbers.register(7, cb.clone(), Arguments::new().arg(7));
    numbers.emit(&7, Arguments::new()).unwrap();
    numbers.emit(&8, Arguments::new()).unwrap();
    assert_eq!(taken(&calls), vec![Invocation::Positional(vec![Value::from(7)])]);

    let flags: EventsManager<bool> = EventsManager::default();
    flags.register(true, cb.clone(), Arguments::new());
    flags.register(false, cb, Arguments::new());
    flags.emit(&true, Arguments::new()).unwrap();
    assert_eq!(taken(&calls).len(), 1);
    assert_eq!(flags.handler_count(&false), 1);
}

/// Registries are generic over the argument type too
#[test]
fn typed_argument_values() {
    #[derive(Debug, Clone, PartialEq)]
    enum Reading {
        Celsius(i32),
    }

    let events: EventsManager<String, Reading> = EventsManager::default();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    events.register(
        "temperature".to_string(),
        crate::handler(move |call: &Invocation<Reading>| {
            sink.lock().unwrap().extend(call.args().iter().cloned());
            Ok(())
        }),
        Arguments::new().arg(Reading::Celsius(20)),
    );

    events.emit(&"temperature".to_string(), Arguments::new()).unwrap();
    events
        .emit(&"temperature".to_string(), Arguments::new().arg(Reading::Celsius(31)))
        .unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![Reading::Celsius(20), Reading::Celsius(31)]);

    events
        .deregister(
            &"temperature".to_string(),
            Selector::Any,
            Arguments::new().arg(Reading::Celsius(20)),
        )
        .unwrap();
    assert!(!events.has_event(&"temperature".to_string()));
}
