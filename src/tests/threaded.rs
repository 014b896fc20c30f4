use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use futures::future::join_all;

use crate::{handler, Arguments, EventRegistry, EventsManager, Invocation, Selector, Value};

const THREADS: usize = 32;

fn distinct_ids(events: &EventsManager<&'static str>, event: &'static str) -> HashSet<usize> {
    events
        .get_handlers(&event)
        .unwrap_or_default()
        .iter()
        .map(|record| record.handler_id())
        .collect()
}

/// N threads registering once each yield N records with ids 0..N
#[test]
fn concurrent_registration_loses_nothing() {
    let events: EventsManager<&'static str> = EventsManager::new("threads", true);

    let workers: Vec<_> = (0..THREADS)
        .map(|i| {
            let events = events.clone();
            thread::spawn(move || {
                events.register(
                    "k",
                    handler(|_: &Invocation<Value>| Ok(())),
                    Arguments::new().arg(i as i64),
                )
            })
        })
        .collect();
    let returned: HashSet<usize> = workers.into_iter().map(|w| w.join().unwrap()).collect();

    assert_eq!(events.handler_count(&"k"), THREADS);
    assert_eq!(returned, (0..THREADS).collect::<HashSet<_>>());
    assert_eq!(distinct_ids(&events, "k"), (0..THREADS).collect::<HashSet<_>>());
}

/// Same guarantee with registrations driven from a Tokio blocking pool
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registration_from_tasks() {
    let events: EventsManager<&'static str> = EventsManager::new("tasks", true);

    let tasks = (0..THREADS).map(|_| {
        let events = events.clone();
        tokio::task::spawn_blocking(move || {
            events.register("k", handler(|_: &Invocation<Value>| Ok(())), Arguments::new())
        })
    });
    let ids: HashSet<usize> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    assert_eq!(ids.len(), THREADS);
    assert_eq!(distinct_ids(&events, "k"), (0..THREADS).collect::<HashSet<_>>());
}

/// Interleaved register/deregister never duplicates ids or strands an empty event
#[test]
fn interleaved_register_and_deregister() {
    let events: EventsManager<&'static str> = EventsManager::new("churn", true);

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let events = events.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let id = events.register(
                        "k",
                        handler(|_: &Invocation<Value>| Ok(())),
                        Arguments::new(),
                    );
                    assert!(events.handler_count(&"k") >= 1);
                    events.deregister(&"k", Selector::Id(id), Arguments::new()).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert!(events.list_events().is_empty());
    assert!(events.get_handlers(&"k").is_none());
}

/// Emitting from many threads at once calls every handler every time
#[test]
fn concurrent_emit() {
    let events: EventsManager<&'static str> = EventsManager::default();
    let hits = Arc::new(AtomicU64::new(0));
    for _ in 0..4 {
        let hits = Arc::clone(&hits);
        events.register(
            "k",
            handler(move |_: &Invocation<Value>| {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
            Arguments::new(),
        );
    }

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let events = events.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    events.emit(&"k", Arguments::new()).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(hits.load(Ordering::SeqCst), 4 * 8 * 25);
}

/// Readers never observe an event whose record list is empty
#[test]
fn readers_never_see_an_emptied_event() {
    for thread_safe in [true, false] {
        let events: EventsManager<&'static str> = EventsManager::new("readers", thread_safe);
        let done = Arc::new(AtomicBool::new(false));

        let reader = {
            let events = events.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut empty_seen = 0u64;
                while !done.load(Ordering::SeqCst) {
                    if events.get_handlers(&"k").is_some_and(|records| records.is_empty()) {
                        empty_seen += 1;
                    }
                    if events.all_handlers().values().any(|records| records.is_empty()) {
                        empty_seen += 1;
                    }
                }
                empty_seen
            })
        };

        for _ in 0..20_000 {
            let id = events.register("k", handler(|_: &Invocation<Value>| Ok(())), Arguments::new());
            events.deregister(&"k", Selector::Id(id), Arguments::new()).unwrap();
        }
        done.store(true, Ordering::SeqCst);

        assert_eq!(reader.join().unwrap(), 0);
        assert!(events.list_events().is_empty());
    }
}
