//! Example: registering, emitting and deregistering handlers
use rs_events_manager::{
    handler, Arguments, EventRegistry, EventsManager, Identity, Invocation, Selector, Value,
};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let events: EventsManager = EventsManager::new("Main Events Manager", false);
    let received = "received input".to_string();

    let input = handler(|call: &Invocation<Value>| {
        let text = call.get(0, "text_input").ok_or("missing text_input")?;
        let optional = call
            .kwarg("optional")
            .cloned()
            .unwrap_or_else(|| Value::from("handler"));
        println!("Got input {text}! Optional argument from {optional}.");
        Ok(())
    });

    // No defaults: the emitter supplies the argument
    events.register(received.clone(), input.clone(), Arguments::new());
    events.emit(&received, Arguments::new().arg("from event emitter"))?;

    // Defaults captured at registration, then replaced at emission
    events.deregister(&received, Selector::Any, Arguments::new())?;
    events.register(received.clone(), input.clone(), Arguments::new().arg("from event registration"));
    events.emit(&received, Arguments::new())?;
    events.emit(&received, Arguments::new().arg("from event emitter"))?;

    // Removing by handler leaves nothing to call
    events.deregister(&received, Selector::from(&input), Arguments::new())?;
    events.emit(&received, Arguments::new())?;
    println!("No Output!");

    // Named overrides merge into each handler's defaults
    events.register(received.clone(), input.clone(), Arguments::new().arg("from event registration"));
    events.register(received.clone(), input.clone(), Arguments::new().arg("from event registration2"));
    events.emit(&received, Arguments::new().kwarg("optional", "emitter"))?;

    // Narrow a removal by the captured defaults
    events.deregister(
        &received,
        Selector::from(&input),
        Arguments::new().arg("from event registration"),
    )?;
    events.register(
        received.clone(),
        input.clone(),
        Arguments::new()
            .arg("from event registration")
            .kwarg("optional", "registration"),
    );
    events.emit(&received, Arguments::new())?;

    // Events keyed by object identity
    let objects: EventsManager<Identity<&str>> = EventsManager::new("Object Events Manager", false);
    let event1 = Identity::new("input event");
    let event2 = Identity::new("input event");
    objects.register(event1.clone(), input.clone(), Arguments::new().arg("from event1 registration"));
    objects.register(event2.clone(), input.clone(), Arguments::new().arg("from event2 registration"));
    objects.emit(&event1, Arguments::new())?;
    objects.emit(&event2, Arguments::new())?;
    objects.deregister(&event1, Selector::Any, Arguments::new())?;
    objects.deregister(&event2, Selector::Any, Arguments::new())?;

    println!("{:?}", events.list_events());
    for record in events.get_handlers(&received).unwrap_or_default() {
        println!("{record:?}");
    }

    events.deregister(&received, Selector::Id(0), Arguments::new())?;
    print!("{events}");
    Ok(())
}
