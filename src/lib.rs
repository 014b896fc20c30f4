//! # Rust Events Manager
//!
//! An in-process publish/subscribe registry. Handlers are registered against
//! arbitrary event keys together with default arguments, and emitting a key
//! synchronously invokes every handler registered for it.
//!
//! - **HandlerRecord**: a registered handler with its per-event id and captured defaults.
//! - **EventsManager**: owns the registry and implements registration, removal and emission.
//! - **EventRegistry**: trait defining the registry API.
//! - **Arguments / Invocation**: default, narrowing and override arguments, and what a handler receives.
//!
//! ```
//! use rs_events_manager::{handler, Arguments, EventRegistry, EventsManager, Value};
//!
//! let events: EventsManager = EventsManager::default();
//! events.register(
//!     "received input".to_string(),
//!     handler(|call| {
//!         assert_eq!(call.args(), &[Value::from("from registration")]);
//!         Ok(())
//!     }),
//!     Arguments::new().arg("from registration"),
//! );
//! events.emit(&"received input".to_string(), Arguments::new()).unwrap();
//! ```

mod arguments;
mod config;
mod constants;
mod error;
mod events_manager;
mod key;
mod record;
mod registry;
mod value;

pub use arguments::{Arguments, Invocation};
pub use config::Settings;
pub use constants::{BoxError, Callback, HandlerId, HandlerResult, Kwargs};
pub use error::EventError;
pub use events_manager::EventsManager;
pub use key::Identity;
pub use record::{handler, HandlerRecord, Selector};
pub use registry::EventRegistry;
pub use value::Value;

#[cfg(test)]
mod tests;
