/// Default display name of a manager.
pub const DEFAULT_NAME: &str = "Events Manager";

/// Construction-time settings of an [`EventsManager`](crate::EventsManager).
///
/// # Example
/// ```
/// use rs_events_manager::Settings;
///
/// let settings = Settings::default().name("Main Events Manager").thread_safe(true);
/// assert_eq!(settings.display_name(), "Main Events Manager");
/// assert!(settings.is_thread_safe());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    name: String,
    thread_safe: bool,
}

impl Settings {
    /// Sets the display name used in logs, errors and `Display`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Serializes register and deregister behind one registry-wide lock.
    pub fn thread_safe(mut self, thread_safe: bool) -> Self {
        self.thread_safe = thread_safe;
        self
    }

    /// The configured display name.
    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Whether the registry-wide lock is enabled.
    pub fn is_thread_safe(&self) -> bool {
        self.thread_safe
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            thread_safe: false,
        }
    }
}
