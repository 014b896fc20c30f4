use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// An event key that is equal only to clones of itself.
///
/// Wraps an `Arc<T>` and compares/hashes by pointer, so two separately created
/// objects are always different events even if their contents are equal.
///
/// # Example
/// ```
/// use rs_events_manager::Identity;
///
/// let a = Identity::new("input event");
/// let b = Identity::new("input event");
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
pub struct Identity<T: ?Sized>(Arc<T>);

impl<T> Identity<T> {
    /// Moves `value` into a fresh allocation; only clones of the result are equal to it.
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl<T: ?Sized> Identity<T> {
    /// Wraps an existing shared reference; clones of `arc` map to the same event.
    pub fn from_arc(arc: Arc<T>) -> Self {
        Self(arc)
    }

    /// The shared reference the key is compared by.
    pub fn as_arc(&self) -> &Arc<T> {
        &self.0
    }
}

impl<T: ?Sized> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl<T: ?Sized> Eq for Identity<T> {}

impl<T: ?Sized> Hash for Identity<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Metadata is dropped so fat pointers hash like their data address.
        (Arc::as_ptr(&self.0) as *const () as usize).hash(state);
    }
}

impl<T: ?Sized> Deref for Identity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + Debug> Debug for Identity<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({:?} @ {:p})", &*self.0, Arc::as_ptr(&self.0) as *const ())
    }
}

impl<T: ?Sized + std::fmt::Display> std::fmt::Display for Identity<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&*self.0, f)
    }
}
