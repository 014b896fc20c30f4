use crate::constants::Kwargs;

/// A bundle of positional and named arguments.
///
/// The same shape serves three purposes:
/// - defaults captured by [`register`](crate::EventRegistry::register),
/// - narrowing criteria for [`deregister`](crate::EventRegistry::deregister),
/// - overrides supplied to [`emit`](crate::EventRegistry::emit).
///
/// # Example
/// ```
/// use rs_events_manager::{Arguments, Value};
///
/// let args: Arguments<Value> = Arguments::new().arg("input").kwarg("optional", "handler");
/// assert_eq!(args.args(), &[Value::from("input")]);
/// assert_eq!(args.kwargs().get("optional"), Some(&Value::from("handler")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments<V> {
    args: Vec<V>,
    kwargs: Kwargs<V>,
}

impl<V> Arguments<V> {
    /// An empty bundle: no positional and no named arguments.
    pub fn new() -> Self {
        Self { args: Vec::new(), kwargs: Kwargs::new() }
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<V>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Sets a named argument, replacing an earlier value under the same name.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<V>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// Positional arguments, in order.
    pub fn args(&self) -> &[V] {
        &self.args
    }

    /// Named arguments.
    pub fn kwargs(&self) -> &Kwargs<V> {
        &self.kwargs
    }

    /// `true` when there are neither positional nor named arguments.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }

    /// Splits into positional and named arguments.
    pub fn into_parts(self) -> (Vec<V>, Kwargs<V>) {
        (self.args, self.kwargs)
    }
}

impl<V: Clone> Arguments<V> {
    /// Resolves what a handler registered with `self` as defaults receives when
    /// its event is emitted with `overrides`.
    ///
    /// Replace-positional, merge-named:
    /// - non-empty positional overrides replace the default positional list as a whole;
    /// - named overrides are laid over the named defaults one name at a time.
    ///
    /// # Example
    /// ```
    /// use rs_events_manager::{Arguments, Invocation, Value};
    ///
    /// let defaults: Arguments<Value> = Arguments::new().arg("a").arg("b").kwarg("x", 1).kwarg("y", 1);
    /// let overrides: Arguments<Value> = Arguments::new().arg("c").kwarg("y", 2);
    ///
    /// let call = defaults.resolve(&overrides);
    /// assert_eq!(call.args(), &[Value::from("c")]);
    /// assert_eq!(call.kwarg("x"), Some(&Value::from(1)));
    /// assert_eq!(call.kwarg("y"), Some(&Value::from(2)));
    /// ```
    pub fn resolve(&self, overrides: &Arguments<V>) -> Invocation<V> {
        let args = if overrides.args.is_empty() {
            self.args.clone()
        } else {
            overrides.args.clone()
        };

        let mut kwargs = self.kwargs.clone();
        kwargs.extend(overrides.kwargs.iter().map(|(k, v)| (k.clone(), v.clone())));

        Invocation::from_parts(args, kwargs)
    }
}

impl<V: PartialEq> Arguments<V> {
    /// Whether captured `defaults` satisfy `self` used as deregistration narrowing.
    ///
    /// Each non-empty half of `self` must equal the same half of `defaults` exactly;
    /// an empty half does not narrow.
    pub fn narrows(&self, defaults: &Arguments<V>) -> bool {
        (self.args.is_empty() || self.args == defaults.args)
            && (self.kwargs.is_empty() || self.kwargs == defaults.kwargs)
    }
}

impl<V> Default for Arguments<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<Vec<V>> for Arguments<V> {
    fn from(args: Vec<V>) -> Self {
        Self { args, kwargs: Kwargs::new() }
    }
}

impl<V> From<Kwargs<V>> for Arguments<V> {
    fn from(kwargs: Kwargs<V>) -> Self {
        Self { args: Vec::new(), kwargs }
    }
}

/// The arguments a handler is actually called with, shaped by which halves are present.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation<V> {
    /// Zero-argument call.
    Bare,
    Positional(Vec<V>),
    Named(Kwargs<V>),
    Mixed(Vec<V>, Kwargs<V>),
}

impl<V> Invocation<V> {
    /// Picks the call shape from which halves are non-empty.
    ///
    /// # Example
    /// ```
    /// use rs_events_manager::{Invocation, Kwargs, Value};
    ///
    /// let call: Invocation<Value> = Invocation::from_parts(vec![Value::from("A")], Kwargs::new());
    /// assert_eq!(call, Invocation::Positional(vec![Value::from("A")]));
    /// assert_eq!(Invocation::<Value>::from_parts(vec![], Kwargs::new()), Invocation::Bare);
    /// ```
    pub fn from_parts(args: Vec<V>, kwargs: Kwargs<V>) -> Self {
        match (args.is_empty(), kwargs.is_empty()) {
            (true, true) => Invocation::Bare,
            (false, true) => Invocation::Positional(args),
            (true, false) => Invocation::Named(kwargs),
            (false, false) => Invocation::Mixed(args, kwargs),
        }
    }

    /// Positional arguments; empty for `Bare` and `Named`.
    pub fn args(&self) -> &[V] {
        match self {
            Invocation::Positional(args) | Invocation::Mixed(args, _) => args,
            Invocation::Bare | Invocation::Named(_) => &[],
        }
    }

    /// Named arguments; `None` for `Bare` and `Positional`.
    pub fn kwargs(&self) -> Option<&Kwargs<V>> {
        match self {
            Invocation::Named(kwargs) | Invocation::Mixed(_, kwargs) => Some(kwargs),
            Invocation::Bare | Invocation::Positional(_) => None,
        }
    }

    /// Looks up a named argument.
    pub fn kwarg(&self, name: &str) -> Option<&V> {
        self.kwargs().and_then(|kwargs| kwargs.get(name))
    }

    /// Positional argument at `index`, falling back to the named argument `name`.
    pub fn get(&self, index: usize, name: &str) -> Option<&V> {
        self.args().get(index).or_else(|| self.kwarg(name))
    }
}
