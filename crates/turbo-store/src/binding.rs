//! Environment-aware binding between an external store and a renderer.
//!
//! A renderer reads a store through three hooks: `subscribe`, a client
//! snapshot getter and a server snapshot getter. On the client the binding
//! subscribes and re-reads on every notification. During a server render it
//! never subscribes, and the server snapshot getter it hands out is created
//! once per binding: renderers compare that getter by identity, and a fresh
//! closure on every call reads as a perpetual external change.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::environment::Environment;
use crate::observer::{listener, Listener};
use crate::selector::{ShallowEq, ShallowSelector};

/// A source of snapshots with change notification.
pub trait ExternalStore {
    /// Value handed to renderers.
    type Snapshot;

    /// Register a change listener.
    fn subscribe(&self, listener: Listener);

    /// Remove a change listener. Unknown listeners are ignored.
    fn unsubscribe(&self, listener: &Listener);

    /// Current value. Must return the same `Rc` until the next notification.
    fn snapshot(&self) -> Rc<Self::Snapshot>;
}

/// Identity-stable server snapshot getter.
pub type SnapshotFn<R> = Rc<dyn Fn() -> Rc<R>>;

type Projection<T, R> = Rc<dyn Fn(Rc<T>) -> Rc<R>>;

/// Handle returned by [`SyncExternalStore::subscribe`].
#[must_use = "dropping a Subscription keeps the listener registered"]
pub struct Subscription {
    cancel: Box<dyn FnOnce()>,
}

impl Subscription {
    /// Remove the listener from the source.
    pub fn unsubscribe(self) {
        (self.cancel)();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

/// Binds an [`ExternalStore`] to a renderer, optionally through a
/// [`ShallowSelector`].
///
/// Client and server reads go through the same projection, so both produce
/// the same value with the same reference stability.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use turbo_store::{Environment, Store, SyncExternalStore};
///
/// let store = Store::shared(vec![1, 2, 3], |items: &Vec<i32>, n: i32| {
///     let mut next = items.clone();
///     next.push(n);
///     next
/// });
///
/// let binding = SyncExternalStore::with_selector(store.clone(), Environment::Server, |items: &Vec<i32>| {
///     items.len()
/// });
///
/// let getter = binding.server_snapshot();
/// assert!(Rc::ptr_eq(&getter, &binding.server_snapshot()));
/// assert_eq!(*getter(), 3);
///
/// store.dispatch(4);
/// assert_eq!(*getter(), 4);
/// ```
pub struct SyncExternalStore<Src, R = <Src as ExternalStore>::Snapshot>
where
    Src: ExternalStore,
{
    source: Rc<Src>,
    environment: Environment,
    project: Projection<Src::Snapshot, R>,
    server_snapshot: OnceCell<SnapshotFn<R>>,
}

impl<Src> SyncExternalStore<Src>
where
    Src: ExternalStore + 'static,
    Src::Snapshot: 'static,
{
    /// Bind the source's snapshot as is.
    pub fn new(source: Rc<Src>, environment: Environment) -> Self {
        Self {
            source,
            environment,
            project: Rc::new(|snapshot: Rc<Src::Snapshot>| snapshot),
            server_snapshot: OnceCell::new(),
        }
    }
}

impl<Src, R> SyncExternalStore<Src, R>
where
    Src: ExternalStore + 'static,
    Src::Snapshot: 'static,
    R: ShallowEq + 'static,
{
    /// Bind a projection of the source's snapshot.
    pub fn with_selector(
        source: Rc<Src>,
        environment: Environment,
        selector: impl Fn(&Src::Snapshot) -> R + 'static,
    ) -> Self {
        let memo = ShallowSelector::new(move |snapshot: &Rc<Src::Snapshot>| selector(snapshot));
        Self {
            source,
            environment,
            project: Rc::new(move |snapshot: Rc<Src::Snapshot>| memo.select(&snapshot)),
            server_snapshot: OnceCell::new(),
        }
    }
}

impl<Src, R> SyncExternalStore<Src, R>
where
    Src: ExternalStore + 'static,
    Src::Snapshot: 'static,
    R: 'static,
{
    /// Environment this binding was created for.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The bound source.
    pub fn source(&self) -> &Rc<Src> {
        &self.source
    }

    /// Register `on_change` with the source.
    ///
    /// Returns `None` on a server: a render pass happens once and nothing
    /// would ever be notified.
    pub fn subscribe(&self, on_change: Listener) -> Option<Subscription> {
        if self.environment.is_server() {
            debug!("skipping store subscription during server render");
            return None;
        }

        self.source.subscribe(Rc::clone(&on_change));
        let source = Rc::clone(&self.source);
        Some(Subscription {
            cancel: Box::new(move || source.unsubscribe(&on_change)),
        })
    }

    /// Subscribe and hand the freshly read snapshot to `on_value` once per
    /// notification.
    pub fn watch(&self, on_value: impl Fn(Rc<R>) + 'static) -> Option<Subscription> {
        let source = Rc::clone(&self.source);
        let project = Rc::clone(&self.project);
        self.subscribe(listener(move || on_value(project(source.snapshot()))))
    }

    /// Read the current value the client way.
    pub fn client_snapshot(&self) -> Rc<R> {
        (self.project)(self.source.snapshot())
    }

    /// The server snapshot getter.
    ///
    /// Created on first call and returned by reference afterwards; each call
    /// of the getter still reads the live state.
    pub fn server_snapshot(&self) -> SnapshotFn<R> {
        let getter = self.server_snapshot.get_or_init(|| {
            let source = Rc::clone(&self.source);
            let project = Rc::clone(&self.project);
            let getter: SnapshotFn<R> = Rc::new(move || project(source.snapshot()));
            getter
        });
        Rc::clone(getter)
    }

    /// Read the current value through the getter that matches the
    /// environment.
    pub fn read(&self) -> Rc<R> {
        match self.environment {
            Environment::Client => self.client_snapshot(),
            Environment::Server => (self.server_snapshot())(),
        }
    }
}

impl<Src, R> fmt::Debug for SyncExternalStore<Src, R>
where
    Src: ExternalStore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncExternalStore")
            .field("environment", &self.environment)
            .field("server_snapshot_created", &self.server_snapshot.get().is_some())
            .finish()
    }
}
