//! Dispatch-driven state container.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::binding::ExternalStore;
use crate::observer::{Listener, Observer};

type Reducer<S, A> = Box<dyn Fn(&S, A) -> S>;

/// A single owned state value, replaced on every dispatch.
///
/// `get_state` hands out `Rc` clones of the current value. Between two
/// notifications it always returns the same allocation, so consumers may key
/// memoization on `Rc::ptr_eq`.
///
/// # Example
///
/// ```rust
/// use turbo_store::Store;
///
/// enum CounterAction {
///     Add(i64),
///     Reset,
/// }
///
/// let store = Store::new(0i64, |count: &i64, action: CounterAction| match action {
///     CounterAction::Add(n) => count + n,
///     CounterAction::Reset => 0,
/// });
///
/// store.dispatch(CounterAction::Add(2));
/// store.dispatch(CounterAction::Add(3));
/// assert_eq!(*store.get_state(), 5);
/// ```
pub struct Store<S, A> {
    state: RefCell<Rc<S>>,
    reducer: Reducer<S, A>,
    observer: Observer,
}

impl<S, A> Store<S, A> {
    /// Create a container from an initial value and a reducer.
    pub fn new(initial: S, reducer: impl Fn(&S, A) -> S + 'static) -> Self {
        Self {
            state: RefCell::new(Rc::new(initial)),
            reducer: Box::new(reducer),
            observer: Observer::new(),
        }
    }

    /// Create a container already wrapped for sharing with bindings.
    pub fn shared(initial: S, reducer: impl Fn(&S, A) -> S + 'static) -> Rc<Self> {
        Rc::new(Self::new(initial, reducer))
    }

    /// Current state.
    pub fn get_state(&self) -> Rc<S> {
        Rc::clone(&self.state.borrow())
    }

    /// Reduce `action` into the next state, replace the current one and
    /// notify every subscriber before returning.
    ///
    /// The state is replaced even when the reducer returns an equal value.
    /// A panicking reducer leaves the current state untouched.
    pub fn dispatch(&self, action: A) {
        let current = self.get_state();
        let next = (self.reducer)(&current, action);
        *self.state.borrow_mut() = Rc::new(next);
        self.observer.notify();
    }

    /// Register a change listener.
    pub fn subscribe(&self, listener: Listener) -> bool {
        self.observer.subscribe(listener)
    }

    /// Remove a change listener. Unknown listeners are ignored.
    pub fn unsubscribe(&self, listener: &Listener) -> bool {
        self.observer.unsubscribe(listener)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.observer.len()
    }
}

impl<S, A> ExternalStore for Store<S, A> {
    type Snapshot = S;

    fn subscribe(&self, listener: Listener) {
        Store::subscribe(self, listener);
    }

    fn unsubscribe(&self, listener: &Listener) {
        Store::unsubscribe(self, listener);
    }

    fn snapshot(&self) -> Rc<S> {
        self.get_state()
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state.borrow())
            .field("observer", &self.observer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::listener;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Todos {
        items: Vec<String>,
    }

    enum TodoAction {
        Add(String),
        Clear,
        Noop,
    }

    fn todo_reducer(state: &Todos, action: TodoAction) -> Todos {
        match action {
            TodoAction::Add(item) => {
                let mut items = state.items.clone();
                items.push(item);
                Todos { items }
            }
            TodoAction::Clear => Todos::default(),
            TodoAction::Noop => state.clone(),
        }
    }

    #[test]
    fn test_dispatch_applies_reducer() {
        let store = Store::new(Todos::default(), todo_reducer);
        store.dispatch(TodoAction::Add("milk".into()));
        store.dispatch(TodoAction::Add("eggs".into()));
        assert_eq!(store.get_state().items, vec!["milk", "eggs"]);

        store.dispatch(TodoAction::Clear);
        assert!(store.get_state().items.is_empty());
    }

    #[test]
    fn test_state_is_stable_between_dispatches() {
        let store = Store::new(Todos::default(), todo_reducer);
        let a = store.get_state();
        let b = store.get_state();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_dispatch_replaces_even_when_unchanged() {
        let store = Store::new(Todos::default(), todo_reducer);
        let before = store.get_state();
        store.dispatch(TodoAction::Noop);
        let after = store.get_state();

        assert_eq!(*before, *after);
        assert!(!Rc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_every_dispatch_notifies_synchronously() {
        let store = Rc::new(Store::new(Todos::default(), todo_reducer));
        let seen = Rc::new(Cell::new(0usize));
        let observed_len = Rc::new(Cell::new(0usize));

        let l = {
            let store = Rc::clone(&store);
            let seen = Rc::clone(&seen);
            let observed_len = Rc::clone(&observed_len);
            listener(move || {
                seen.set(seen.get() + 1);
                observed_len.set(store.get_state().items.len());
            })
        };
        store.subscribe(l.clone());

        store.dispatch(TodoAction::Add("a".into()));
        assert_eq!(seen.get(), 1);
        assert_eq!(observed_len.get(), 1);

        store.dispatch(TodoAction::Noop);
        assert_eq!(seen.get(), 2);

        store.unsubscribe(&l);
        store.dispatch(TodoAction::Add("b".into()));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_panicking_reducer_keeps_state() {
        let store = Store::new(1u32, |n: &u32, divisor: u32| n / divisor);
        let before = store.get_state();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| store.dispatch(0)));
        assert!(result.is_err());
        assert!(Rc::ptr_eq(&before, &store.get_state()));
    }
}
