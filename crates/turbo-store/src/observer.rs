//! Subscribe/notify primitive shared by stores and the router.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A zero-argument change callback.
///
/// Listeners are identified by the address of their allocation, so the same
/// `Rc` must be passed back to [`Observer::unsubscribe`].
pub type Listener = Rc<dyn Fn()>;

/// Wrap a closure as a [`Listener`].
pub fn listener(f: impl Fn() + 'static) -> Listener {
    Rc::new(f)
}

fn same_listener(a: &Listener, b: &Listener) -> bool {
    // Compare data addresses only; vtable pointers are not unique.
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Ordered list of listeners notified synchronously.
///
/// Insertion order is notification order. A listener is registered at most
/// once; subscribing the same `Rc` again is a no-op.
#[derive(Default)]
pub struct Observer {
    listeners: RefCell<Vec<Listener>>,
}

impl Observer {
    /// Create an observer with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener unless it is already registered.
    ///
    /// Returns `true` if the listener was added.
    pub fn subscribe(&self, listener: Listener) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Remove a listener by identity.
    ///
    /// Removing an unknown or already removed listener is a no-op and
    /// returns `false`.
    pub fn unsubscribe(&self, listener: &Listener) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let len_before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        listeners.len() < len_before
    }

    /// Invoke every listener in subscription order.
    ///
    /// The list is snapshotted first, so listeners may subscribe, unsubscribe
    /// or trigger further notifications while running. Panics propagate.
    pub fn notify(&self) {
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Listener {
        let log = Rc::clone(log);
        listener(move || log.borrow_mut().push(name))
    }

    #[test]
    fn test_notify_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let observer = Observer::new();
        observer.subscribe(recorder(&log, "a"));
        observer.subscribe(recorder(&log, "b"));
        observer.subscribe(recorder(&log, "c"));

        observer.notify();
        observer.notify();

        assert_eq!(*log.borrow(), vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_subscribe_is_ignored() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let observer = Observer::new();
        let a = recorder(&log, "a");

        assert!(observer.subscribe(a.clone()));
        assert!(!observer.subscribe(a.clone()));
        observer.notify();

        assert_eq!(observer.len(), 1);
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let observer = Observer::new();
        let a = recorder(&log, "a");
        let unknown = recorder(&log, "unknown");
        observer.subscribe(a.clone());

        assert!(observer.unsubscribe(&a));
        assert!(!observer.unsubscribe(&a));
        assert!(!observer.unsubscribe(&unknown));
        observer.notify();

        assert!(observer.is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_listener_may_subscribe_during_notify() {
        let observer = Rc::new(Observer::new());
        let count = Rc::new(RefCell::new(0));

        let late = {
            let count = Rc::clone(&count);
            listener(move || *count.borrow_mut() += 1)
        };
        let first = {
            let observer = Rc::clone(&observer);
            let late = late.clone();
            listener(move || {
                observer.subscribe(late.clone());
            })
        };
        observer.subscribe(first);

        // The late listener joins after the snapshot was taken.
        observer.notify();
        assert_eq!(*count.borrow(), 0);

        observer.notify();
        assert_eq!(*count.borrow(), 1);
    }
}
