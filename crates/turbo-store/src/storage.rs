//! Persisted value slot with automatic JSON serialization.
//!
//! A [`Storage`] owns one key in a [`StorageBackend`] (browser
//! `localStorage`, an in-memory map, ...) and notifies its subscribers
//! whenever it writes that key.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::binding::ExternalStore;
use crate::error::StorageError;
use crate::observer::{Listener, Observer};

/// String key-value backend.
pub trait StorageBackend {
    /// Read the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write the raw value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Missing keys are ignored.
    fn remove_item(&self, key: &str);
}

/// In-process backend, used on servers and in tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// A typed value persisted under one key.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use turbo_store::{MemoryBackend, Storage};
///
/// let storage: Storage<Vec<String>> = Storage::new("cart", Rc::new(MemoryBackend::new()));
/// assert_eq!(storage.get(), None);
///
/// storage.set(&vec!["sku-1".to_string()]).unwrap();
/// assert_eq!(storage.get(), Some(vec!["sku-1".to_string()]));
///
/// storage.reset();
/// assert_eq!(storage.get(), None);
/// ```
pub struct Storage<T> {
    key: String,
    backend: Rc<dyn StorageBackend>,
    observer: Observer,
    cached: RefCell<Option<Rc<Option<T>>>>,
}

impl<T> Storage<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind `key` in `backend`.
    pub fn new(key: impl Into<String>, backend: Rc<dyn StorageBackend>) -> Self {
        Self {
            key: key.into(),
            backend,
            observer: Observer::new(),
            cached: RefCell::new(None),
        }
    }

    /// The backend key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and deserialize the stored value.
    ///
    /// Missing keys and unreadable JSON both read as `None`; the latter is
    /// logged.
    pub fn get(&self) -> Option<T> {
        let raw = self.backend.get_item(&self.key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key = %self.key, %error, "discarding unreadable stored value");
                None
            }
        }
    }

    /// Serialize and store `value`, then notify subscribers.
    pub fn set(&self, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(&self.key, &raw)?;
        self.invalidate();
        Ok(())
    }

    /// Delete the stored value, then notify subscribers.
    pub fn reset(&self) {
        self.backend.remove_item(&self.key);
        self.invalidate();
    }

    pub fn subscribe(&self, listener: Listener) -> bool {
        self.observer.subscribe(listener)
    }

    pub fn unsubscribe(&self, listener: &Listener) -> bool {
        self.observer.unsubscribe(listener)
    }

    fn invalidate(&self) {
        self.cached.borrow_mut().take();
        self.observer.notify();
    }
}

impl<T> ExternalStore for Storage<T>
where
    T: Serialize + DeserializeOwned,
{
    type Snapshot = Option<T>;

    fn subscribe(&self, listener: Listener) {
        Storage::subscribe(self, listener);
    }

    fn unsubscribe(&self, listener: &Listener) {
        Storage::unsubscribe(self, listener);
    }

    fn snapshot(&self) -> Rc<Option<T>> {
        if let Some(cached) = self.cached.borrow().as_ref() {
            return Rc::clone(cached);
        }
        let value = Rc::new(self.get());
        *self.cached.borrow_mut() = Some(Rc::clone(&value));
        value
    }
}

impl<T> fmt::Debug for Storage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("key", &self.key)
            .field("observer", &self.observer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::listener;
    use serde::Deserialize;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: String,
        quantity: u32,
    }

    fn storage() -> (Rc<MemoryBackend>, Storage<Vec<Line>>) {
        let backend = Rc::new(MemoryBackend::new());
        let storage = Storage::new("cart_items", backend.clone() as Rc<dyn StorageBackend>);
        (backend, storage)
    }

    #[test]
    fn test_set_then_get() {
        let (backend, storage) = storage();
        let lines = vec![Line { id: "p1".into(), quantity: 2 }];
        storage.set(&lines).unwrap();

        assert_eq!(storage.get(), Some(lines));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_unreadable_value_reads_as_none() {
        let (backend, storage) = storage();
        backend.set_item("cart_items", "{not json").unwrap();
        assert_eq!(storage.get(), None);
    }

    #[test]
    fn test_writes_notify() {
        let (_backend, storage) = storage();
        let count = Rc::new(Cell::new(0));
        {
            let count = Rc::clone(&count);
            storage.subscribe(listener(move || count.set(count.get() + 1)));
        }

        storage.set(&Vec::new()).unwrap();
        storage.reset();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_snapshot_is_stable_until_write() {
        let (_backend, storage) = storage();
        storage.set(&vec![Line { id: "p1".into(), quantity: 1 }]).unwrap();

        let a = storage.snapshot();
        let b = storage.snapshot();
        assert!(Rc::ptr_eq(&a, &b));

        storage.reset();
        let c = storage.snapshot();
        assert!(!Rc::ptr_eq(&a, &c));
        assert!(c.is_none());
    }
}
