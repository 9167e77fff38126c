//! The transport surface carrying initial data from server to client.
//!
//! It is written once before the first client render, then read and
//! cleared exactly once.

use std::cell::RefCell;

use serde_json::Value;
use tracing::warn;

/// Global name the server render publishes initial data under.
pub const DEFAULT_TRANSPORT_KEY: &str = "__INITIAL_DATA__";

/// Access to the transport surface.
pub trait InitialDataPort {
    /// Read the published value without consuming it.
    fn peek(&self) -> Option<Value>;

    /// Remove the published value.
    fn clear(&self);

    /// Read then clear.
    fn take(&self) -> Option<Value> {
        let value = self.peek();
        self.clear();
        value
    }
}

/// In-process transport surface.
///
/// A slot created with [`TransportSlot::sealed`] models a host that refuses
/// to delete its global: clearing overwrites the value with `null` instead.
#[derive(Debug)]
pub struct TransportSlot {
    key: String,
    value: RefCell<Option<Value>>,
    sealed: bool,
}

impl Default for TransportSlot {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSPORT_KEY)
    }
}

impl TransportSlot {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: RefCell::new(None),
            sealed: false,
        }
    }

    /// A slot whose value cannot be deleted, only overwritten.
    pub fn sealed(key: impl Into<String>) -> Self {
        Self {
            sealed: true,
            ..Self::new(key)
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Publish `value`, replacing anything already there.
    pub fn publish(&self, value: Value) {
        *self.value.borrow_mut() = Some(value);
    }

    /// Whether a value (the `null` marker included) is present.
    pub fn is_present(&self) -> bool {
        self.value.borrow().is_some()
    }
}

impl InitialDataPort for TransportSlot {
    fn peek(&self) -> Option<Value> {
        self.value.borrow().clone()
    }

    fn clear(&self) {
        let mut value = self.value.borrow_mut();
        if value.is_none() {
            return;
        }
        if self.sealed {
            warn!(key = %self.key, "transport slot cannot be deleted, overwriting with null");
            *value = Some(Value::Null);
        } else {
            *value = None;
        }
    }
}
