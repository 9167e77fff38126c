//! Observable state containers for TurboCommerce storefronts.
//!
//! This crate provides the reactive core shared by every storefront runtime:
//!
//! - **Observer**: ordered subscribe/notify list
//! - **Store**: dispatch-driven container holding one replaceable state value
//! - **ShallowSelector**: one-slot memoization keyed on shallow equality
//! - **SyncExternalStore**: client/server render binding with an
//!   identity-stable server snapshot getter
//! - **Storage**: persisted, JSON-serialized value slot
//!
//! All types are single-threaded (`Rc`/`RefCell`): a storefront runs one
//! cooperative event loop per process.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use turbo_store::prelude::*;
//!
//! let store = Store::shared(0u32, |n: &u32, step: u32| n + step);
//! let binding = SyncExternalStore::new(store.clone(), Environment::Client);
//!
//! let _subscription = binding.watch(|count| println!("count = {count}"));
//! store.dispatch(2);
//! assert_eq!(*binding.read(), 2);
//! ```

pub mod binding;
pub mod environment;
pub mod error;
pub mod observer;
pub mod selector;
pub mod storage;
pub mod store;

pub use binding::{ExternalStore, SnapshotFn, Subscription, SyncExternalStore};
pub use environment::Environment;
pub use error::StorageError;
pub use observer::{listener, Listener, Observer};
pub use selector::{ShallowEq, ShallowSelector};
pub use storage::{MemoryBackend, Storage, StorageBackend};
pub use store::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::binding::{ExternalStore, Subscription, SyncExternalStore};
    pub use crate::environment::Environment;
    pub use crate::observer::{listener, Listener, Observer};
    pub use crate::selector::{ShallowEq, ShallowSelector};
    pub use crate::storage::{MemoryBackend, Storage, StorageBackend};
    pub use crate::store::Store;
}
