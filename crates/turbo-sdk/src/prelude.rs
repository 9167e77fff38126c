//! Prelude for convenient imports.
//!
//! ```rust
//! use turbo_sdk::prelude::*;
//! ```
//!
//! This imports all commonly used items:
//! - Boot: `Storefront`, `StorefrontConfig`, `Environment`
//! - Containers: `Store`, product and cart state, actions and constructors
//! - Bindings: `SyncExternalStore`, `ShallowEq`, `listener`
//! - Routing: `Router`, `RouterConfig`, `Query`, `QueryUpdate`, `MemoryHistory`
//! - Hydration: `HydrationBridge`, `InitialData`, `InitialDataPort`, `TransportSlot`

// Storefront
pub use crate::config::StorefrontConfig;
pub use crate::storefront::Storefront;

// Reactive core
pub use turbo_store::prelude::*;

// Router
pub use turbo_router::prelude::*;

// Containers
pub use turbo_commerce::prelude::*;

// Hydration
pub use turbo_hydrate::{HydrationBridge, InitialData, InitialDataPort, TransportSlot};
