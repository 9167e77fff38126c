//! Server-to-client hydration for TurboCommerce storefronts.
//!
//! A server render publishes an [`InitialData`] bag on a transport surface;
//! on the client the [`HydrationBridge`] replays it into the product and
//! cart containers once, then clears the surface:
//!
//! ```text
//! server  InitialData::to_transport() ──► TransportSlot / window.__INITIAL_DATA__
//! client  HydrationBridge::hydrate(port) ──► ProductStore, CartStore ──► port.clear()
//! ```

pub mod bridge;
pub mod data;
pub mod error;
pub mod port;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use bridge::HydrationBridge;
pub use data::InitialData;
pub use error::HydrationError;
pub use port::{InitialDataPort, TransportSlot, DEFAULT_TRANSPORT_KEY};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::WindowTransport;
