//! # TurboCommerce SDK
//!
//! Reactive storefront core shared by server rendering and client
//! hydration.
//!
//! ## Quick Start
//!
//! ```rust
//! use turbo_sdk::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Page {
//!     Home,
//!     Detail,
//!     NotFound,
//! }
//!
//! let routes = [("/", Page::Home), ("/product/:id/", Page::Detail), ("*", Page::NotFound)];
//!
//! // Server: resolve the request, fill containers, publish initial data.
//! let server = Storefront::server(StorefrontConfig::default(), "/product/42/", Query::new(), routes);
//! server.boot(&TransportSlot::default());
//! assert_eq!(server.router().target(), Some(Page::Detail));
//! server
//!     .products()
//!     .dispatch(ProductAction::SetCurrentProduct(Product::new("42", "Keyboard", "59000")));
//!
//! let slot = TransportSlot::default();
//! server.publish(&slot).unwrap();
//!
//! // Client: hydrate from the published data, then route.
//! let history = std::rc::Rc::new(MemoryHistory::new("/product/42/"));
//! let client = Storefront::client(StorefrontConfig::default(), history, routes);
//! assert!(client.boot(&slot));
//! assert!(client.products().get_state().has_product_detail("42"));
//! ```
//!
//! ## Crates
//!
//! - [`turbo_store`]: observer, store, shallow selector, external-store binding
//! - [`turbo_router`]: dual-environment pattern router
//! - [`turbo_commerce`]: product and cart containers
//! - [`turbo_hydrate`]: initial-data transport and hydration bridge
//!
//! ## Crate Features
//!
//! - `web` - browser `History`, link interception and `window` transport
//!   (`wasm32` only)

pub mod config;
pub mod prelude;
pub mod storefront;

// Re-export storefront crates
pub use turbo_commerce;
pub use turbo_hydrate;
pub use turbo_router;
pub use turbo_store;

pub use config::StorefrontConfig;
pub use storefront::Storefront;
