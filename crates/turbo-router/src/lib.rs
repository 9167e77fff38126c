//! Pattern routing for TurboCommerce storefronts.
//!
//! One [`Router`] type serves both render environments:
//!
//! ```text
//! client  Router ── BrowserLocationSource ── History (window.history | MemoryHistory)
//! server  Router ── StaticLocationSource  (request URL + query field)
//! ```
//!
//! Patterns are plain paths with `:name` parameters:
//!
//! ```text
//! /                 -> exact root
//! /product/:id/     -> /product/42/  (id = "42")
//! .*                -> catch-all, tried after every other route
//! *                 -> not-found handler, tried last
//! ```
//!
//! Resolution is first-match-wins in registration order.
//!
//! # Usage
//!
//! ```rust
//! use turbo_router::prelude::*;
//!
//! let router = Router::server(RouterConfig::default(), "/product/42/?search=tv")
//!     .with_routes([("/", "home"), ("/product/:id/", "detail"), ("*", "not-found")]);
//! router.start();
//!
//! let route = router.route().unwrap();
//! assert_eq!(route.path, "/product/:id/");
//! assert_eq!(route.params["id"], "42");
//! assert_eq!(router.query().get("search"), Some("tv"));
//! ```

pub mod config;
pub mod error;
pub mod link;
pub mod location;
pub mod pattern;
pub mod prelude;
pub mod query;
pub mod route;
pub mod router;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use config::RouterConfig;
pub use error::RouterError;
pub use link::{ClickOutcome, ElementNode, LinkTarget, RouterLink};
pub use location::{
    BrowserLocationSource, History, Location, LocationSource, MemoryHistory, QueryWrite,
    StaticLocationSource,
};
pub use pattern::{PathMatcher, CATCH_ALL_PATTERN, NOT_FOUND_PATTERN};
pub use query::{parse_query, stringify_query, url_with_query, Query, QueryUpdate};
pub use route::{MatchedRoute, Params, RouteDefinition, RouteTable};
pub use router::{Router, RouterSnapshot};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::{install_listeners, WindowHistory};
