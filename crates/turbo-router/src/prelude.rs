//! Common imports for route setup and navigation.

pub use crate::config::RouterConfig;
pub use crate::link::{ClickOutcome, LinkTarget};
pub use crate::location::{BrowserLocationSource, History, LocationSource, MemoryHistory, StaticLocationSource};
pub use crate::query::{Query, QueryUpdate};
pub use crate::route::{MatchedRoute, Params};
pub use crate::router::{Router, RouterSnapshot};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use crate::web::{install_listeners, WindowHistory};
