//! Router configuration.

use serde::{Deserialize, Serialize};

/// Default marker attribute for router-owned links.
pub const DEFAULT_LINK_ATTRIBUTE: &str = "data-link";

/// Router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Path prefix the application is served under (e.g. `/shop`).
    pub base_url: String,
    /// Attribute marking elements whose activation the router intercepts.
    pub link_attribute: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            link_attribute: DEFAULT_LINK_ATTRIBUTE.to_string(),
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL. Trailing slashes are stripped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.normalize()
    }

    pub fn with_link_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.link_attribute = attribute.into();
        self
    }

    /// Strip trailing slashes from the base URL.
    ///
    /// Deserialized configs go through this before reaching the router.
    pub fn normalize(mut self) -> Self {
        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        self
    }
}
