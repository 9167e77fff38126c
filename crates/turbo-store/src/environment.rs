//! Execution environment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the storefront code is running.
///
/// Passed explicitly to every environment-aware component. Static
/// pre-rendering runs as [`Environment::Server`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Interactive browser session.
    Client,
    /// Server-side or static render pass.
    Server,
}

impl Environment {
    /// Best guess for the current build target: `wasm32` runs in a browser,
    /// everything else renders on a server.
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Client
        } else {
            Self::Server
        }
    }

    pub fn is_client(self) -> bool {
        matches!(self, Self::Client)
    }

    pub fn is_server(self) -> bool {
        matches!(self, Self::Server)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Environment::Client).unwrap();
        assert_eq!(json, "\"client\"");
        let env: Environment = serde_json::from_str("\"server\"").unwrap();
        assert!(env.is_server());
    }

    #[test]
    fn test_detect_native_is_server() {
        #[cfg(not(target_arch = "wasm32"))]
        assert_eq!(Environment::detect(), Environment::Server);
    }
}
