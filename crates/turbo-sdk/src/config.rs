//! Storefront configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_hydrate::DEFAULT_TRANSPORT_KEY;
use turbo_router::RouterConfig;
use turbo_store::Environment;

/// Storefront configuration file.
///
/// ```toml
/// name = "vanilla"
/// environment = "server"
///
/// [router]
/// base_url = "/front/vanilla/"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Storefront name, used in logs.
    #[serde(default = "default_name")]
    pub name: String,

    /// Render environment; detected from the build target when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,

    /// Global the server render publishes initial data under.
    #[serde(default = "default_transport_key")]
    pub transport_key: String,

    /// Router configuration.
    #[serde(default)]
    pub router: RouterConfig,
}

fn default_name() -> String {
    "storefront".to_string()
}

fn default_transport_key() -> String {
    DEFAULT_TRANSPORT_KEY.to_string()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            environment: None,
            transport_key: default_transport_key(),
            router: RouterConfig::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        };
        config.with_context(|| format!("Failed to load config: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        Ok(config.normalize())
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content).context("Failed to parse JSON config")?;
        Ok(config.normalize())
    }

    /// Save config to a file, in the format its extension names.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.router = self.router.with_base_url(base_url);
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// The configured environment, or the detected one.
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_else(Environment::detect)
    }

    fn normalize(mut self) -> Self {
        self.router = self.router.normalize();
        self
    }
}
