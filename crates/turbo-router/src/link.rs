//! Router-owned links.
//!
//! An element opts into router navigation by carrying the configured marker
//! attribute (`data-link` by default). A click anywhere inside such an
//! element navigates to its `href` instead of loading a new document.

use std::rc::Rc;

/// The nearest marked ancestor of a click target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterLink {
    pub href: Option<String>,
}

/// Something a click can land on.
pub trait LinkTarget {
    /// The closest element (self included) carrying `attribute`.
    fn closest_link(&self, attribute: &str) -> Option<RouterLink>;
}

/// What the router did with a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not a router link; let the default action run.
    Ignored,
    /// Default action must be suppressed.
    Intercepted,
}

impl ClickOutcome {
    pub fn should_prevent_default(self) -> bool {
        self == ClickOutcome::Intercepted
    }
}

/// Minimal element tree for hosts without a DOM.
#[derive(Debug, Clone, Default)]
pub struct ElementNode {
    attributes: Vec<(String, String)>,
    parent: Option<Rc<ElementNode>>,
}

impl ElementNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_parent(mut self, parent: Rc<ElementNode>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }
}

impl LinkTarget for ElementNode {
    fn closest_link(&self, attribute: &str) -> Option<RouterLink> {
        let mut node = Some(self);
        while let Some(current) = node {
            if current.has_attribute(attribute) {
                return Some(RouterLink {
                    href: current.attribute("href").map(str::to_string),
                });
            }
            node = current.parent.as_deref();
        }
        None
    }
}
