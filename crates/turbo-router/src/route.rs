//! Route registration and resolution.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;
use turbo_store::ShallowEq;

use crate::pattern::{PathMatcher, CATCH_ALL_PATTERN, NOT_FOUND_PATTERN};

/// Named path parameters captured by a match.
pub type Params = BTreeMap<String, String>;

/// A registered pattern and its handler.
#[derive(Clone)]
pub struct RouteDefinition<H> {
    pattern: String,
    matcher: PathMatcher,
    handler: H,
}

impl<H> RouteDefinition<H> {
    pub fn new(pattern: impl Into<String>, handler: H) -> Self {
        let pattern = pattern.into();
        Self {
            matcher: PathMatcher::compile(&pattern),
            pattern,
            handler,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn param_names(&self) -> &[String] {
        self.matcher.param_names()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

impl<H> fmt::Debug for RouteDefinition<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("pattern", &self.pattern)
            .field("param_names", &self.matcher.param_names())
            .finish_non_exhaustive()
    }
}

/// The result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute<H> {
    /// The registered pattern that matched, or `"*"` for the not-found
    /// handler.
    pub path: String,
    pub params: Params,
    pub handler: H,
}

impl<H> MatchedRoute<H> {
    /// Whether this is the not-found fallback.
    pub fn is_not_found(&self) -> bool {
        self.path == NOT_FOUND_PATTERN
    }
}

impl<H> ShallowEq for MatchedRoute<H> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.path == other.path && self.params == other.params
    }
}

/// Ordered routes plus the two fallbacks.
///
/// Resolution order:
/// 1. every route except the catch-all, first registered wins;
/// 2. the catch-all (`".*"`);
/// 3. the not-found handler (`"*"`), reported with path `"*"` and no params.
#[derive(Clone)]
pub struct RouteTable<H> {
    routes: Vec<RouteDefinition<H>>,
    catch_all: Option<RouteDefinition<H>>,
    not_found: Option<H>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            catch_all: None,
            not_found: None,
        }
    }
}

impl<H: Clone> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `pattern`.
    ///
    /// Re-registering a pattern replaces its handler and keeps its
    /// position.
    pub fn insert(&mut self, pattern: &str, handler: H) {
        match pattern {
            NOT_FOUND_PATTERN => self.not_found = Some(handler),
            CATCH_ALL_PATTERN => self.catch_all = Some(RouteDefinition::new(pattern, handler)),
            _ => match self.routes.iter_mut().find(|r| r.pattern == pattern) {
                Some(existing) => existing.handler = handler,
                None => self.routes.push(RouteDefinition::new(pattern, handler)),
            },
        }
    }

    /// Number of registered entries, fallbacks included.
    pub fn len(&self) -> usize {
        self.routes.len() + usize::from(self.catch_all.is_some()) + usize::from(self.not_found.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered non-fallback routes in order.
    pub fn routes(&self) -> &[RouteDefinition<H>] {
        &self.routes
    }

    pub fn has_not_found(&self) -> bool {
        self.not_found.is_some()
    }

    /// Resolve `pathname`.
    ///
    /// With a non-empty `base_url`, ordinary routes and the catch-all only
    /// match paths under that prefix, matched against the remainder. Paths
    /// outside it go straight to the not-found handler.
    pub fn resolve(&self, pathname: &str, base_url: &str) -> Option<MatchedRoute<H>> {
        let relative = if base_url.is_empty() {
            Some(pathname)
        } else {
            pathname.strip_prefix(base_url)
        };

        if let Some(relative) = relative {
            if let Some(matched) = self.match_route(relative) {
                return Some(matched);
            }
        }

        if let Some(handler) = &self.not_found {
            return Some(MatchedRoute {
                path: NOT_FOUND_PATTERN.to_string(),
                params: Params::new(),
                handler: handler.clone(),
            });
        }

        debug!(pathname, "no route matched");
        None
    }

    /// Ordinary routes, then the catch-all, against a base-relative path.
    fn match_route(&self, relative: &str) -> Option<MatchedRoute<H>> {
        for route in &self.routes {
            if let Some(values) = route.matcher.captures(relative) {
                let params = route
                    .matcher
                    .param_names()
                    .iter()
                    .cloned()
                    .zip(values.into_iter().map(str::to_string))
                    .collect();
                return Some(MatchedRoute {
                    path: route.pattern.clone(),
                    params,
                    handler: route.handler.clone(),
                });
            }
        }

        self.catch_all.as_ref().map(|route| MatchedRoute {
            path: route.pattern.clone(),
            params: Params::new(),
            handler: route.handler.clone(),
        })
    }
}

impl<H> fmt::Debug for RouteTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .field("catch_all", &self.catch_all.is_some())
            .field("not_found", &self.not_found.is_some())
            .finish()
    }
}
