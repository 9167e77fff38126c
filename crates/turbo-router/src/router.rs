//! The dual-environment router.
//!
//! # States
//!
//! A router starts with no resolved route. `start`, `push`, a history pop
//! and (client-side) query writes resolve the current location again; the
//! result is either a [`MatchedRoute`] or `None` when nothing matched and
//! no not-found handler is registered.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, error};
use turbo_store::{Environment, ExternalStore, Listener, Observer, ShallowEq};

use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::link::{ClickOutcome, LinkTarget};
use crate::location::{
    BrowserLocationSource, History, Location, LocationSource, QueryWrite, StaticLocationSource,
};
use crate::query::{url_with_query, Query, QueryUpdate};
use crate::route::{MatchedRoute, Params, RouteTable};

/// What a render binding reads from the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterSnapshot<H> {
    pub route: Option<Rc<MatchedRoute<H>>>,
    pub params: Params,
    pub query: Query,
}

impl<H> ShallowEq for RouterSnapshot<H> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.route.shallow_eq(&other.route)
            && self.params.shallow_eq(&other.params)
            && self.query.shallow_eq(&other.query)
    }
}

/// Pattern router over a [`LocationSource`].
///
/// `H` is the opaque handler type (a page component, a render function,
/// an enum tag) handed back on a match.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use turbo_router::{MemoryHistory, Router, RouterConfig};
///
/// let history = Rc::new(MemoryHistory::new("/"));
/// let router = Router::client(RouterConfig::default(), history)
///     .with_routes([("/", "home"), ("/product/:id/", "detail"), ("*", "not-found")]);
/// router.start();
/// assert_eq!(router.target(), Some("home"));
///
/// router.push("/product/42/");
/// assert_eq!(router.target(), Some("detail"));
/// assert_eq!(router.params().get("id").map(String::as_str), Some("42"));
/// ```
pub struct Router<H> {
    routes: RefCell<RouteTable<H>>,
    route: RefCell<Option<Rc<MatchedRoute<H>>>>,
    observer: Observer,
    base_url: String,
    link_attribute: String,
    location: Box<dyn LocationSource>,
    snapshot: RefCell<Option<Rc<RouterSnapshot<H>>>>,
}

impl<H: Clone + 'static> Router<H> {
    pub fn new(config: RouterConfig, location: impl LocationSource + 'static) -> Self {
        let config = config.normalize();
        Self {
            routes: RefCell::new(RouteTable::new()),
            route: RefCell::new(None),
            observer: Observer::new(),
            base_url: config.base_url,
            link_attribute: config.link_attribute,
            location: Box::new(location),
            snapshot: RefCell::new(None),
        }
    }

    /// Client router over `history`.
    pub fn client(config: RouterConfig, history: Rc<dyn History>) -> Self {
        Self::new(config, BrowserLocationSource::new(history))
    }

    /// Server router for one request URL.
    pub fn server(config: RouterConfig, url: &str) -> Self {
        Self::new(config, StaticLocationSource::new(url))
    }

    /// Builder form of [`add_routes`](Self::add_routes).
    pub fn with_routes<P: AsRef<str>>(self, routes: impl IntoIterator<Item = (P, H)>) -> Self {
        self.add_routes(routes);
        self
    }

    /// Register routes in iteration order. `"*"` sets the not-found handler
    /// and `".*"` the catch-all.
    pub fn add_routes<P: AsRef<str>>(&self, routes: impl IntoIterator<Item = (P, H)>) {
        let mut table = self.routes.borrow_mut();
        for (pattern, handler) in routes {
            table.insert(pattern.as_ref(), handler);
        }
    }

    pub fn add_route(&self, pattern: &str, handler: H) {
        self.routes.borrow_mut().insert(pattern, handler);
    }

    pub fn environment(&self) -> Environment {
        self.location.environment()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn link_attribute(&self) -> &str {
        &self.link_attribute
    }

    /// The location routes resolve against.
    pub fn location(&self) -> Location {
        self.location.location()
    }

    /// The resolved route, if any.
    pub fn route(&self) -> Option<Rc<MatchedRoute<H>>> {
        self.route.borrow().clone()
    }

    /// Parameters of the resolved route; empty when nothing matched.
    pub fn params(&self) -> Params {
        self.route
            .borrow()
            .as_ref()
            .map(|route| route.params.clone())
            .unwrap_or_default()
    }

    /// Handler of the resolved route.
    pub fn target(&self) -> Option<H> {
        self.route.borrow().as_ref().map(|route| route.handler.clone())
    }

    /// The current query. Client-side this re-reads the URL every time.
    pub fn query(&self) -> Query {
        self.location.query()
    }

    /// Merge `update` into the query.
    ///
    /// Client-side this navigates to the current path with the merged query.
    /// Server-side the query is simply replaced by the non-empty entries of
    /// `update`.
    pub fn set_query(&self, update: &QueryUpdate) {
        match self.location.write_query(update, &self.base_url) {
            QueryWrite::Navigate(url) => self.push(&url),
            QueryWrite::Stored => self.invalidate_snapshot(),
        }
    }

    /// The URL [`set_query`](Self::set_query) would navigate to.
    pub fn url_for_query(&self, update: &QueryUpdate) -> String {
        let next = self.location.query().merged(update);
        url_with_query(&self.base_url, &self.location.location().pathname, &next)
    }

    /// Resolve `url` without changing router state.
    pub fn resolve(&self, url: &str) -> Option<MatchedRoute<H>> {
        let pathname = Location::parse(url).pathname;
        self.routes.borrow().resolve(&pathname, self.route_base())
    }

    /// Resolve the current location.
    pub fn start(&self) {
        let pathname = self.location.location().pathname;
        self.start_with(&pathname);
    }

    /// Resolve the pathname of `url`; its query and fragment are ignored.
    pub fn start_at(&self, url: &str) {
        let pathname = Location::parse(url).pathname;
        self.start_with(&pathname);
    }

    fn start_with(&self, pathname: &str) {
        let route = self.routes.borrow().resolve(pathname, self.route_base());
        self.set_route(route);
        if self.environment().is_client() {
            self.observer.notify();
        }
    }

    /// Navigate to `url`.
    ///
    /// Relative paths get the base URL prepended; absolute `http(s)://` and
    /// protocol-relative URLs are used as-is. No history entry is added when
    /// the target equals the current path and query, but the route is still
    /// re-resolved and subscribers notified.
    ///
    /// Failures are logged and leave the router unchanged. Server-side this
    /// does nothing.
    pub fn push(&self, url: &str) {
        if self.environment().is_server() {
            debug!(url, "ignoring navigation during server render");
            return;
        }
        if let Err(error) = self.try_push(url) {
            error!(url, %error, "router navigation failed");
        }
    }

    fn try_push(&self, url: &str) -> Result<(), RouterError> {
        let full_url = self.normalize_url(url);
        let current = self.location.location().full_path();

        if current == full_url {
            debug!(url = %full_url, "already at url, skipping history entry");
        } else {
            self.location.push_state(&full_url)?;
        }

        let route = self.resolve(&full_url);
        self.set_route(route);
        self.observer.notify();
        Ok(())
    }

    fn normalize_url(&self, url: &str) -> String {
        if is_external(url) {
            return url.to_string();
        }
        let base = self.base_url.as_str();
        let under_base = !base.is_empty()
            && url
                .strip_prefix(base)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?']));
        if under_base {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{base}{url}")
        } else {
            format!("{base}/{url}")
        }
    }

    /// Browser back/forward: re-resolve and notify without pushing.
    pub fn handle_pop_state(&self) {
        if self.environment().is_server() {
            return;
        }
        let pathname = self.location.location().pathname;
        let route = self.routes.borrow().resolve(&pathname, self.route_base());
        self.set_route(route);
        self.observer.notify();
    }

    /// Route a click on `target`.
    ///
    /// Clicks inside an element carrying the link attribute are intercepted
    /// and, when that element has an `href`, navigate there.
    pub fn handle_click(&self, target: &dyn LinkTarget) -> ClickOutcome {
        if self.environment().is_server() {
            return ClickOutcome::Ignored;
        }
        let Some(link) = target.closest_link(&self.link_attribute) else {
            return ClickOutcome::Ignored;
        };
        if let Some(href) = link.href.filter(|href| !href.is_empty()) {
            self.push(&href);
        }
        ClickOutcome::Intercepted
    }

    pub fn subscribe(&self, listener: Listener) -> bool {
        self.observer.subscribe(listener)
    }

    pub fn unsubscribe(&self, listener: &Listener) -> bool {
        self.observer.unsubscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.observer.len()
    }

    /// Route, params and query as one value.
    ///
    /// The same `Rc` is returned until the route or the query changes.
    pub fn snapshot(&self) -> Rc<RouterSnapshot<H>> {
        let query = self.location.query();
        if let Some(cached) = self.snapshot.borrow().as_ref() {
            if cached.query == query {
                return Rc::clone(cached);
            }
        }
        let snapshot = Rc::new(RouterSnapshot {
            route: self.route(),
            params: self.params(),
            query,
        });
        *self.snapshot.borrow_mut() = Some(Rc::clone(&snapshot));
        snapshot
    }

    /// Server routes are registered without the base URL.
    fn route_base(&self) -> &str {
        if self.environment().is_client() {
            &self.base_url
        } else {
            ""
        }
    }

    fn set_route(&self, route: Option<MatchedRoute<H>>) {
        *self.route.borrow_mut() = route.map(Rc::new);
        self.invalidate_snapshot();
    }

    fn invalidate_snapshot(&self) {
        self.snapshot.borrow_mut().take();
    }
}

fn is_external(url: &str) -> bool {
    url.starts_with("//") || url.starts_with("http://") || url.starts_with("https://")
}

impl<H: Clone + 'static> ExternalStore for Router<H> {
    type Snapshot = RouterSnapshot<H>;

    fn subscribe(&self, listener: Listener) {
        Router::subscribe(self, listener);
    }

    fn unsubscribe(&self, listener: &Listener) {
        Router::unsubscribe(self, listener);
    }

    fn snapshot(&self) -> Rc<RouterSnapshot<H>> {
        Router::snapshot(self)
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("environment", &self.location.environment())
            .field("base_url", &self.base_url)
            .field("routes", &self.routes.borrow())
            .field("route", &self.route.borrow().as_ref().map(|r| r.path.clone()))
            .field("observer", &self.observer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::ElementNode;
    use crate::location::MemoryHistory;
    use std::cell::Cell;
    use turbo_store::listener;

    const ROUTES: [(&str, &str); 3] = [("/", "home"), ("/product/:id/", "detail"), ("*", "not-found")];

    fn client(base_url: &str, url: &str) -> (Rc<MemoryHistory>, Router<&'static str>) {
        let history = Rc::new(MemoryHistory::new(url));
        let config = RouterConfig::new().with_base_url(base_url);
        let router = Router::client(config, history.clone()).with_routes(ROUTES);
        (history, router)
    }

    fn counter(router: &Router<&'static str>) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        router.subscribe(listener(move || c.set(c.get() + 1)));
        count
    }

    #[test]
    fn test_unstarted_router_has_no_route() {
        let (_history, router) = client("", "/");
        assert!(router.route().is_none());
        assert!(router.params().is_empty());
        assert_eq!(router.target(), None);
    }

    #[test]
    fn test_client_start_resolves_and_notifies() {
        let (_history, router) = client("", "/product/9/");
        let count = counter(&router);
        router.start();
        assert_eq!(router.target(), Some("detail"));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_server_start_does_not_notify() {
        let router = Router::server(RouterConfig::default(), "/product/3/?x=1").with_routes(ROUTES);
        let count = counter(&router);
        router.start();
        assert_eq!(router.target(), Some("detail"));
        assert_eq!(count.get(), 0);

        router.start_at("/nowhere?x=2#frag");
        assert!(router.route().unwrap().is_not_found());
    }

    #[test]
    fn test_push_adds_history_and_notifies() {
        let (history, router) = client("", "/");
        router.start();
        let count = counter(&router);

        router.push("/product/42/");
        assert_eq!(history.len(), 2);
        assert_eq!(history.location().pathname, "/product/42/");
        assert_eq!(router.params().get("id").map(String::as_str), Some("42"));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_push_same_url_skips_history_but_notifies() {
        let (history, router) = client("", "/product/1/");
        router.start();
        let count = counter(&router);

        router.push("/product/1/");
        assert_eq!(history.len(), 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_push_prepends_base_url() {
        let (history, router) = client("/shop/", "/shop/");
        router.start();
        assert_eq!(router.base_url(), "/shop");
        assert_eq!(router.target(), Some("home"));

        router.push("product/5/");
        assert_eq!(history.location().pathname, "/shop/product/5/");
        assert_eq!(router.target(), Some("detail"));

        router.push("/shop/product/6/");
        assert_eq!(history.location().pathname, "/shop/product/6/");

        router.push("/shopping");
        assert_eq!(history.location().pathname, "/shop/shopping");
    }

    #[test]
    fn test_cross_origin_push_fails_quietly() {
        let (history, router) = client("", "/product/1/");
        router.start();
        let before = router.route();
        let count = counter(&router);

        router.push("https://elsewhere.example.com/");
        assert_eq!(history.len(), 1);
        assert!(Rc::ptr_eq(&before.unwrap(), &router.route().unwrap()));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_server_push_is_inert() {
        let router = Router::server(RouterConfig::default(), "/").with_routes(ROUTES);
        router.start();
        let count = counter(&router);
        router.push("/product/1/");
        assert_eq!(router.target(), Some("home"));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_pop_state_re_resolves_without_push() {
        let (history, router) = client("", "/");
        router.start();
        router.push("/product/2/");
        let count = counter(&router);

        assert!(history.back());
        router.handle_pop_state();
        assert_eq!(router.target(), Some("home"));
        assert_eq!(history.len(), 2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_client_query_write_merges_via_navigation() {
        let (history, router) = client("", "/?search=tv&limit=20");
        router.start();

        router.set_query(&QueryUpdate::new().set("search", "phone").remove("limit"));
        assert_eq!(history.location().full_path(), "/?search=phone");
        assert_eq!(router.query().get("search"), Some("phone"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_server_query_write_replaces() {
        let router = Router::server(RouterConfig::default(), "/?search=tv").with_routes(ROUTES);
        router.set_query(&QueryUpdate::new().set("current", "1"));
        assert_eq!(router.query().to_query_string(), "current=1");
    }

    #[test]
    fn test_url_for_query() {
        let (_history, router) = client("/shop", "/shop/?sort=price_asc");
        let url = router.url_for_query(&QueryUpdate::new().set("search", "a b"));
        assert_eq!(url, "/shop/?search=a+b&sort=price_asc");
    }

    #[test]
    fn test_click_on_router_link() {
        let (history, router) = client("", "/");
        router.start();
        let anchor = Rc::new(
            ElementNode::new()
                .with_attribute("data-link", "")
                .with_attribute("href", "/product/7/"),
        );
        let span = ElementNode::new().with_parent(anchor);

        assert_eq!(router.handle_click(&span), ClickOutcome::Intercepted);
        assert_eq!(history.location().pathname, "/product/7/");

        let plain = ElementNode::new().with_attribute("href", "/elsewhere");
        assert_eq!(router.handle_click(&plain), ClickOutcome::Ignored);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_snapshot_identity_tracks_changes() {
        let (_history, router) = client("", "/");
        router.start();
        let a = router.snapshot();
        let b = router.snapshot();
        assert!(Rc::ptr_eq(&a, &b));

        router.set_query(&QueryUpdate::new().set("page", "2"));
        let c = router.snapshot();
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(c.query.get("page"), Some("2"));
    }

    #[test]
    fn test_add_route_after_start() {
        let (_history, router) = client("", "/about");
        router.start();
        assert!(router.route().unwrap().is_not_found());

        router.add_route("/about", "about");
        router.start();
        assert_eq!(router.target(), Some("about"));
        assert_eq!(router.resolve("/about?x=1").unwrap().handler, "about");
    }

    #[test]
    fn test_client_catch_all_ignores_paths_outside_base() {
        let (_history, router) = client("/shop", "/elsewhere");
        router.add_route(".*", "catch-all");
        router.start();
        assert_eq!(router.target(), Some("not-found"));

        router.start_at("/shop/anything");
        assert_eq!(router.target(), Some("catch-all"));

        let server = Router::server(RouterConfig::new().with_base_url("/shop"), "/elsewhere")
            .with_routes([(".*", "catch-all"), ("*", "not-found")]);
        server.start();
        assert_eq!(server.target(), Some("catch-all"));
    }
}
