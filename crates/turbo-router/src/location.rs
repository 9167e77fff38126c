//! Where the router reads its URL from.
//!
//! The router never branches on the environment to find its location.
//! It asks a [`LocationSource`]:
//!
//! - [`BrowserLocationSource`] reads and writes a [`History`] (the browser's
//!   `window.history`, or [`MemoryHistory`] natively). The URL is the source
//!   of truth for the query.
//! - [`StaticLocationSource`] holds the one URL a server render was asked
//!   for. Its query is a plain field.

use std::cell::RefCell;
use std::rc::Rc;

use turbo_store::Environment;

use crate::error::RouterError;
use crate::query::{url_with_query, Query, QueryUpdate};

/// Origin assumed for in-process history.
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Pathname and search of a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Query string including its leading `?`, or empty.
    pub search: String,
}

impl Location {
    /// Parse an absolute, protocol-relative or path-only URL.
    ///
    /// The origin and fragment are dropped; a path without a leading `/` is
    /// treated as rooted.
    pub fn parse(url: &str) -> Self {
        let (_, rest) = split_origin(url);
        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let (path, search) = match rest.find('?') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };

        let pathname = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let search = if search == "?" { "" } else { search };

        Self {
            pathname,
            search: search.to_string(),
        }
    }

    /// `pathname` followed by `search`.
    pub fn full_path(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

/// Split `scheme://host` (or `//host`) off the front of `url`.
pub(crate) fn split_origin(url: &str) -> (Option<&str>, &str) {
    let after_scheme = ["http://", "https://", "//"]
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix).map(|rest| (prefix.len(), rest)));

    match after_scheme {
        Some((prefix_len, rest)) => {
            let host_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
            let origin_len = prefix_len + host_len;
            (Some(&url[..origin_len]), &url[origin_len..])
        }
        None => (None, url),
    }
}

/// A navigation history stack.
pub trait History {
    /// The current entry.
    fn location(&self) -> Location;

    /// Push a new entry for `url`.
    fn push_state(&self, url: &str) -> Result<(), RouterError>;
}

/// In-process [`History`].
///
/// Behaves like the browser's: pushing discards forward entries, and a
/// URL on another origin is refused.
#[derive(Debug)]
pub struct MemoryHistory {
    origin: String,
    entries: RefCell<Vec<Location>>,
    index: RefCell<usize>,
}

impl MemoryHistory {
    /// History with one entry at `url` on [`DEFAULT_ORIGIN`].
    pub fn new(url: &str) -> Self {
        Self::with_origin(DEFAULT_ORIGIN, url)
    }

    pub fn with_origin(origin: impl Into<String>, url: &str) -> Self {
        Self {
            origin: origin.into(),
            entries: RefCell::new(vec![Location::parse(url)]),
            index: RefCell::new(0),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of entries, including forward ones.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Step back one entry. Returns `false` at the start of history.
    ///
    /// Callers deliver the pop signal to the router themselves.
    pub fn back(&self) -> bool {
        let mut index = self.index.borrow_mut();
        if *index == 0 {
            return false;
        }
        *index -= 1;
        true
    }

    /// Step forward one entry. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        let mut index = self.index.borrow_mut();
        if *index + 1 >= self.entries.borrow().len() {
            return false;
        }
        *index += 1;
        true
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        let index = *self.index.borrow();
        self.entries.borrow().get(index).cloned().unwrap_or_default()
    }

    fn push_state(&self, url: &str) -> Result<(), RouterError> {
        if let (Some(origin), _) = split_origin(url) {
            let same = origin == self.origin
                || origin
                    .strip_prefix("//")
                    .is_some_and(|host| self.origin.ends_with(&format!("://{host}")));
            if !same {
                return Err(RouterError::CrossOrigin(url.to_string()));
            }
        }

        let mut index = self.index.borrow_mut();
        let mut entries = self.entries.borrow_mut();
        entries.truncate(*index + 1);
        entries.push(Location::parse(url));
        *index = entries.len() - 1;
        Ok(())
    }
}

/// Outcome of a query write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryWrite {
    /// The caller must navigate to this URL.
    Navigate(String),
    /// The source stored the query itself.
    Stored,
}

/// The router's view of "where are we".
pub trait LocationSource {
    fn environment(&self) -> Environment;

    /// The location routes resolve against.
    fn location(&self) -> Location;

    /// Record a navigation to `url`.
    fn push_state(&self, url: &str) -> Result<(), RouterError>;

    /// The current query.
    fn query(&self) -> Query;

    /// Apply `update` to the query.
    fn write_query(&self, update: &QueryUpdate, base_url: &str) -> QueryWrite;
}

/// Client-side source over a [`History`].
pub struct BrowserLocationSource {
    history: Rc<dyn History>,
}

impl BrowserLocationSource {
    pub fn new(history: Rc<dyn History>) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &Rc<dyn History> {
        &self.history
    }
}

impl LocationSource for BrowserLocationSource {
    fn environment(&self) -> Environment {
        Environment::Client
    }

    fn location(&self) -> Location {
        self.history.location()
    }

    fn push_state(&self, url: &str) -> Result<(), RouterError> {
        self.history.push_state(url)
    }

    fn query(&self) -> Query {
        Query::parse(&self.history.location().search)
    }

    fn write_query(&self, update: &QueryUpdate, base_url: &str) -> QueryWrite {
        let location = self.history.location();
        let next = Query::parse(&location.search).merged(update);
        QueryWrite::Navigate(url_with_query(base_url, &location.pathname, &next))
    }
}

/// Server-side source: one fixed URL and a replaceable query.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationSource {
    pathname: String,
    query: RefCell<Query>,
}

impl StaticLocationSource {
    /// Source for `url`; its query string seeds the query field.
    pub fn new(url: &str) -> Self {
        let location = Location::parse(url);
        Self {
            pathname: location.pathname,
            query: RefCell::new(Query::parse(&location.search)),
        }
    }

    /// Replace the query (servers receive it separately from the path).
    pub fn with_query(self, query: Query) -> Self {
        *self.query.borrow_mut() = query;
        self
    }
}

impl LocationSource for StaticLocationSource {
    fn environment(&self) -> Environment {
        Environment::Server
    }

    fn location(&self) -> Location {
        let query_string = self.query.borrow().to_query_string();
        Location {
            pathname: self.pathname.clone(),
            search: if query_string.is_empty() {
                String::new()
            } else {
                format!("?{query_string}")
            },
        }
    }

    fn push_state(&self, _url: &str) -> Result<(), RouterError> {
        Err(RouterError::NoHistory(Environment::Server))
    }

    fn query(&self) -> Query {
        self.query.borrow().clone()
    }

    fn write_query(&self, update: &QueryUpdate, _base_url: &str) -> QueryWrite {
        *self.query.borrow_mut() = Query::from_update(update);
        QueryWrite::Stored
    }
}
