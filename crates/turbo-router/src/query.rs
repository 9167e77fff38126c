//! Flat query-string model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use turbo_store::ShallowEq;

/// Parsed query string: a flat, sorted mapping with no empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(BTreeMap<String, String>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`.
    ///
    /// Keys with empty values are dropped. A repeated key keeps its last
    /// value.
    pub fn parse(search: &str) -> Self {
        let search = search.strip_prefix('?').unwrap_or(search);
        form_urlencoded::parse(search.as_bytes())
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Serialize without the leading `?`. Empty for an empty query.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set `key`. An empty value removes the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `self` with `update` applied on top.
    pub fn merged(&self, update: &QueryUpdate) -> Self {
        let mut next = self.clone();
        for (key, value) in &update.0 {
            match value {
                Some(value) => next.insert(key.clone(), value.clone()),
                None => {
                    next.0.remove(key);
                }
            }
        }
        next
    }

    /// Only the keys `update` sets to a non-empty value.
    pub fn from_update(update: &QueryUpdate) -> Self {
        Self::new().merged(update)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

impl From<BTreeMap<String, String>> for Query {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl ShallowEq for Query {
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}

/// A partial query write.
///
/// `None` or an empty string deletes the key; keys not mentioned keep
/// their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryUpdate(BTreeMap<String, Option<String>>);

impl QueryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), Some(value.into()));
        self
    }

    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for QueryUpdate {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}

/// Parse a query string.
pub fn parse_query(search: &str) -> Query {
    Query::parse(search)
}

/// Serialize a query, skipping empty values.
pub fn stringify_query(query: &Query) -> String {
    query.to_query_string()
}

/// Build `base + pathname + ?query`, where `pathname` may already carry
/// the base prefix.
pub fn url_with_query(base_url: &str, pathname: &str, query: &Query) -> String {
    let path = if base_url.is_empty() {
        pathname
    } else {
        pathname.strip_prefix(base_url).unwrap_or(pathname)
    };
    let query_string = query.to_query_string();
    if query_string.is_empty() {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}{path}?{query_string}")
    }
}
