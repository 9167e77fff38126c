//! Router error types.

use thiserror::Error;
use turbo_store::Environment;

/// Errors raised while mutating navigation history.
///
/// [`Router::push`](crate::Router::push) catches these at its boundary and
/// logs them; they only surface from the lower-level [`History`](crate::History)
/// and [`LocationSource`](crate::LocationSource) APIs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The target URL has a different origin than the current document.
    #[error("Cross-origin navigation to {0} is not allowed")]
    CrossOrigin(String),

    /// The history backend rejected the entry.
    #[error("History error: {0}")]
    History(String),

    /// The location source has no history to push onto.
    #[error("No navigation history in {0} environment")]
    NoHistory(Environment),
}
