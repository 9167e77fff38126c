//! Storage error types.

use thiserror::Error;

/// Errors that can occur when persisting a value.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to serialize the value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backend rejected the write (quota, private mode, ...).
    #[error("Storage backend error: {0}")]
    Backend(String),
}
