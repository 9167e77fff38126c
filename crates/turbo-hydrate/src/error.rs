//! Hydration error types.

use thiserror::Error;

/// Errors that can occur while moving initial data between server and client.
#[derive(Error, Debug)]
pub enum HydrationError {
    /// The transport value does not have the expected shape.
    #[error("Invalid initial data: {0}")]
    Decode(String),

    /// Serializing initial data failed.
    #[error("Failed to encode initial data: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for HydrationError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            HydrationError::Decode(e.to_string())
        } else {
            HydrationError::Encode(e.to_string())
        }
    }
}
