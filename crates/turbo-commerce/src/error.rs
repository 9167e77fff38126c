//! Commerce error types.

use thiserror::Error;
use turbo_store::StorageError;

/// Errors that can occur in storefront commerce operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// A product price field is not a whole number.
    #[error("Invalid price {value:?} for product {product_id}")]
    InvalidPrice { product_id: String, value: String },

    /// Persisting the cart failed.
    #[error("Cart storage error: {0}")]
    Storage(#[from] StorageError),
}
