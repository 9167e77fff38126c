//! Catalog types and the product container.

mod product;
mod state;

use std::collections::BTreeMap;

pub use product::Product;
pub use state::{
    create_product_store, product_reducer, LoadStatus, ProductAction, ProductSetup, ProductState,
    ProductStore,
};

/// Two-level category tree: top-level name to sub-category entries.
pub type Categories = BTreeMap<String, BTreeMap<String, serde_json::Value>>;
