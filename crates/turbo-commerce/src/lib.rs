//! Storefront state containers for TurboCommerce.
//!
//! This crate provides the two containers every storefront page reads:
//!
//! - **Catalog**: products, categories, list/detail loading state
//! - **Cart**: line items, selection, persistence
//!
//! Both are [`turbo_store::Store`]s driven by exhaustive action enums.
//!
//! # Example
//!
//! ```rust
//! use turbo_commerce::prelude::*;
//!
//! let products = create_product_store(ProductState::default());
//! products.dispatch(ProductAction::SetProducts {
//!     products: vec![Product::new("p1", "USB-C cable", "4900")],
//!     total_count: 1,
//! });
//!
//! let cart = create_cart_store(CartState::default());
//! cart.dispatch(CartAction::AddItem {
//!     product: products.get_state().products[0].clone(),
//!     quantity: 2,
//! });
//! assert_eq!(cart.get_state().total_price(), 9800);
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        create_product_store, product_reducer, Categories, LoadStatus, Product, ProductAction,
        ProductSetup, ProductState, ProductStore,
    };

    // Cart
    pub use crate::cart::{
        cart_reducer, create_cart_store, persist_cart, CartAction, CartItem, CartState,
        CartStorage, CartStore,
    };
}
