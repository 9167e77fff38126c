//! Cart line items.

use serde::{Deserialize, Serialize};
use turbo_store::ShallowEq;

use crate::catalog::Product;
use crate::ids::ProductId;

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub image: String,
    /// Unit price.
    pub price: u64,
    pub quantity: u32,
    #[serde(default)]
    pub selected: bool,
}

impl CartItem {
    /// Line for `quantity` units of `product`, unselected.
    ///
    /// A product whose price does not parse is carried at price 0.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.product_id.clone(),
            title: product.title.clone(),
            image: product.image.clone(),
            price: product.price().unwrap_or_default(),
            quantity: quantity.max(1),
            selected: false,
        }
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

impl ShallowEq for CartItem {
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}
