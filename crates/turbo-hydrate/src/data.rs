//! The initial-data bag a server render hands to the client.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use turbo_commerce::cart::{CartAction, CartItem};
use turbo_commerce::catalog::{Categories, LoadStatus, Product, ProductAction, ProductSetup};

use crate::error::HydrationError;

/// Data a server render computed, keyed as the client expects it.
///
/// Every field is optional; a page only carries what it rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Categories>,
    /// A `null` count is present and reads as zero.
    #[serde(default, deserialize_with = "present_count", skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_product: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_items: Option<Vec<CartItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_selected_all: Option<bool>,
}

fn present_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(Some(Option::<u64>::deserialize(deserializer)?.unwrap_or(0)))
}

impl InitialData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data for a product list page.
    pub fn list(products: Vec<Product>, categories: Categories, total_count: u64) -> Self {
        Self {
            products: Some(products),
            categories: Some(categories),
            total_count: Some(total_count),
            ..Self::default()
        }
    }

    /// Data for a product detail page.
    pub fn detail(product: Product, related: Vec<Product>) -> Self {
        Self {
            current_product: Some(product),
            related_products: Some(related),
            ..Self::default()
        }
    }

    pub fn with_cart(mut self, items: Vec<CartItem>, selected_all: bool) -> Self {
        self.cart_items = Some(items);
        self.cart_selected_all = Some(selected_all);
        self
    }

    /// Decode a transport value.
    pub fn from_transport(value: &Value) -> Result<Self, HydrationError> {
        Ok(Self::deserialize(value)?)
    }

    /// Encode for the transport surface.
    pub fn to_transport(&self) -> Result<Value, HydrationError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Any part of the product list is present.
    pub fn has_product_list(&self) -> bool {
        self.products.is_some() || self.categories.is_some() || self.total_count.is_some()
    }

    /// Product container actions, in replay order.
    ///
    /// Every action leaves the container not loading.
    pub fn product_actions(&self) -> Vec<ProductAction> {
        let mut actions = Vec::new();
        if self.has_product_list() {
            actions.push(ProductAction::Setup(ProductSetup {
                products: Some(self.products.clone().unwrap_or_default()),
                categories: Some(self.categories.clone().unwrap_or_default()),
                total_count: Some(self.total_count.unwrap_or(0)),
                loading: Some(false),
                error: Some(None),
                status: Some(LoadStatus::Done),
                ..ProductSetup::default()
            }));
        }
        if let Some(product) = &self.current_product {
            actions.push(ProductAction::SetCurrentProduct(product.clone()));
        }
        if let Some(related) = &self.related_products {
            actions.push(ProductAction::SetRelatedProducts(related.clone()));
        }
        actions
    }

    /// Cart container action, if cart items are present.
    pub fn cart_action(&self) -> Option<CartAction> {
        self.cart_items.as_ref().map(|items| CartAction::LoadFromStorage {
            items: items.clone(),
            selected_all: self.cart_selected_all.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_transport_keys() {
        let value = json!({
            "products": [{"productId": "1", "title": "A", "lprice": "100"}],
            "totalCount": 10,
            "cartItems": [{"id": "1", "title": "A", "price": 100, "quantity": 2, "selected": true}],
            "somethingElse": true
        });

        let data = InitialData::from_transport(&value).unwrap();
        assert_eq!(data.products.as_ref().map(Vec::len), Some(1));
        assert_eq!(data.total_count, Some(10));
        assert_eq!(data.categories, None);
        assert_eq!(data.cart_items.as_ref().unwrap()[0].quantity, 2);
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let value = json!({ "totalCount": "many" });
        assert!(matches!(
            InitialData::from_transport(&value),
            Err(HydrationError::Decode(_))
        ));
    }

    #[test]
    fn test_list_setup_fills_defaults() {
        let data = InitialData {
            total_count: Some(0),
            ..InitialData::default()
        };
        let actions = data.product_actions();
        assert_eq!(actions.len(), 1);
        let ProductAction::Setup(setup) = &actions[0] else {
            panic!("expected setup, got {:?}", actions[0]);
        };
        assert_eq!(setup.products, Some(vec![]));
        assert_eq!(setup.categories, Some(Categories::new()));
        assert_eq!(setup.loading, Some(false));
        assert_eq!(setup.status, Some(LoadStatus::Done));
    }

    #[test]
    fn test_detail_actions() {
        let data = InitialData::detail(Product::new("7", "Lamp", "30000"), vec![Product::new("8", "Bulb", "900")]);
        let actions = data.product_actions();
        assert!(matches!(actions[0], ProductAction::SetCurrentProduct(ref p) if p.product_id == "7"));
        assert!(matches!(actions[1], ProductAction::SetRelatedProducts(ref r) if r.len() == 1));
        assert_eq!(data.cart_action(), None);
    }

    #[test]
    fn test_cart_selected_all_defaults_false() {
        let data = InitialData {
            cart_items: Some(vec![]),
            ..InitialData::default()
        };
        assert_eq!(
            data.cart_action(),
            Some(CartAction::LoadFromStorage { items: vec![], selected_all: false })
        );
    }

    #[test]
    fn test_to_transport_omits_absent_fields() {
        let value = InitialData::list(vec![], Categories::new(), 0).to_transport().unwrap();
        assert_eq!(value, json!({ "products": [], "categories": {}, "totalCount": 0 }));
        assert!(InitialData::new().is_empty());
    }

    #[test]
    fn test_null_total_count_is_present() {
        let data = InitialData::from_transport(&json!({ "totalCount": null })).unwrap();
        assert_eq!(data.total_count, Some(0));
        assert!(data.has_product_list());
        assert_eq!(data.product_actions().len(), 1);

        let data = InitialData::from_transport(&json!({ "products": null, "categories": null })).unwrap();
        assert!(!data.has_product_list());
        assert!(data.product_actions().is_empty());
    }
}
