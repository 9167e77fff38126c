//! Product records as served by the shopping API.

use serde::{Deserialize, Serialize};
use turbo_store::ShallowEq;

use crate::error::CommerceError;
use crate::ids::ProductId;

/// A product in the catalog.
///
/// Prices arrive as decimal strings (`"220"`), exactly as the search API
/// returns them; see [`Product::price`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image: String,
    /// Lowest offered price.
    #[serde(default)]
    pub lprice: String,
    /// Highest offered price; empty when there is a single offer.
    #[serde(default)]
    pub hprice: String,
    #[serde(default)]
    pub mall_name: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub maker: String,
    #[serde(default)]
    pub category1: String,
    #[serde(default)]
    pub category2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category4: Option<String>,

    // Detail-page fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Product {
    /// Create a product with the listing fields every record carries.
    pub fn new(product_id: impl Into<ProductId>, title: impl Into<String>, lprice: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            title: title.into(),
            lprice: lprice.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_categories(mut self, category1: impl Into<String>, category2: impl Into<String>) -> Self {
        self.category1 = category1.into();
        self.category2 = category2.into();
        self
    }

    /// The lowest price as a number.
    pub fn price(&self) -> Result<u64, CommerceError> {
        self.lprice
            .trim()
            .parse()
            .map_err(|_| CommerceError::InvalidPrice {
                product_id: self.product_id.to_string(),
                value: self.lprice.clone(),
            })
    }

    /// Category path from the top level down, skipping empty levels.
    pub fn category_path(&self) -> Vec<&str> {
        [
            Some(self.category1.as_str()),
            Some(self.category2.as_str()),
            self.category3.as_deref(),
            self.category4.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|c| !c.is_empty())
        .collect()
    }
}

impl ShallowEq for Product {
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "title": "pvc 투명 젤리 쇼핑백",
            "link": "https://search.shopping.naver.com/gate.nhn?id=82094468339",
            "image": "https://shopping-phinf.pstatic.net/main_8209446/82094468339.jpg",
            "lprice": "220",
            "hprice": "",
            "mallName": "기브N기브",
            "productId": "82094468339",
            "productType": "2",
            "brand": "",
            "maker": "",
            "category1": "생활/건강",
            "category2": "생활용품",
            "category3": "생활잡화",
            "category4": "쇼핑백"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_id, "82094468339");
        assert_eq!(product.mall_name, "기브N기브");
        assert_eq!(product.price().unwrap(), 220);
        assert_eq!(product.category_path(), ["생활/건강", "생활용품", "생활잡화", "쇼핑백"]);
        assert_eq!(product.rating, None);
    }

    #[test]
    fn test_serialize_is_camel_case_without_absent_details() {
        let product = Product::new("p1", "Phone", "1000");
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["productId"], "p1");
        assert_eq!(value["mallName"], "");
        assert!(value.get("reviewCount").is_none());
    }

    #[test]
    fn test_invalid_price() {
        let product = Product::new("p1", "Phone", "about 10");
        assert!(matches!(
            product.price(),
            Err(CommerceError::InvalidPrice { ref value, .. }) if value == "about 10"
        ));
    }
}
