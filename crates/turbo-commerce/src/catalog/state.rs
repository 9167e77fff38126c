//! Product list and detail container.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use turbo_store::{impl_shallow_eq, ShallowEq, Store};

use crate::catalog::{Categories, Product};

/// Progress of the last product load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Pending,
    Done,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Pending => "pending",
            LoadStatus::Done => "done",
        }
    }
}

impl ShallowEq for LoadStatus {
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}

/// State of the product container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductState {
    pub products: Vec<Product>,
    pub total_count: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub status: LoadStatus,
    pub categories: Categories,
    pub current_product: Option<Product>,
    pub related_products: Vec<Product>,
}

impl Default for ProductState {
    /// A fresh container is loading until its first fetch lands.
    fn default() -> Self {
        Self {
            products: Vec::new(),
            total_count: 0,
            loading: true,
            error: None,
            status: LoadStatus::Idle,
            categories: Categories::new(),
            current_product: None,
            related_products: Vec::new(),
        }
    }
}

impl_shallow_eq!(ProductState {
    products,
    total_count,
    loading,
    error,
    status,
    categories,
    current_product,
    related_products,
});

impl ProductState {
    /// More pages are available.
    pub fn has_more(&self) -> bool {
        (self.products.len() as u64) < self.total_count
    }

    /// Something has been loaded: a list or a detail product.
    pub fn has_data(&self) -> bool {
        self.status != LoadStatus::Idle && (!self.products.is_empty() || self.current_product.is_some())
    }

    /// The home page list is ready to render.
    pub fn has_home_page_data(&self) -> bool {
        self.status != LoadStatus::Idle && !self.products.is_empty()
    }

    /// The detail page for `product_id` is ready to render.
    pub fn has_product_detail(&self, product_id: &str) -> bool {
        self.current_product
            .as_ref()
            .is_some_and(|p| p.product_id == product_id)
    }

    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }
}

/// Partial update of [`ProductState`]; `None` fields are left unchanged.
///
/// `error` and `current_product` are doubly optional so that they can be
/// cleared: `Some(None)` resets them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSetup {
    pub products: Option<Vec<Product>>,
    pub total_count: Option<u64>,
    pub loading: Option<bool>,
    pub error: Option<Option<String>>,
    pub status: Option<LoadStatus>,
    pub categories: Option<Categories>,
    pub current_product: Option<Option<Product>>,
    pub related_products: Option<Vec<Product>>,
}

impl ProductSetup {
    /// Setup marking a load as started.
    pub fn pending() -> Self {
        Self {
            loading: Some(true),
            status: Some(LoadStatus::Pending),
            error: Some(None),
            ..Self::default()
        }
    }

    /// Setup marking a load as finished without error.
    pub fn done() -> Self {
        Self {
            loading: Some(false),
            status: Some(LoadStatus::Done),
            error: Some(None),
            ..Self::default()
        }
    }

    /// Reset every field to its initial value, then apply `self` on top.
    pub fn over_initial(self) -> Self {
        let initial = ProductState::default();
        Self {
            products: self.products.or(Some(initial.products)),
            total_count: self.total_count.or(Some(initial.total_count)),
            loading: self.loading.or(Some(initial.loading)),
            error: self.error.or(Some(initial.error)),
            status: self.status.or(Some(initial.status)),
            categories: self.categories.or(Some(initial.categories)),
            current_product: self.current_product.or(Some(initial.current_product)),
            related_products: self.related_products.or(Some(initial.related_products)),
        }
    }
}

/// Actions accepted by the product container.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    Setup(ProductSetup),
    /// Replace the list after a fresh search.
    SetProducts { products: Vec<Product>, total_count: u64 },
    /// Append the next page.
    AddProducts { products: Vec<Product>, total_count: u64 },
    SetLoading(bool),
    SetError(String),
    SetStatus(LoadStatus),
    SetCategories(Categories),
    SetCurrentProduct(Product),
    SetRelatedProducts(Vec<Product>),
}

/// Product container reducer.
pub fn product_reducer(state: &ProductState, action: ProductAction) -> ProductState {
    let mut next = state.clone();
    match action {
        ProductAction::Setup(setup) => {
            if let Some(products) = setup.products {
                next.products = products;
            }
            if let Some(total_count) = setup.total_count {
                next.total_count = total_count;
            }
            if let Some(loading) = setup.loading {
                next.loading = loading;
            }
            if let Some(error) = setup.error {
                next.error = error;
            }
            if let Some(status) = setup.status {
                next.status = status;
            }
            if let Some(categories) = setup.categories {
                next.categories = categories;
            }
            if let Some(current_product) = setup.current_product {
                next.current_product = current_product;
            }
            if let Some(related_products) = setup.related_products {
                next.related_products = related_products;
            }
        }
        ProductAction::SetProducts { products, total_count } => {
            next.products = products;
            next.total_count = total_count;
            finish(&mut next);
        }
        ProductAction::AddProducts { products, total_count } => {
            next.products.extend(products);
            next.total_count = total_count;
            finish(&mut next);
        }
        ProductAction::SetLoading(loading) => next.loading = loading,
        ProductAction::SetError(error) => {
            next.error = Some(error);
            next.loading = false;
            next.status = LoadStatus::Done;
        }
        ProductAction::SetStatus(status) => next.status = status,
        ProductAction::SetCategories(categories) => next.categories = categories,
        ProductAction::SetCurrentProduct(product) => {
            next.current_product = Some(product);
            finish(&mut next);
        }
        ProductAction::SetRelatedProducts(products) => next.related_products = products,
    }
    next
}

fn finish(state: &mut ProductState) {
    state.loading = false;
    state.error = None;
    state.status = LoadStatus::Done;
}

/// The product container type.
pub type ProductStore = Store<ProductState, ProductAction>;

/// Create a shared product container.
pub fn create_product_store(initial: ProductState) -> Rc<ProductStore> {
    Store::shared(initial, product_reducer)
}
