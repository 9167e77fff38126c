//! Cart container.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use turbo_store::{impl_shallow_eq, Store};

use crate::cart::CartItem;
use crate::catalog::Product;
use crate::ids::ProductId;

/// State of the cart container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    pub items: Vec<CartItem>,
    /// Every line is selected (false for an empty cart).
    pub selected_all: bool,
}

impl_shallow_eq!(CartState { items, selected_all });

impl CartState {
    /// Number of distinct lines.
    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Price of every line.
    pub fn total_price(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|i| i.selected).count()
    }

    /// Price of the selected lines.
    pub fn selected_price(&self) -> u64 {
        self.items
            .iter()
            .filter(|i| i.selected)
            .map(CartItem::line_total)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    fn refresh_selected_all(&mut self) {
        self.selected_all = !self.items.is_empty() && self.items.iter().all(|i| i.selected);
    }
}

/// Actions accepted by the cart container.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Restore a persisted cart as-is.
    LoadFromStorage { items: Vec<CartItem>, selected_all: bool },
    /// Add units of a product, merging into its existing line.
    AddItem { product: Product, quantity: u32 },
    RemoveItem(ProductId),
    /// Set a line's quantity; values below 1 are raised to 1.
    UpdateQuantity { id: ProductId, quantity: u32 },
    ToggleSelect(ProductId),
    SelectAll,
    DeselectAll,
    RemoveSelected,
    ClearCart,
}

/// Cart container reducer.
pub fn cart_reducer(state: &CartState, action: CartAction) -> CartState {
    let mut next = state.clone();
    match action {
        CartAction::LoadFromStorage { items, selected_all } => {
            next.items = items;
            next.selected_all = selected_all;
            return next;
        }
        CartAction::AddItem { product, quantity } => {
            match next.items.iter_mut().find(|i| i.id == product.product_id) {
                Some(line) => line.quantity = line.quantity.saturating_add(quantity.max(1)),
                None => next.items.push(CartItem::from_product(&product, quantity)),
            }
        }
        CartAction::RemoveItem(id) => next.items.retain(|i| i.id != id),
        CartAction::UpdateQuantity { id, quantity } => {
            if let Some(line) = next.items.iter_mut().find(|i| i.id == id) {
                line.quantity = quantity.max(1);
            }
        }
        CartAction::ToggleSelect(id) => {
            if let Some(line) = next.items.iter_mut().find(|i| i.id == id) {
                line.selected = !line.selected;
            }
        }
        CartAction::SelectAll => next.items.iter_mut().for_each(|i| i.selected = true),
        CartAction::DeselectAll => next.items.iter_mut().for_each(|i| i.selected = false),
        CartAction::RemoveSelected => next.items.retain(|i| !i.selected),
        CartAction::ClearCart => next.items.clear(),
    }
    next.refresh_selected_all();
    next
}

/// The cart container type.
pub type CartStore = Store<CartState, CartAction>;

/// Create a shared cart container.
pub fn create_cart_store(initial: CartState) -> Rc<CartStore> {
    Store::shared(initial, cart_reducer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(state: &CartState, id: &str, price: &str, quantity: u32) -> CartState {
        cart_reducer(
            state,
            CartAction::AddItem {
                product: Product::new(id, format!("Item {id}"), price),
                quantity,
            },
        )
    }

    #[test]
    fn test_add_merges_lines() {
        let state = add(&CartState::default(), "a", "1000", 1);
        let state = add(&state, "a", "1000", 2);
        let state = add(&state, "b", "500", 1);

        assert_eq!(state.total_count(), 2);
        assert_eq!(state.total_quantity(), 4);
        assert_eq!(state.total_price(), 3500);
    }

    #[test]
    fn test_update_quantity_clamps() {
        let state = add(&CartState::default(), "a", "1000", 3);
        let state = cart_reducer(&state, CartAction::UpdateQuantity { id: "a".into(), quantity: 0 });
        assert_eq!(state.item(&"a".into()).unwrap().quantity, 1);
    }

    #[test]
    fn test_selection_tracks_selected_all() {
        let state = add(&add(&CartState::default(), "a", "1000", 1), "b", "500", 1);
        assert!(!state.selected_all);

        let state = cart_reducer(&state, CartAction::ToggleSelect("a".into()));
        assert!(!state.selected_all);
        assert_eq!(state.selected_count(), 1);
        assert_eq!(state.selected_price(), 1000);

        let state = cart_reducer(&state, CartAction::ToggleSelect("b".into()));
        assert!(state.selected_all);

        let state = add(&state, "c", "10", 1);
        assert!(!state.selected_all);

        let state = cart_reducer(&state, CartAction::SelectAll);
        assert!(state.selected_all);
        let state = cart_reducer(&state, CartAction::DeselectAll);
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn test_remove_selected_and_clear() {
        let state = add(&add(&CartState::default(), "a", "1000", 1), "b", "500", 1);
        let state = cart_reducer(&state, CartAction::ToggleSelect("a".into()));
        let state = cart_reducer(&state, CartAction::RemoveSelected);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, "b");
        assert!(!state.selected_all);

        let state = cart_reducer(&state, CartAction::ClearCart);
        assert!(state.is_empty());
        assert!(!state.selected_all);
    }

    #[test]
    fn test_load_from_storage_keeps_flag() {
        let items = vec![CartItem::from_product(&Product::new("a", "A", "1"), 1)];
        let state = cart_reducer(
            &CartState::default(),
            CartAction::LoadFromStorage { items: items.clone(), selected_all: true },
        );
        assert_eq!(state.items, items);
        assert!(state.selected_all);
    }

    #[test]
    fn test_store_notifies() {
        let store = create_cart_store(CartState::default());
        let count = Rc::new(std::cell::Cell::new(0));
        let c = Rc::clone(&count);
        store.subscribe(turbo_store::listener(move || c.set(c.get() + 1)));

        store.dispatch(CartAction::AddItem { product: Product::new("a", "A", "1"), quantity: 1 });
        store.dispatch(CartAction::RemoveItem("a".into()));
        assert_eq!(count.get(), 2);
        assert!(store.get_state().is_empty());
    }
}
