//! Cart line items, the cart container and its persistence.

mod item;
mod state;
mod storage;

pub use item::CartItem;
pub use state::{cart_reducer, create_cart_store, CartAction, CartState, CartStore};
pub use storage::{persist_cart, CartStorage, PersistedCart, CART_STORAGE_KEY};
