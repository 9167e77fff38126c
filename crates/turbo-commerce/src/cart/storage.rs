//! Cart persistence.
//!
//! The cart survives reloads by mirroring its state into a
//! [`StorageBackend`] under [`CART_STORAGE_KEY`].

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use turbo_store::{listener, Listener, Storage, StorageBackend};

use crate::cart::{CartAction, CartItem, CartState, CartStore};
use crate::error::CommerceError;

/// Backend key holding the persisted cart.
pub const CART_STORAGE_KEY: &str = "shopping_cart";

/// The persisted shape of a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCart {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub selected_all: bool,
}

/// Reads and writes the persisted cart.
#[derive(Debug)]
pub struct CartStorage {
    storage: Storage<PersistedCart>,
}

impl CartStorage {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self {
            storage: Storage::new(CART_STORAGE_KEY, backend),
        }
    }

    /// The action restoring the persisted cart, if one is stored.
    pub fn load(&self) -> Option<CartAction> {
        self.storage
            .get()
            .map(|cart| CartAction::LoadFromStorage {
                items: cart.items,
                selected_all: cart.selected_all,
            })
    }

    pub fn save(&self, state: &CartState) -> Result<(), CommerceError> {
        self.storage.set(&PersistedCart {
            items: state.items.clone(),
            selected_all: state.selected_all,
        })?;
        Ok(())
    }

    pub fn clear(&self) {
        self.storage.reset();
    }

    pub fn storage(&self) -> &Storage<PersistedCart> {
        &self.storage
    }
}

/// Save `store` into `storage` after every dispatch.
///
/// Returns the listener so the caller can unsubscribe it.
pub fn persist_cart(store: &Rc<CartStore>, storage: Rc<CartStorage>) -> Listener {
    let weak = Rc::downgrade(store);
    let on_change = listener(move || {
        let Some(store) = weak.upgrade() else {
            return;
        };
        if let Err(error) = storage.save(&store.get_state()) {
            warn!(key = CART_STORAGE_KEY, %error, "failed to persist cart");
        }
    });
    store.subscribe(Rc::clone(&on_change));
    on_change
}
