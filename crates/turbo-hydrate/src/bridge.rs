//! Replays server-rendered initial data into client containers.

use serde_json::Value;
use tracing::{debug, error};
use turbo_commerce::cart::CartStore;
use turbo_commerce::catalog::ProductStore;
use turbo_store::Environment;

use crate::data::InitialData;
use crate::error::HydrationError;
use crate::port::InitialDataPort;

/// One-shot hydration of the product and cart containers.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use turbo_commerce::prelude::*;
/// use turbo_hydrate::{HydrationBridge, TransportSlot};
/// use turbo_store::Environment;
///
/// let products = create_product_store(ProductState::default());
/// let cart = create_cart_store(CartState::default());
/// let slot = TransportSlot::default();
/// slot.publish(json!({ "products": [], "totalCount": 0 }));
///
/// let bridge = HydrationBridge::new(Environment::Client);
/// assert!(bridge.hydrate(&slot, &products, &cart));
/// assert!(!products.get_state().loading);
///
/// // The slot is consumed.
/// assert!(!bridge.hydrate(&slot, &products, &cart));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HydrationBridge {
    environment: Environment,
}

impl HydrationBridge {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Replay the transport value into `products` and `cart`.
    ///
    /// Returns `false` without touching anything on a server or when the
    /// port holds no non-empty object. Otherwise the port is cleared
    /// afterwards whatever happens, and the result reports whether every
    /// dispatch went through.
    pub fn hydrate(&self, port: &dyn InitialDataPort, products: &ProductStore, cart: &CartStore) -> bool {
        if self.environment.is_server() {
            debug!("skipping hydration on server");
            return false;
        }

        let Some(value) = port.peek().filter(has_keys) else {
            debug!("no initial data to hydrate");
            return false;
        };

        let _clear = ClearOnDrop(port);
        match replay(&value, products, cart) {
            Ok(dispatches) => {
                debug!(dispatches, "hydrated containers from initial data");
                true
            }
            Err(error) => {
                error!(%error, "hydration failed");
                false
            }
        }
    }
}

fn has_keys(value: &Value) -> bool {
    value.as_object().is_some_and(|object| !object.is_empty())
}

fn replay(value: &Value, products: &ProductStore, cart: &CartStore) -> Result<usize, HydrationError> {
    let data = InitialData::from_transport(value)?;
    let product_actions = data.product_actions();
    let cart_action = data.cart_action();

    let mut dispatches = 0;
    for action in product_actions {
        products.dispatch(action);
        dispatches += 1;
    }
    if let Some(action) = cart_action {
        cart.dispatch(action);
        dispatches += 1;
    }
    Ok(dispatches)
}

/// Clears the port when dropped, unwinding included.
struct ClearOnDrop<'a>(&'a dyn InitialDataPort);

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}
