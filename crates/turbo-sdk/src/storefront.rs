//! Storefront boot wiring.
//!
//! A [`Storefront`] owns one router and the product and cart containers
//! for a single render environment:
//!
//! - server: the router resolves the request URL, pages fill the
//!   containers, and [`Storefront::initial_data`] captures what the client
//!   needs to pick up where the server left off;
//! - client: [`Storefront::boot`] replays that data into the containers,
//!   then starts the router, so the first interactive render sees the
//!   server's state.

use std::rc::Rc;

use tracing::{debug, info};
use turbo_commerce::cart::{create_cart_store, persist_cart, CartState, CartStorage, CartStore};
use turbo_commerce::catalog::{create_product_store, LoadStatus, ProductState, ProductStore};
use turbo_hydrate::{HydrationBridge, HydrationError, InitialData, InitialDataPort, TransportSlot};
use turbo_router::{History, Query, Router, StaticLocationSource};
use turbo_store::{Environment, Listener, ShallowEq, SyncExternalStore};

use crate::config::StorefrontConfig;

/// Router, containers and hydration for one render environment.
pub struct Storefront<H> {
    config: StorefrontConfig,
    environment: Environment,
    router: Rc<Router<H>>,
    products: Rc<ProductStore>,
    cart: Rc<CartStore>,
    bridge: HydrationBridge,
}

impl<H: Clone + 'static> Storefront<H> {
    /// Client storefront navigating `history`.
    pub fn client<P: AsRef<str>>(
        config: StorefrontConfig,
        history: Rc<dyn History>,
        routes: impl IntoIterator<Item = (P, H)>,
    ) -> Self {
        let router = Router::client(config.router.clone(), history).with_routes(routes);
        Self::assemble(config, Environment::Client, router)
    }

    /// Server storefront rendering `url` with `query`.
    pub fn server<P: AsRef<str>>(
        config: StorefrontConfig,
        url: &str,
        query: Query,
        routes: impl IntoIterator<Item = (P, H)>,
    ) -> Self {
        let location = StaticLocationSource::new(url).with_query(query);
        let router = Router::new(config.router.clone(), location).with_routes(routes);
        Self::assemble(config, Environment::Server, router)
    }

    /// Storefront for the configured (or detected) environment.
    ///
    /// `history` is used on the client and `url` on the server.
    pub fn from_config<P: AsRef<str>>(
        config: StorefrontConfig,
        history: impl FnOnce() -> Rc<dyn History>,
        url: &str,
        routes: impl IntoIterator<Item = (P, H)>,
    ) -> Self {
        match config.environment() {
            Environment::Client => Self::client(config, history(), routes),
            Environment::Server => Self::server(config, url, Query::new(), routes),
        }
    }

    fn assemble(config: StorefrontConfig, environment: Environment, router: Router<H>) -> Self {
        Self {
            config,
            environment,
            router: Rc::new(router),
            products: create_product_store(ProductState::default()),
            cart: create_cart_store(CartState::default()),
            bridge: HydrationBridge::new(environment),
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn router(&self) -> &Rc<Router<H>> {
        &self.router
    }

    pub fn products(&self) -> &Rc<ProductStore> {
        &self.products
    }

    pub fn cart(&self) -> &Rc<CartStore> {
        &self.cart
    }

    /// In-process transport slot under the configured key.
    pub fn transport(&self) -> TransportSlot {
        TransportSlot::new(self.config.transport_key.as_str())
    }

    /// The page global the server render embedded, under the configured key.
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    pub fn window_transport(&self) -> turbo_hydrate::WindowTransport {
        turbo_hydrate::WindowTransport::new(self.config.transport_key.as_str())
    }

    /// Replay initial data from `port` into the containers (client only).
    pub fn hydrate(&self, port: &dyn InitialDataPort) -> bool {
        self.bridge.hydrate(port, &self.products, &self.cart)
    }

    /// Hydrate (client only), then start the router.
    ///
    /// Returns whether hydration applied anything.
    pub fn boot(&self, port: &dyn InitialDataPort) -> bool {
        let hydrated = self.environment.is_client() && self.hydrate(port);
        self.router.start();
        info!(
            storefront = %self.config.name,
            environment = %self.environment,
            route = ?self.router.route().map(|r| r.path.clone()),
            hydrated,
            "storefront booted"
        );
        hydrated
    }

    /// Restore the persisted cart and keep persisting it (client only).
    ///
    /// Returns the persisting listener, or `None` on a server.
    pub fn attach_cart_storage(&self, storage: Rc<CartStorage>) -> Option<Listener> {
        if self.environment.is_server() {
            debug!("cart storage is client-only");
            return None;
        }
        if let Some(restore) = storage.load() {
            self.cart.dispatch(restore);
        }
        Some(persist_cart(&self.cart, storage))
    }

    /// What the client needs to resume from the current container state.
    pub fn initial_data(&self) -> InitialData {
        let state = self.products.get_state();
        let mut data = InitialData::new();

        if state.status != LoadStatus::Idle && (!state.products.is_empty() || state.has_categories()) {
            data.products = Some(state.products.clone());
            data.categories = Some(state.categories.clone());
            data.total_count = Some(state.total_count);
        }
        if let Some(product) = &state.current_product {
            data.current_product = Some(product.clone());
            data.related_products = Some(state.related_products.clone());
        }
        data
    }

    /// Publish [`initial_data`](Self::initial_data) on `slot`.
    pub fn publish(&self, slot: &TransportSlot) -> Result<(), HydrationError> {
        slot.publish(self.initial_data().to_transport()?);
        Ok(())
    }

    /// Binding over a projection of the product state.
    pub fn product_binding<R: ShallowEq + 'static>(
        &self,
        selector: impl Fn(&ProductState) -> R + 'static,
    ) -> SyncExternalStore<ProductStore, R> {
        SyncExternalStore::with_selector(Rc::clone(&self.products), self.environment, selector)
    }

    /// Binding over a projection of the cart state.
    pub fn cart_binding<R: ShallowEq + 'static>(
        &self,
        selector: impl Fn(&CartState) -> R + 'static,
    ) -> SyncExternalStore<CartStore, R> {
        SyncExternalStore::with_selector(Rc::clone(&self.cart), self.environment, selector)
    }

    /// Binding over route, params and query.
    pub fn router_binding(&self) -> SyncExternalStore<Router<H>> {
        SyncExternalStore::new(Rc::clone(&self.router), self.environment)
    }
}
