//! Browser bindings (`web` feature, `wasm32` only).

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, Window};

use crate::error::RouterError;
use crate::link::{LinkTarget, RouterLink};
use crate::location::{History, Location};
use crate::router::Router;

/// [`History`] over `window.history` and `window.location`.
#[derive(Debug, Clone)]
pub struct WindowHistory {
    window: Window,
}

impl WindowHistory {
    /// `None` outside a browser window (workers, Node).
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl History for WindowHistory {
    fn location(&self) -> Location {
        let location = self.window.location();
        Location {
            pathname: location.pathname().unwrap_or_else(|_| "/".to_string()),
            search: location.search().unwrap_or_default(),
        }
    }

    fn push_state(&self, url: &str) -> Result<(), RouterError> {
        let history = self.window.history().map_err(js_error)?;
        history
            .push_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(js_error)
    }
}

impl LinkTarget for Element {
    fn closest_link(&self, attribute: &str) -> Option<RouterLink> {
        let link = self.closest(&format!("[{attribute}]")).ok().flatten()?;
        Some(RouterLink {
            href: link.get_attribute("href"),
        })
    }
}

/// Wire `popstate` on the window and `click` on the document to `router`.
///
/// The listeners live for the rest of the page.
pub fn install_listeners<H: Clone + 'static>(router: Rc<Router<H>>) -> Result<(), RouterError> {
    let window = web_sys::window().ok_or_else(|| RouterError::History("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| RouterError::History("no document".into()))?;

    let pop_router = Rc::clone(&router);
    let on_pop = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        pop_router.handle_pop_state();
    });
    window
        .add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_pop.forget();

    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if router.handle_click(&element).should_prevent_default() {
            event.prevent_default();
        }
    });
    document
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_click.forget();

    Ok(())
}

fn js_error(value: JsValue) -> RouterError {
    RouterError::History(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
