//! Browser transport surface (`web` feature, `wasm32` only).

use serde_json::Value;
use tracing::warn;
use wasm_bindgen::JsValue;

use crate::port::{InitialDataPort, DEFAULT_TRANSPORT_KEY};

/// The `window[key]` global the server render embedded in the page.
#[derive(Debug, Clone)]
pub struct WindowTransport {
    key: String,
}

impl Default for WindowTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSPORT_KEY)
    }
}

impl WindowTransport {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl InitialDataPort for WindowTransport {
    fn peek(&self) -> Option<Value> {
        let window = web_sys::window()?;
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str(&self.key)).ok()?;
        if raw.is_undefined() || raw.is_null() {
            return None;
        }
        let text = js_sys::JSON::stringify(&raw).ok()?.as_string()?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key = %self.key, %error, "unreadable initial data");
                None
            }
        }
    }

    fn clear(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let key = JsValue::from_str(&self.key);
        if js_sys::Reflect::delete_property(&window, &key).unwrap_or(false) {
            return;
        }
        warn!(key = %self.key, "initial data global cannot be deleted, overwriting with undefined");
        if js_sys::Reflect::set(&window, &key, &JsValue::UNDEFINED).is_err() {
            warn!(key = %self.key, "initial data global is read-only");
        }
    }
}
