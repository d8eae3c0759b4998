//! WebAssembly bindings for the bridge.
//!
//! Arguments and replies cross the boundary as JSON text, the same shape the
//! native shells exchange.

use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::bridge::ConfigBridge;
use crate::view::HeadlessView;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A bridge session without a camera.
#[wasm_bindgen]
pub struct WasmBridge {
    inner: ConfigBridge<HeadlessView>,
}

#[wasm_bindgen]
impl WasmBridge {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: ConfigBridge::new(HeadlessView::default()),
        }
    }

    #[wasm_bindgen(js_name = startSession)]
    pub fn start_session(&mut self, license_key: &str) {
        self.inner.start_session(license_key);
    }

    #[wasm_bindgen(js_name = endSession)]
    pub fn end_session(&mut self) {
        self.inner.end_session();
    }

    /// Run a command.
    ///
    /// `argument` is JSON text (`"null"` for commands without argument).
    /// Returns `{"result": ...}` or `{"error": {code, message, details}}`.
    pub fn dispatch(&mut self, name: &str, argument: &str) -> Result<String, JsValue> {
        let argument: Value = serde_json::from_str(argument).map_err(js_error)?;
        let reply = self.inner.answer(name, &argument);
        serde_json::to_string(&reply).map_err(js_error)
    }
}

impl Default for WasmBridge {
    fn default() -> Self {
        Self::new()
    }
}
