//! System clipboard via `navigator.clipboard.readText()`.

use async_trait::async_trait;
use content_store::{ClipboardError, ClipboardReader};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

pub struct BrowserClipboard;

#[async_trait(?Send)]
impl ClipboardReader for BrowserClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        let window = web_sys::window().ok_or(ClipboardError::Unsupported)?;
        let navigator = window.navigator();

        // Not every browser (or insecure context) exposes the async clipboard
        let clipboard = Reflect::get(navigator.as_ref(), &JsValue::from_str("clipboard"))
            .map_err(|_| ClipboardError::Unsupported)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(ClipboardError::Unsupported);
        }
        let read_text: Function = Reflect::get(&clipboard, &JsValue::from_str("readText"))
            .ok()
            .and_then(|f| f.dyn_into().ok())
            .ok_or(ClipboardError::Unsupported)?;

        let promise: Promise = read_text
            .call0(&clipboard)
            .map_err(|e| ClipboardError::Read(describe(&e)))?
            .dyn_into()
            .map_err(|_| ClipboardError::Unsupported)?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| ClipboardError::Read(describe(&e)))?;

        text.as_string()
            .ok_or_else(|| ClipboardError::Read("clipboard did not contain text".to_string()))
    }
}

fn describe(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
