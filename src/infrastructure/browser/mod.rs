//! Browser bindings. Only compiled for `wasm32`, where the page runs inside
//! the editor's iframe.

#[cfg(all(test, target_arch = "wasm32"))]
#[path = "browser_test.rs"]
mod tests;

mod bridge;
mod presentation;
mod transport;

use anyhow::anyhow;
use anyhow::Result;
use serde_json::Value;
use wasm_bindgen::JsValue;

pub use bridge::*;
pub use presentation::*;
pub use transport::*;

pub(crate) fn js_error(err: JsValue) -> anyhow::Error {
    return anyhow!(format!("{:?}", err));
}

pub(crate) fn js_to_json(value: &JsValue) -> Result<Value> {
    // `undefined` and functions stringify to `undefined`, not to a string.
    let text = js_sys::JSON::stringify(value)
        .map_err(js_error)?
        .as_string()
        .ok_or_else(|| return anyhow!("Value has no JSON form"))?;
    return Ok(serde_json::from_str(&text)?);
}

pub(crate) fn json_to_js(value: &impl serde::Serialize) -> Result<JsValue> {
    let text = serde_json::to_string(value)?;
    return js_sys::JSON::parse(&text).map_err(js_error);
}
