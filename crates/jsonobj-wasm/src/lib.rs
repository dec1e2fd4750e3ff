//! WASM bindings for jsonobj-core.
//!
//! Exposes `format` and `merge` as `#[wasm_bindgen]` functions that can be
//! called from JavaScript/TypeScript. Built with `wasm-bindgen-cli`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p jsonobj-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/jsonobj_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

/// Parse a document leniently and print it again, compact or tab-indented.
///
/// Never throws: malformed input prints as `null`.
#[wasm_bindgen]
pub fn format(json: &str, pretty: bool) -> String {
    jsonobj_core::print(&jsonobj_core::parse(json), pretty)
}

/// Merge `overrides` into `base` and return the compact result.
///
/// Throws a JS error if an override array is longer than its base array.
#[wasm_bindgen]
pub fn merge(base: &str, overrides: &str) -> std::result::Result<String, JsValue> {
    let mut merged = jsonobj_core::parse(base);
    merged
        .merge(&jsonobj_core::parse(overrides))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(merged.to_string())
}
