//! WASM bindings for wave-core.
//!
//! Exposes `parse`, `encode` and `animal` as `#[wasm_bindgen]` functions so a
//! JavaScript host can read component return values without shelling out.
//! Built with `wasm-bindgen-cli`:
//!
//! ```sh
//! cargo build -p wave-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/wave_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

/// Parse WAVE text into a compact JSON string.
///
/// Throws a JS error describing the offending span if the input is malformed.
#[wasm_bindgen]
pub fn parse(wave: &str) -> std::result::Result<String, JsValue> {
    wave_core::decode(wave).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JSON string as canonical WAVE text.
///
/// Throws a JS error if the JSON is invalid or has no WAVE counterpart.
#[wasm_bindgen]
pub fn encode(json: &str) -> std::result::Result<String, JsValue> {
    wave_core::encode(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse a `get-animal()` result and return it as JSON with the four
/// required fields, or throw naming the first missing one.
#[wasm_bindgen]
pub fn animal(wave: &str) -> std::result::Result<String, JsValue> {
    let animal = wave_core::Animal::from_wave(wave).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(wave_core::to_json(&animal.to_record().into()).to_string())
}
