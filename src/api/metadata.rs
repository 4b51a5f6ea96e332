//! Token encode/decode operations for the WASM API
//!
//! These bind the reference track set. The share page calls `encodeState`
//! and the desk/play pages call `decodeToken` on the `meta` query value.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{codec_error, deserialize, serialize};
use crate::api::types::LoopStateInput;
use crate::codec::MetadataCodec;
use crate::models::{LoopState, TrackSet};
use crate::{wasm_error, wasm_info, wasm_log};

/// Encode a loop state as a current-version metadata token
///
/// # Parameters
/// - `state_js`: loop state object (`tempo`, `stepMatrix`, `barVariants`, `chordSteps`)
///
/// # Returns
/// Token string such as `V4:120:<pattern>:<chords>:<variants>`
#[wasm_bindgen(js_name = encodeState)]
pub fn encode_state(state_js: JsValue) -> Result<String, JsValue> {
    let input: LoopStateInput = deserialize(state_js, "Failed to deserialize loop state")?;
    let tracks = TrackSet::reference();
    let state = input.into_state(tracks).map_err(|e| codec_error("Invalid loop state", e))?;

    let token = MetadataCodec::new(tracks).encode_state(&state);
    wasm_info!("encodeState: {} ({} chars)", token, token.len());
    Ok(token)
}

/// Decode a metadata token of any known version into a loop state
#[wasm_bindgen(js_name = decodeToken)]
pub fn decode_token(token: &str) -> Result<JsValue, JsValue> {
    wasm_log!("decodeToken called: '{}'", token);

    let state = MetadataCodec::default().decode_token(token).map_err(|e| {
        wasm_error!("decodeToken failed for '{}'", token);
        codec_error("Metadata decode failed", e)
    })?;

    serialize(&state, "Failed to serialize loop state")
}

/// Decode a token and also report its version, pattern field and V1 label
#[wasm_bindgen(js_name = decodeMetadata)]
pub fn decode_metadata(token: &str) -> Result<JsValue, JsValue> {
    wasm_log!("decodeMetadata called: '{}'", token);

    let decoded = MetadataCodec::default()
        .decode_metadata(token)
        .map_err(|e| codec_error("Metadata decode failed", e))?;

    wasm_info!("  version={}, tempo={}", decoded.version, decoded.state.tempo());
    serialize(&decoded, "Failed to serialize decoded metadata")
}

/// The loop a fresh editor starts with
#[wasm_bindgen(js_name = defaultState)]
pub fn default_state() -> Result<JsValue, JsValue> {
    serialize(&LoopState::new(TrackSet::reference()), "Failed to serialize default state")
}

/// The reference track configuration (ids, labels, variant patterns)
#[wasm_bindgen(js_name = trackSet)]
pub fn track_set() -> Result<JsValue, JsValue> {
    serialize(TrackSet::reference(), "Failed to serialize track set")
}
