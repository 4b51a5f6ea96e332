//! Live editing operations for the WASM API
//!
//! Each call takes the current state from JavaScript, applies one edit,
//! recomputes the affected projection and hands back the whole new state.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{codec_error, deserialize, serialize, validate_index, validation_error};
use crate::api::types::LoopStateInput;
use crate::models::{ChordIndex, LoopState, TrackSet, BAR_COUNT};
use crate::{wasm_info, wasm_warn};

fn load_state(state_js: JsValue, tracks: &TrackSet) -> Result<LoopState, JsValue> {
    let input: LoopStateInput = deserialize(state_js, "Failed to deserialize loop state")?;
    input.into_state(tracks).map_err(|e| codec_error("Invalid loop state", e))
}

/// Advance one bar of one track to its next variant
///
/// # Parameters
/// - `state_js`: current loop state
/// - `track`: track row (0-based)
/// - `bar`: bar column (0-3)
///
/// # Returns
/// Updated loop state
#[wasm_bindgen(js_name = cycleBarVariant)]
pub fn cycle_bar_variant(state_js: JsValue, track: usize, bar: usize) -> Result<JsValue, JsValue> {
    let tracks = TrackSet::reference();
    validate_index(track, tracks.len(), "Track").map_err(validation_error)?;
    validate_index(bar, BAR_COUNT, "Bar").map_err(validation_error)?;

    let mut state = load_state(state_js, tracks)?;
    let next = state
        .cycle_bar_variant(tracks, track, bar)
        .ok_or_else(|| validation_error(format!("No variant cell at track {} bar {}", track, bar)))?;

    wasm_info!("cycleBarVariant: track={}, bar={} -> variant {}", track, bar, next);
    serialize(&state, "Failed to serialize loop state")
}

/// Assign a chord to a bar, or clear it when `chord_index` is undefined/null
#[wasm_bindgen(js_name = setChordSelection)]
pub fn set_chord_selection(state_js: JsValue, bar: usize, chord_index: Option<u8>) -> Result<JsValue, JsValue> {
    validate_index(bar, BAR_COUNT, "Bar").map_err(validation_error)?;

    let chord = match chord_index {
        Some(value) => Some(
            ChordIndex::new(value).ok_or_else(|| validation_error(format!("Invalid chord index: {}", value)))?,
        ),
        None => None,
    };

    let mut state = load_state(state_js, TrackSet::reference())?;
    if !state.set_chord_selection(bar, chord) {
        wasm_warn!("setChordSelection: bar {} not applied", bar);
    }

    serialize(&state, "Failed to serialize loop state")
}

/// Summary counters for a loop (active steps, chord segments, tempo...)
#[wasm_bindgen(js_name = loopStats)]
pub fn loop_stats(state_js: JsValue) -> Result<JsValue, JsValue> {
    let state = load_state(state_js, TrackSet::reference())?;
    serialize(&state.stats(), "Failed to serialize loop stats")
}
