//! Chord vocabulary lookups for the WASM API

use wasm_bindgen::prelude::*;

use crate::api::helpers::validation_error;
use crate::models::{ChordIndex, ChordQuality};

fn chord(index: u8) -> Result<ChordIndex, JsValue> {
    ChordIndex::new(index).ok_or_else(|| validation_error(format!("Invalid chord index: {}", index)))
}

/// Pack a root (0-11) and quality (0-7) into a chord index
#[wasm_bindgen(js_name = chordIndexFromParts)]
pub fn chord_index_from_parts(root: u8, quality: u8) -> Result<u8, JsValue> {
    let quality = ChordQuality::from_index(quality)
        .ok_or_else(|| validation_error(format!("Invalid chord quality: {}", quality)))?;

    ChordIndex::from_parts(root, quality)
        .map(|index| index.value())
        .ok_or_else(|| validation_error(format!("Invalid chord root: {}", root)))
}

/// Display label for a chord index, e.g. "D# minor"
#[wasm_bindgen(js_name = chordLabel)]
pub fn chord_label(index: u8) -> Result<String, JsValue> {
    Ok(chord(index)?.label())
}

/// Scale note names for a chord index, shifted by whole octaves
///
/// # Returns
/// JavaScript array of note names such as `["C3", "D3", ...]`
#[wasm_bindgen(js_name = scaleNotes)]
pub fn scale_notes(index: u8, octave_shift: i32) -> Result<js_sys::Array, JsValue> {
    let result = js_sys::Array::new();
    for note in chord(index)?.scale_notes(octave_shift) {
        result.push(&JsValue::from_str(&note));
    }
    Ok(result)
}
