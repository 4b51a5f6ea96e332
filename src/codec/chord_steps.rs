//! Chord-step field
//!
//! Sixteen 12-bit fields, one per step:
//!
//! ```text
//! [present:1][chord index:7][sustain length - 1:4]
//! ```
//!
//! Only run heads are written; every other step is twelve zero bits. On
//! decode each head is expanded over its run so any step can be asked which
//! chord is sounding.

use super::base62::{self, ZERO_TOKEN};
use super::bits::BitString;
use super::error::Result;
use crate::models::chord::ChordIndex;
use crate::models::loop_state::{ChordStep, ChordSteps};
use crate::models::tracks::STEP_COUNT;

pub const CHORD_STEP_BITS: usize = 12;
const CHORD_INDEX_BITS: usize = 7;
const LENGTH_BITS: usize = 4;

pub fn encode_chord_steps(steps: &ChordSteps) -> String {
    let mut bits = BitString::with_capacity(STEP_COUNT * CHORD_STEP_BITS);

    for step in steps {
        match step.chord_index {
            Some(chord) if step.head => {
                let length = step.length.clamp(1, STEP_COUNT as u8);
                bits.push(true);
                bits.push_field(chord.value() as u32, CHORD_INDEX_BITS);
                bits.push_field((length - 1) as u32, LENGTH_BITS);
            }
            _ => bits.push_zeros(CHORD_STEP_BITS),
        }
    }

    base62::encode(&bits)
}

pub fn decode_chord_steps(token: &str) -> Result<ChordSteps> {
    let mut steps = [ChordStep::EMPTY; STEP_COUNT];
    if token.is_empty() || token == ZERO_TOKEN {
        return Ok(steps);
    }

    let bits = base62::decode(token)?.pad_left(STEP_COUNT * CHORD_STEP_BITS);

    for start in 0..STEP_COUNT {
        let offset = start * CHORD_STEP_BITS;
        if !bits.get(offset) {
            continue;
        }

        let raw_index = bits.field(offset + 1, CHORD_INDEX_BITS) as u8;
        let Some(chord) = ChordIndex::new(raw_index) else { continue };
        let length = (bits.field(offset + 1 + CHORD_INDEX_BITS, LENGTH_BITS) as usize + 1).min(STEP_COUNT - start);

        steps[start] = ChordStep::head(chord, length as u8);
        for step in &mut steps[start + 1..start + length] {
            *step = ChordStep::sustain(chord);
        }
    }

    Ok(steps)
}
