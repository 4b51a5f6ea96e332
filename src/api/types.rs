//! Shared types for the WASM API
//!
//! JavaScript hands states back in the same camelCase shape `decodeToken`
//! produces. Chord selections in that shape are ignored: they are always
//! re-derived from the chord heads.

use serde::Deserialize;

use crate::codec::Result;
use crate::models::{ChordStep, LoopState, StepRow, TrackSet, VariantRow, STEP_COUNT};

/// A loop state as received from JavaScript
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoopStateInput {
    pub tempo: i64,
    pub step_matrix: Vec<StepRow>,
    pub bar_variants: Vec<VariantRow>,
    #[serde(default = "empty_chord_steps")]
    pub chord_steps: [ChordStep; STEP_COUNT],
}

fn empty_chord_steps() -> [ChordStep; STEP_COUNT] {
    [ChordStep::EMPTY; STEP_COUNT]
}

impl LoopStateInput {
    /// Validate against a track set and build the canonical state
    pub fn into_state(self, tracks: &TrackSet) -> Result<LoopState> {
        LoopState::from_parts(tracks, self.tempo, self.step_matrix, self.bar_variants, self.chord_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;

    #[test]
    fn test_accepts_serialized_state() {
        let state = LoopState::new(TrackSet::reference());
        let json = serde_json::to_string(&state).unwrap();
        let input: LoopStateInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.into_state(TrackSet::reference()).unwrap(), state);
    }

    #[test]
    fn test_chord_steps_are_optional() {
        let json = format!(
            r#"{{"tempo": 90, "stepMatrix": {m}, "barVariants": [[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]}}"#,
            m = serde_json::to_string(&vec![[false; STEP_COUNT]; 4]).unwrap()
        );
        let input: LoopStateInput = serde_json::from_str(&json).unwrap();
        let state = input.into_state(TrackSet::reference()).unwrap();
        assert_eq!(state.tempo(), 90);
        assert!(state.chord_steps().iter().all(ChordStep::is_empty));
    }

    #[test]
    fn test_rejects_wrong_track_count() {
        let input = LoopStateInput {
            tempo: 120,
            step_matrix: vec![[false; STEP_COUNT]; 2],
            bar_variants: vec![[0; 4]; 2],
            chord_steps: empty_chord_steps(),
        };
        assert_eq!(
            input.into_state(TrackSet::reference()),
            Err(CodecError::ShapeMismatch { field: "stepMatrix", expected: 4, actual: 2 })
        );
    }
}
