//! Best-fit bar variants for tokens that only carry a step matrix
//!
//! Each bar picks the variant whose 4-step pattern agrees with the grid on the
//! most steps. Ties keep the lowest index (strict `>` against the running
//! best); shared V1/V2 links depend on that choice.

use crate::models::loop_state::{StepRow, VariantRow};
use crate::models::tracks::{TrackSet, BAR_STEPS, STEP_COUNT};

pub fn derive_variants_from_matrix(tracks: &TrackSet, matrix: &[StepRow]) -> Vec<VariantRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(track_index, track)| {
            let row = matrix.get(track_index).copied().unwrap_or([false; STEP_COUNT]);
            std::array::from_fn(|bar| {
                let actual = &row[bar * BAR_STEPS..(bar + 1) * BAR_STEPS];
                let mut best_variant = 0;
                let mut best_score = None;
                for (index, variant) in track.variants.iter().enumerate() {
                    let score = variant.pattern.iter().zip(actual).filter(|(expected, got)| expected == got).count();
                    if best_score.map_or(true, |best| score > best) {
                        best_score = Some(score);
                        best_variant = index as u8;
                    }
                }
                best_variant
            })
        })
        .collect()
}
