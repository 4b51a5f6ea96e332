//! Step-matrix field: one bit per step, tracks concatenated in order

use super::base62;
use super::bits::BitString;
use super::error::Result;
use crate::models::loop_state::StepRow;
use crate::models::tracks::STEP_COUNT;

pub fn matrix_to_bits(matrix: &[StepRow]) -> BitString {
    matrix.iter().flat_map(|row| row.iter().copied()).collect()
}

pub fn encode_step_matrix(matrix: &[StepRow]) -> String {
    base62::encode(&matrix_to_bits(matrix))
}

/// Decode `track_count` rows of 16 steps
pub fn decode_step_matrix(token: &str, track_count: usize) -> Result<Vec<StepRow>> {
    let bits = base62::decode(token)?.pad_left(track_count * STEP_COUNT);

    Ok((0..track_count)
        .map(|track| {
            let start = track * STEP_COUNT;
            std::array::from_fn(|step| bits.get(start + step))
        })
        .collect())
}
