//! Bar-variant field: one fixed-width cell per (track, bar), track-major
//!
//! Cell width depends on the format version (1 bit in V3, 2 bits now).
//! Decoded cells are clamped into each track's variant range so a corrupt or
//! truncated token can never select a variant that does not exist.

use log::warn;

use super::base62;
use super::bits::BitString;
use super::error::Result;
use crate::models::loop_state::VariantRow;
use crate::models::tracks::{TrackSet, BAR_COUNT};

pub fn encode_bar_variants(tracks: &TrackSet, bar_variants: &[VariantRow], bits_per_cell: usize) -> String {
    let mut bits = BitString::with_capacity(tracks.len() * BAR_COUNT * bits_per_cell);

    for (track_index, track) in tracks.iter().enumerate() {
        let row = bar_variants.get(track_index).copied().unwrap_or([0; BAR_COUNT]);
        for value in row {
            bits.push_field(track.clamp_variant(value as u32) as u32, bits_per_cell);
        }
    }

    base62::encode(&bits)
}

pub fn decode_bar_variants(tracks: &TrackSet, token: &str, bits_per_cell: usize) -> Result<Vec<VariantRow>> {
    let expected_bits = tracks.len() * BAR_COUNT * bits_per_cell;
    let bits = base62::decode(token)?.right_align(expected_bits);

    let mut cursor = 0;
    let rows = tracks
        .iter()
        .map(|track| {
            let mut row = [0u8; BAR_COUNT];
            for (bar, cell) in row.iter_mut().enumerate() {
                let raw = bits.field(cursor, bits_per_cell);
                *cell = track.clamp_variant(raw);
                if *cell as u32 != raw {
                    warn!("Variant {} out of range for track '{}' bar {}, clamped to {}", raw, track.id, bar, cell);
                }
                cursor += bits_per_cell;
            }
            row
        })
        .collect();

    Ok(rows)
}
