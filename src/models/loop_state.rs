//! Canonical loop state
//!
//! `bar_variants` and `chord_selections` are authoritative. The step matrix
//! and per-step chord records are projections, recomputed after every edit
//! rather than patched in place. Decoded tokens may carry a step matrix that
//! no variant combination reproduces (legacy hand-drawn grids), so a decoded
//! state keeps the matrix it was given until the next variant edit.

use serde::{Deserialize, Serialize};

use super::chord::ChordIndex;
use super::tracks::{TrackSet, BAR_COUNT, BAR_STEPS, STEP_COUNT};
use crate::codec::error::{CodecError, Result};

pub const TEMPO_MIN: i64 = 40;
pub const TEMPO_MAX: i64 = 220;
pub const DEFAULT_TEMPO: u16 = 107;

/// One track's sixteen steps
pub type StepRow = [bool; STEP_COUNT];

/// One track's variant index per bar
pub type VariantRow = [u8; BAR_COUNT];

/// Chord information for a single sixteenth step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordStep {
    pub chord_index: Option<ChordIndex>,
    /// First step of a sustained run
    pub head: bool,
    /// Run length in steps; only meaningful on the head
    pub length: u8,
}

impl ChordStep {
    pub const EMPTY: ChordStep = ChordStep { chord_index: None, head: false, length: 0 };

    pub fn head(chord: ChordIndex, length: u8) -> Self {
        Self { chord_index: Some(chord), head: true, length }
    }

    pub fn sustain(chord: ChordIndex) -> Self {
        Self { chord_index: Some(chord), head: false, length: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.chord_index.is_none()
    }
}

pub type ChordSteps = [ChordStep; STEP_COUNT];
pub type ChordSelections = [Option<ChordIndex>; BAR_COUNT];

/// Summary counters shown next to a loaded loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopStats {
    pub active_steps: usize,
    pub total_steps: usize,
    pub chord_segments: usize,
    pub alternate_variants: usize,
    pub tempo: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopState {
    tempo: u16,
    step_matrix: Vec<StepRow>,
    bar_variants: Vec<VariantRow>,
    chord_steps: ChordSteps,
    chord_selections: ChordSelections,
}

impl LoopState {
    /// Default loop: tempo 107, first variant everywhere, no chords
    pub fn new(tracks: &TrackSet) -> Self {
        Self::from_authoritative(tracks, DEFAULT_TEMPO, vec![[0; BAR_COUNT]; tracks.len()], [None; BAR_COUNT])
    }

    /// Build from the authoritative fields; projections are computed
    pub fn from_selections(
        tracks: &TrackSet,
        tempo: i64,
        bar_variants: Vec<VariantRow>,
        chord_selections: ChordSelections,
    ) -> Result<Self> {
        let tempo = validate_tempo(tempo)?;
        check_rows("barVariants", tracks.len(), bar_variants.len())?;
        let bar_variants = clamp_variants(tracks, bar_variants);
        Ok(Self::from_authoritative(tracks, tempo, bar_variants, chord_selections))
    }

    /// Build from an explicit matrix and chord steps, as carried by a token
    ///
    /// Chord selections are derived from the chord heads.
    pub fn from_parts(
        tracks: &TrackSet,
        tempo: i64,
        step_matrix: Vec<StepRow>,
        bar_variants: Vec<VariantRow>,
        chord_steps: ChordSteps,
    ) -> Result<Self> {
        let tempo = validate_tempo(tempo)?;
        check_rows("stepMatrix", tracks.len(), step_matrix.len())?;
        check_rows("barVariants", tracks.len(), bar_variants.len())?;

        Ok(Self {
            tempo,
            step_matrix,
            bar_variants: clamp_variants(tracks, bar_variants),
            chord_selections: chord_steps_to_selections(&chord_steps),
            chord_steps,
        })
    }

    fn from_authoritative(
        tracks: &TrackSet,
        tempo: u16,
        bar_variants: Vec<VariantRow>,
        chord_selections: ChordSelections,
    ) -> Self {
        Self {
            tempo,
            step_matrix: variants_to_matrix(tracks, &bar_variants),
            chord_steps: selections_to_chord_steps(&chord_selections),
            bar_variants,
            chord_selections,
        }
    }

    pub fn tempo(&self) -> u16 {
        self.tempo
    }

    pub fn step_matrix(&self) -> &[StepRow] {
        &self.step_matrix
    }

    pub fn bar_variants(&self) -> &[VariantRow] {
        &self.bar_variants
    }

    pub fn chord_steps(&self) -> &ChordSteps {
        &self.chord_steps
    }

    pub fn chord_selections(&self) -> &ChordSelections {
        &self.chord_selections
    }

    pub fn track_count(&self) -> usize {
        self.step_matrix.len()
    }

    pub fn set_tempo(&mut self, tempo: i64) -> Result<()> {
        self.tempo = validate_tempo(tempo)?;
        Ok(())
    }

    /// Advance one bar cell to the track's next variant, wrapping around
    ///
    /// Returns the new index, or `None` when the cell does not exist.
    pub fn cycle_bar_variant(&mut self, tracks: &TrackSet, track: usize, bar: usize) -> Option<u8> {
        let config = tracks.get(track)?;
        let current = *self.bar_variants.get(track)?.get(bar)?;
        let count = config.variants.len();
        let next = if count <= 1 { 0 } else { ((current as usize + 1) % count) as u8 };
        self.bar_variants[track][bar] = next;
        self.sync_matrix(tracks);
        Some(next)
    }

    /// Select a specific variant for one bar cell (clamped into range)
    pub fn set_bar_variant(&mut self, tracks: &TrackSet, track: usize, bar: usize, variant: u8) -> Option<u8> {
        let config = tracks.get(track)?;
        let cell = self.bar_variants.get_mut(track)?.get_mut(bar)?;
        *cell = config.clamp_variant(variant as u32);
        let value = *cell;
        self.sync_matrix(tracks);
        Some(value)
    }

    /// Assign (or clear) the chord played across one bar
    pub fn set_chord_selection(&mut self, bar: usize, chord: Option<ChordIndex>) -> bool {
        match self.chord_selections.get_mut(bar) {
            Some(slot) => {
                *slot = chord;
                self.sync_chords();
                true
            }
            None => false,
        }
    }

    pub fn reset_chords(&mut self) {
        self.chord_selections = [None; BAR_COUNT];
        self.sync_chords();
    }

    /// Back to first variants everywhere and no chords; tempo is kept
    pub fn reset_pattern(&mut self, tracks: &TrackSet) {
        self.bar_variants = vec![[0; BAR_COUNT]; tracks.len()];
        self.sync_matrix(tracks);
        self.reset_chords();
    }

    pub fn stats(&self) -> LoopStats {
        LoopStats {
            active_steps: self.step_matrix.iter().map(|row| row.iter().filter(|&&on| on).count()).sum(),
            total_steps: self.step_matrix.len() * STEP_COUNT,
            chord_segments: count_chord_segments(&self.chord_steps),
            alternate_variants: self.bar_variants.iter().flatten().filter(|&&v| v != 0).count(),
            tempo: self.tempo,
        }
    }

    fn sync_matrix(&mut self, tracks: &TrackSet) {
        self.step_matrix = variants_to_matrix(tracks, &self.bar_variants);
    }

    fn sync_chords(&mut self) {
        self.chord_steps = selections_to_chord_steps(&self.chord_selections);
    }
}

fn validate_tempo(tempo: i64) -> Result<u16> {
    if !(TEMPO_MIN..=TEMPO_MAX).contains(&tempo) {
        return Err(CodecError::TempoOutOfRange(tempo));
    }
    Ok(tempo as u16)
}

fn check_rows(field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(CodecError::ShapeMismatch { field, expected, actual });
    }
    Ok(())
}

fn clamp_variants(tracks: &TrackSet, mut rows: Vec<VariantRow>) -> Vec<VariantRow> {
    for (row, track) in rows.iter_mut().zip(tracks.iter()) {
        for cell in row.iter_mut() {
            *cell = track.clamp_variant(*cell as u32);
        }
    }
    rows
}

/// Expand per-bar variant choices into each track's step row
pub fn variants_to_matrix(tracks: &TrackSet, bar_variants: &[VariantRow]) -> Vec<StepRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(track_index, track)| {
            let mut steps = [false; STEP_COUNT];
            let row = bar_variants.get(track_index).copied().unwrap_or([0; BAR_COUNT]);
            for (bar, &variant_index) in row.iter().enumerate() {
                let pattern = &track.variant(variant_index).pattern;
                steps[bar * BAR_STEPS..(bar + 1) * BAR_STEPS].copy_from_slice(pattern);
            }
            steps
        })
        .collect()
}

/// Expand bar-level chord choices into one 4-step run per selected bar
pub fn selections_to_chord_steps(selections: &ChordSelections) -> ChordSteps {
    let mut steps = [ChordStep::EMPTY; STEP_COUNT];
    for (bar, selection) in selections.iter().enumerate() {
        let Some(chord) = *selection else { continue };
        let start = bar * BAR_STEPS;
        steps[start] = ChordStep::head(chord, BAR_STEPS as u8);
        for step in &mut steps[start + 1..start + BAR_STEPS] {
            *step = ChordStep::sustain(chord);
        }
    }
    steps
}

/// Collapse chord heads back to one choice per bar; a later head in a bar wins
pub fn chord_steps_to_selections(steps: &ChordSteps) -> ChordSelections {
    let mut selections = [None; BAR_COUNT];
    for (index, step) in steps.iter().enumerate() {
        if step.head {
            selections[index / BAR_STEPS] = step.chord_index;
        }
    }
    selections
}

pub fn count_chord_segments(steps: &ChordSteps) -> usize {
    steps.iter().filter(|step| step.head).count()
}
