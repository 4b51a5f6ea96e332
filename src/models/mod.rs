//! Models module for the loop codec
//!
//! Track configuration, the chord vocabulary and the canonical loop state.

pub mod chord;
pub mod loop_state;
pub mod tracks;

// Re-export commonly used types
pub use chord::{ChordIndex, ChordQuality};
pub use loop_state::{ChordStep, LoopState, LoopStats, StepRow, VariantRow};
pub use tracks::{TrackConfig, TrackConfigError, TrackSet, Variant, BAR_COUNT, BAR_STEPS, STEP_COUNT};
