//! Loop Codec WASM API
//!
//! This module provides the JavaScript-facing API for the loop codec.
//! It includes shared utilities for serialization, validation, and error
//! handling, as well as the API functions organized by functional domain.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, validation, error handling, and logging
//! - `types`: Shapes accepted from JavaScript
//! - `metadata`: Token encode/decode
//! - `editing`: Live edits on a state (variant cycling, chord bars)
//! - `chords`: Chord vocabulary lookups

pub mod helpers;
pub mod types;
pub mod metadata;
pub mod editing;
pub mod chords;

pub use metadata::{encode_state, decode_token, decode_metadata, default_state, track_set};
pub use editing::{cycle_bar_variant, set_chord_selection, loop_stats};
pub use chords::{chord_index_from_parts, chord_label, scale_notes};
