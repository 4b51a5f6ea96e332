//! Track configuration
//!
//! A loop is made of a fixed set of tracks. Each track offers a small
//! number of 4-step variant patterns, and every bar of every track selects
//! one of them. The variant tables are part of the wire contract: a shared
//! token stores variant indices, so changing a table changes how existing
//! tokens play back.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of sixteenth steps in a loop
pub const STEP_COUNT: usize = 16;

/// Number of bars in a loop
pub const BAR_COUNT: usize = 4;

/// Steps per bar
pub const BAR_STEPS: usize = STEP_COUNT / BAR_COUNT;

/// Bits used by the current format for a single bar-variant cell
pub const CURRENT_BITS_PER_CELL: usize = 2;

/// Upper bound on variants per track (what a current-format cell can address)
pub const MAX_VARIANTS: usize = 1 << CURRENT_BITS_PER_CELL;

/// Errors raised while building or loading a track set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackConfigError {
    #[error("Track set must contain at least one track")]
    NoTracks,

    #[error("Track '{track}' has no variants")]
    NoVariants { track: String },

    #[error("Track '{track}' has {count} variants (max {max})", max = MAX_VARIANTS)]
    TooManyVariants { track: String, count: usize },

    #[error("Track configuration could not be parsed: {0}")]
    Parse(String),
}

/// One predefined 4-step rhythm a bar can select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub info: String,
    pub pattern: [bool; BAR_STEPS],
}

impl Variant {
    fn new(id: &str, label: &str, info: &str, pattern: [u8; BAR_STEPS]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            info: info.to_string(),
            pattern: pattern.map(|bit| bit != 0),
        }
    }
}

/// A single instrument lane and its variant table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackConfig {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub info: String,
    pub variants: Vec<Variant>,
}

impl TrackConfig {
    /// Highest variant index this track accepts
    pub fn max_variant_index(&self) -> u8 {
        self.variants.len().saturating_sub(1) as u8
    }

    /// Clamp an arbitrary index into this track's variant range
    pub fn clamp_variant(&self, index: u32) -> u8 {
        index.min(self.max_variant_index() as u32) as u8
    }

    /// Variant at `index`, clamped into range
    pub fn variant(&self, index: u8) -> &Variant {
        &self.variants[self.clamp_variant(index as u32) as usize]
    }
}

/// The ordered set of tracks a loop is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackSet {
    tracks: Vec<TrackConfig>,
}

static REFERENCE: Lazy<TrackSet> = Lazy::new(|| TrackSet {
    tracks: vec![
        TrackConfig {
            id: "drum".to_string(),
            label: "Drum".to_string(),
            info: "kick-led rhythm".to_string(),
            variants: vec![
                Variant::new("drum0", "00", "pulse", [1, 0, 0, 0]),
                Variant::new("drum1", "01", "sync", [1, 0, 1, 0]),
                Variant::new("drum2", "10", "drive", [1, 1, 0, 0]),
                Variant::new("drum3", "11", "bounce", [1, 0, 0, 1]),
            ],
        },
        TrackConfig {
            id: "bass".to_string(),
            label: "Bass".to_string(),
            info: "low-end pulse".to_string(),
            variants: vec![
                Variant::new("bass0", "00", "root", [1, 0, 0, 0]),
                Variant::new("bass1", "01", "skip", [1, 0, 1, 0]),
                Variant::new("bass2", "10", "push", [1, 1, 0, 0]),
                Variant::new("bass3", "11", "tail", [1, 0, 0, 1]),
            ],
        },
        TrackConfig {
            id: "melody".to_string(),
            label: "Melody 1".to_string(),
            info: "upper melody".to_string(),
            variants: vec![
                Variant::new("melody0", "00", "wave", [0, 1, 0, 1]),
                Variant::new("melody1", "01", "spark", [1, 0, 0, 1]),
                Variant::new("melody2", "10", "flow", [0, 1, 1, 0]),
                Variant::new("melody3", "11", "lift", [1, 0, 1, 0]),
            ],
        },
        TrackConfig {
            id: "sub".to_string(),
            label: "Melody 2".to_string(),
            info: "counter melody".to_string(),
            variants: vec![
                Variant::new("sub0", "00", "hold", [1, 0, 0, 0]),
                Variant::new("sub1", "01", "shift", [0, 1, 0, 1]),
                Variant::new("sub2", "10", "late", [0, 0, 1, 0]),
                Variant::new("sub3", "11", "roll", [0, 1, 1, 0]),
            ],
        },
    ],
});

impl TrackSet {
    /// Build a validated track set
    pub fn new(tracks: Vec<TrackConfig>) -> Result<Self, TrackConfigError> {
        if tracks.is_empty() {
            return Err(TrackConfigError::NoTracks);
        }

        for track in &tracks {
            if track.variants.is_empty() {
                return Err(TrackConfigError::NoVariants { track: track.id.clone() });
            }
            if track.variants.len() > MAX_VARIANTS {
                return Err(TrackConfigError::TooManyVariants {
                    track: track.id.clone(),
                    count: track.variants.len(),
                });
            }
        }

        Ok(Self { tracks })
    }

    /// The drum / bass / melody / sub configuration shared links are built with
    pub fn reference() -> &'static TrackSet {
        &REFERENCE
    }

    /// Load a track set from a JSON array of tracks
    pub fn from_json(text: &str) -> Result<Self, TrackConfigError> {
        let tracks: Vec<TrackConfig> = serde_json::from_str(text)
            .map_err(|e| TrackConfigError::Parse(e.to_string()))?;
        Self::new(tracks)
    }

    /// Load a track set from a YAML sequence of tracks
    pub fn from_yaml(text: &str) -> Result<Self, TrackConfigError> {
        let tracks: Vec<TrackConfig> = serde_yaml::from_str(text)
            .map_err(|e| TrackConfigError::Parse(e.to_string()))?;
        Self::new(tracks)
    }

    pub fn tracks(&self) -> &[TrackConfig] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrackConfig> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackConfig> {
        self.tracks.iter()
    }
}
