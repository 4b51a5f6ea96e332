//! Chord vocabulary
//!
//! A chord is a (root, quality) pair packed into one index:
//! `index = root * QUALITY_COUNT + quality`. The wire format gives the index
//! seven bits, so any value up to 127 is carried faithfully even when it
//! falls outside the named vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root names, indexed by semitone above C
pub const CHORD_ROOTS: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// MIDI note of the lowest scale root (C3)
pub const CHORD_BASE_MIDI: i32 = 48;

/// Largest index the 7-bit chord field can hold
pub const MAX_CHORD_INDEX: u8 = 0x7F;

/// Scale/chord colour applied on top of a root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Major,
    Minor,
    Pentatonic,
    Dorian,
    Mixolydian,
    Lydian,
    Phrygian,
    Locrian,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 8] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Pentatonic,
        ChordQuality::Dorian,
        ChordQuality::Mixolydian,
        ChordQuality::Lydian,
        ChordQuality::Phrygian,
        ChordQuality::Locrian,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Pentatonic => "pentatonic",
            ChordQuality::Dorian => "dorian",
            ChordQuality::Mixolydian => "mixolydian",
            ChordQuality::Lydian => "lydian",
            ChordQuality::Phrygian => "phrygian",
            ChordQuality::Locrian => "locrian",
        }
    }

    /// Semitone offsets from the root
    pub fn intervals(&self) -> &'static [i32] {
        match self {
            ChordQuality::Major => &[0, 2, 4, 5, 7, 9, 11],
            ChordQuality::Minor => &[0, 2, 3, 5, 7, 8, 10],
            ChordQuality::Pentatonic => &[0, 2, 4, 7, 9],
            ChordQuality::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            ChordQuality::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            ChordQuality::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            ChordQuality::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            ChordQuality::Locrian => &[0, 1, 3, 5, 6, 8, 10],
        }
    }
}

/// Number of qualities per root; the stride of the chord index
pub const QUALITY_COUNT: u8 = ChordQuality::ALL.len() as u8;

/// Packed (root, quality) identifier as stored on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ChordIndex(u8);

impl ChordIndex {
    /// Wrap a raw index; `None` when it does not fit the 7-bit field
    pub fn new(value: u8) -> Option<Self> {
        (value <= MAX_CHORD_INDEX).then_some(Self(value))
    }

    /// Pack a root (0-11) and quality into an index
    pub fn from_parts(root: u8, quality: ChordQuality) -> Option<Self> {
        if root as usize >= CHORD_ROOTS.len() {
            return None;
        }
        Self::new(root * QUALITY_COUNT + quality.index())
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Root semitone (may exceed 11 for indices outside the vocabulary)
    pub fn root(&self) -> u8 {
        self.0 / QUALITY_COUNT
    }

    pub fn quality_index(&self) -> u8 {
        self.0 % QUALITY_COUNT
    }

    /// Quality for this index; always in range since the index is taken modulo the count
    pub fn quality(&self) -> ChordQuality {
        ChordQuality::from_index(self.quality_index()).unwrap_or(ChordQuality::Major)
    }

    /// Root name, falling back to C outside the vocabulary
    pub fn root_name(&self) -> &'static str {
        CHORD_ROOTS.get(self.root() as usize).copied().unwrap_or(CHORD_ROOTS[0])
    }

    /// Human-readable label, e.g. "D# minor"
    pub fn label(&self) -> String {
        format!("{} {}", self.root_name(), self.quality().as_str())
    }

    /// Scale note names rooted at C3 + root, shifted by whole octaves
    pub fn scale_notes(&self, octave_shift: i32) -> Vec<String> {
        let root = if (self.root() as usize) < CHORD_ROOTS.len() { self.root() as i64 } else { 0 };
        let root_midi = CHORD_BASE_MIDI as i64 + root + octave_shift as i64 * 12;
        self.quality()
            .intervals()
            .iter()
            .map(|&offset| midi_note_name(root_midi + offset as i64))
            .collect()
    }
}

impl TryFrom<u8> for ChordIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ChordIndex::new(value).ok_or_else(|| format!("Chord index {} exceeds {}", value, MAX_CHORD_INDEX))
    }
}

impl From<ChordIndex> for u8 {
    fn from(index: ChordIndex) -> u8 {
        index.0
    }
}

impl fmt::Display for ChordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Name a MIDI note, e.g. 61 -> "C#4"
pub fn midi_note_name(midi: i64) -> String {
    let pitch_class = midi.rem_euclid(12) as usize;
    let octave = midi.div_euclid(12) - 1;
    format!("{}{}", CHORD_ROOTS[pitch_class], octave)
}
