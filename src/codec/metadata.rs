//! Metadata envelope and version dispatch
//!
//! Wire shape: `VERSION:TEMPO:PATTERN[:CHORDS[:VARIANTS]]`. Encoding always
//! writes the current version. Decoding accepts every known version and
//! fills in whatever an older version did not carry, so an old link plays
//! back the way it did when it was shared.

use log::{debug, warn};
use serde::Serialize;
use std::num::{IntErrorKind, ParseIntError};

use super::bar_variants::{decode_bar_variants, encode_bar_variants};
use super::base62::ZERO_TOKEN;
use super::chord_steps::{decode_chord_steps, encode_chord_steps};
use super::error::{CodecError, Result};
use super::inference::derive_variants_from_matrix;
use super::step_matrix::{decode_step_matrix, encode_step_matrix};
use super::version::FormatVersion;
use crate::models::loop_state::{ChordStep, LoopState, TEMPO_MAX, TEMPO_MIN};
use crate::models::tracks::{TrackSet, CURRENT_BITS_PER_CELL, STEP_COUNT};

pub const FIELD_SEPARATOR: &str = ":";

/// A decoded token with the envelope details that are not part of the state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedMetadata {
    pub version: FormatVersion,
    /// Pattern field exactly as it appeared in the token
    pub pattern: String,
    /// Trailing free-text label of V1 tokens (empty otherwise)
    pub legacy_label: String,
    pub state: LoopState,
}

/// Raw fields of a split token
struct Envelope<'a> {
    version: FormatVersion,
    tempo: i64,
    fields: Vec<&'a str>,
}

impl<'a> Envelope<'a> {
    fn parse(token: &'a str) -> Result<Self> {
        let parts: Vec<&str> = token.trim().split(FIELD_SEPARATOR).collect();
        if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(CodecError::MalformedMetadata(format!(
                "expected VERSION:TEMPO:..., got {} field(s)",
                parts.iter().filter(|p| !p.is_empty()).count()
            )));
        }

        let tempo = parse_tempo(parts[1])?;
        let version = parts[0].parse::<FormatVersion>()?;

        Ok(Self { version, tempo, fields: parts[2..].to_vec() })
    }

    /// Field after the tempo, `"0"` when absent or empty
    fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().filter(|f| !f.is_empty()).unwrap_or(ZERO_TOKEN)
    }

    fn pattern(&self) -> &'a str {
        self.field(0)
    }

    fn chords(&self) -> &'a str {
        self.field(1)
    }

    fn variants(&self) -> &'a str {
        self.field(2)
    }
}

fn parse_tempo(raw: &str) -> Result<i64> {
    let tempo: i64 = raw.trim().parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => CodecError::TempoOutOfRange(i64::MAX),
        IntErrorKind::NegOverflow => CodecError::TempoOutOfRange(i64::MIN),
        _ => CodecError::MalformedMetadata(format!("tempo '{}' is not an integer", raw)),
    })?;

    if !(TEMPO_MIN..=TEMPO_MAX).contains(&tempo) {
        return Err(CodecError::TempoOutOfRange(tempo));
    }
    Ok(tempo)
}

/// Encoder/decoder bound to one track configuration
#[derive(Debug, Clone, Copy)]
pub struct MetadataCodec<'t> {
    tracks: &'t TrackSet,
}

impl Default for MetadataCodec<'static> {
    fn default() -> Self {
        Self::new(TrackSet::reference())
    }
}

impl<'t> MetadataCodec<'t> {
    pub fn new(tracks: &'t TrackSet) -> Self {
        Self { tracks }
    }

    /// Serialize a state as a current-version token
    pub fn encode_state(&self, state: &LoopState) -> String {
        let pattern = encode_step_matrix(state.step_matrix());
        let chords = encode_chord_steps(state.chord_steps());
        let variants = encode_bar_variants(self.tracks, state.bar_variants(), CURRENT_BITS_PER_CELL);
        let tempo = state.tempo().to_string();

        [FormatVersion::CURRENT.as_str(), tempo.as_str(), pattern.as_str(), chords.as_str(), variants.as_str()]
            .join(FIELD_SEPARATOR)
    }

    pub fn decode_token(&self, token: &str) -> Result<LoopState> {
        self.decode_metadata(token).map(|decoded| decoded.state)
    }

    pub fn decode_metadata(&self, token: &str) -> Result<DecodedMetadata> {
        let envelope = Envelope::parse(token)?;
        debug!("Decoding {} metadata at {} BPM", envelope.version, envelope.tempo);

        let (state, legacy_label) = match envelope.version {
            FormatVersion::V1 => self.decode_v1(&envelope)?,
            FormatVersion::V2 => (self.decode_v2(&envelope)?, String::new()),
            FormatVersion::V3 | FormatVersion::V4 => (self.decode_with_variants(&envelope)?, String::new()),
        };

        Ok(DecodedMetadata {
            version: envelope.version,
            pattern: envelope.pattern().to_string(),
            legacy_label,
            state,
        })
    }

    /// Matrix only; no chords, variants inferred, optional trailing label
    fn decode_v1(&self, envelope: &Envelope<'_>) -> Result<(LoopState, String)> {
        let matrix = decode_step_matrix(envelope.pattern(), self.tracks.len())?;
        let variants = derive_variants_from_matrix(self.tracks, &matrix);
        warn!("Upgrading V1 metadata: bar variants inferred from step matrix");

        let state = LoopState::from_parts(
            self.tracks,
            envelope.tempo,
            matrix,
            variants,
            [ChordStep::EMPTY; STEP_COUNT],
        )?;
        let label = envelope.fields.get(1).copied().unwrap_or_default().to_string();
        Ok((state, label))
    }

    /// Matrix and chords; variants inferred
    fn decode_v2(&self, envelope: &Envelope<'_>) -> Result<LoopState> {
        let matrix = decode_step_matrix(envelope.pattern(), self.tracks.len())?;
        let chord_steps = decode_chord_steps(envelope.chords())?;
        let variants = derive_variants_from_matrix(self.tracks, &matrix);
        warn!("Upgrading V2 metadata: bar variants inferred from step matrix");

        LoopState::from_parts(self.tracks, envelope.tempo, matrix, variants, chord_steps)
    }

    /// Matrix, chords and explicit variants at the version's cell width
    fn decode_with_variants(&self, envelope: &Envelope<'_>) -> Result<LoopState> {
        let bits_per_cell = envelope.version.bits_per_cell().unwrap_or(CURRENT_BITS_PER_CELL);
        let matrix = decode_step_matrix(envelope.pattern(), self.tracks.len())?;
        let chord_steps = decode_chord_steps(envelope.chords())?;
        let variants = decode_bar_variants(self.tracks, envelope.variants(), bits_per_cell)?;

        LoopState::from_parts(self.tracks, envelope.tempo, matrix, variants, chord_steps)
    }
}

/// Encode with the reference track set
pub fn encode_state(state: &LoopState) -> String {
    MetadataCodec::default().encode_state(state)
}

/// Decode with the reference track set
pub fn decode_token(token: &str) -> Result<LoopState> {
    MetadataCodec::default().decode_token(token)
}

/// Decode with the reference track set, keeping envelope details
pub fn decode_metadata(token: &str) -> Result<DecodedMetadata> {
    MetadataCodec::default().decode_metadata(token)
}
