//! Metadata format versions
//!
//! | tag | fields after tempo                     | variant cell |
//! |-----|----------------------------------------|--------------|
//! | V1  | pattern, (legacy label)                | inferred     |
//! | V2  | pattern, chords                        | inferred     |
//! | V3  | pattern, chords, variants              | 1 bit        |
//! | V4  | pattern, chords, variants              | 2 bits       |

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::CodecError;
use crate::models::tracks::CURRENT_BITS_PER_CELL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    V1,
    V2,
    V3,
    V4,
}

impl FormatVersion {
    /// The only version the encoder writes
    pub const CURRENT: FormatVersion = FormatVersion::V4;

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatVersion::V1 => "V1",
            FormatVersion::V2 => "V2",
            FormatVersion::V3 => "V3",
            FormatVersion::V4 => "V4",
        }
    }

    /// Whether the token carries a chord field
    pub fn has_chords(&self) -> bool {
        !matches!(self, FormatVersion::V1)
    }

    /// Width of a bar-variant cell, or `None` when variants must be inferred
    pub fn bits_per_cell(&self) -> Option<usize> {
        match self {
            FormatVersion::V1 | FormatVersion::V2 => None,
            FormatVersion::V3 => Some(1),
            FormatVersion::V4 => Some(CURRENT_BITS_PER_CELL),
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatVersion {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V1" => Ok(FormatVersion::V1),
            "V2" => Ok(FormatVersion::V2),
            "V3" => Ok(FormatVersion::V3),
            "V4" => Ok(FormatVersion::V4),
            other => Err(CodecError::UnsupportedVersion(other.to_string())),
        }
    }
}

impl Serialize for FormatVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
