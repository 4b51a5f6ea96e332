//! Error types for metadata encoding and decoding
//!
//! Every variant aborts the whole decode; no partial state is returned.
//! Leading zero bits dropped by the base-62 transcoder are not an error,
//! each field codec re-pads to its known width.

use thiserror::Error;

/// Top-level codec error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A character outside the base-62 alphabet appeared in a field token
    #[error("Invalid base62 character '{ch}' at position {position}")]
    InvalidDigit { ch: char, position: usize },

    /// Too few delimited fields, or a tempo that is not an integer
    #[error("Malformed metadata: {0}")]
    MalformedMetadata(String),

    /// Tempo parsed but falls outside the playable range
    #[error("Tempo {0} out of expected range (40-220)")]
    TempoOutOfRange(i64),

    /// Version tag not known to the dispatcher
    #[error("Unsupported metadata version: {0}")]
    UnsupportedVersion(String),

    /// A state was assembled with the wrong number of track rows
    #[error("{field} has {actual} rows, expected {expected}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;
