//! Metadata codec
//!
//! Three layers, leaves first:
//!
//! - `base62`: bitstring <-> base-62 digits over an unbounded integer
//! - `step_matrix`, `bar_variants`, `chord_steps`: fixed-width field codecs
//! - `metadata`: the `VERSION:TEMPO:...` envelope and per-version dispatch
//!
//! `inference` rebuilds bar variants for versions that never stored them.

pub mod bar_variants;
pub mod base62;
pub mod bits;
pub mod chord_steps;
pub mod error;
pub mod inference;
pub mod metadata;
pub mod step_matrix;
pub mod version;

pub use bits::BitString;
pub use error::{CodecError, Result};
pub use metadata::{decode_metadata, decode_token, encode_state, DecodedMetadata, MetadataCodec};
pub use version::FormatVersion;
