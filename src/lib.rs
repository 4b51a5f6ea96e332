//! Loop Codec WASM Module
//!
//! Encodes a four-bar step-sequenced loop (drum, bass and two melody
//! tracks, optional per-bar chords) into a short base-62 token that can
//! travel in a URL or QR code, and decodes any historical token version
//! back into the same loop.

pub mod models;
pub mod codec;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use codec::{decode_metadata, decode_token, encode_state, CodecError, DecodedMetadata, FormatVersion, MetadataCodec};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug); // Err only if a logger is already set

    log::info!("Loop codec WASM module initialized");
}
