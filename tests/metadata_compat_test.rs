// Test that every historical token version still decodes into a full loop

use loopcode_wasm::codec::base62;
use loopcode_wasm::codec::bits::BitString;
use loopcode_wasm::models::{ChordIndex, ChordStep, LoopState, TrackSet, STEP_COUNT};
use loopcode_wasm::{decode_metadata, decode_token, encode_state, CodecError, FormatVersion, MetadataCodec};

/// Helper to check the invariant shape of any decoded state
fn assert_full_shape(state: &LoopState) {
    assert_eq!(state.step_matrix().len(), 4, "four track rows");
    assert_eq!(state.bar_variants().len(), 4, "four variant rows");
    assert_eq!(state.chord_steps().len(), STEP_COUNT);
    assert_eq!(state.chord_selections().len(), 4);
}

/// Helper to build a matrix with the given (track, step) cells active
fn matrix_with(active: &[(usize, usize)]) -> Vec<[bool; STEP_COUNT]> {
    let mut matrix = vec![[false; STEP_COUNT]; 4];
    for &(track, step) in active {
        matrix[track][step] = true;
    }
    matrix
}

#[test]
fn test_v1_single_bit_pattern() {
    let state = decode_token("V1:120:1").expect("V1 token should decode");
    assert_full_shape(&state);

    assert_eq!(state.step_matrix(), &matrix_with(&[(3, 15)])[..]);
    assert!(state.chord_steps().iter().all(ChordStep::is_empty));
    assert_eq!(state.chord_selections(), &[None; 4]);

    // sub track bar 4 reads 0001; "shift" (0101) is the closest variant
    assert_eq!(state.bar_variants(), &[[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 1]][..]);
}

#[test]
fn test_v1_with_legacy_label() {
    let decoded = decode_metadata("V1:96:zz:Sunday loop").unwrap();
    assert_eq!(decoded.version, FormatVersion::V1);
    assert_eq!(decoded.legacy_label, "Sunday loop");
    assert_full_shape(&decoded.state);
}

#[test]
fn test_v2_keeps_arbitrary_chord_runs() {
    // chord 12 at step 2 sustained 6 steps: not bar aligned
    let mut bits = BitString::new();
    bits.push_zeros(2 * 12);
    bits.push(true);
    bits.push_field(12, 7);
    bits.push_field(5, 4);
    bits.push_zeros(13 * 12);
    let chords = base62::encode(&bits);

    let state = decode_token(&format!("V2:100:0:{}", chords)).unwrap();
    assert_full_shape(&state);

    let chord = ChordIndex::new(12).unwrap();
    assert_eq!(state.chord_steps()[2], ChordStep::head(chord, 6));
    for step in 3..8 {
        assert_eq!(state.chord_steps()[step], ChordStep::sustain(chord));
    }
    assert!(state.chord_steps()[8].is_empty());
    assert_eq!(state.chord_selections(), &[Some(chord), None, None, None]);
}

#[test]
fn test_v2_infers_variants_from_matrix() {
    // drum bar 2 = 1010 ("sync"), melody bar 1 = 0110 ("flow")
    let matrix = matrix_with(&[(0, 0), (0, 4), (0, 6), (0, 8), (0, 12), (2, 1), (2, 2)]);
    let pattern = loopcode_wasm::codec::step_matrix::encode_step_matrix(&matrix);

    let state = decode_token(&format!("V2:100:{}:0", pattern)).unwrap();
    assert_eq!(state.bar_variants()[0], [0, 1, 0, 0]);
    assert_eq!(state.bar_variants()[2][0], 2);
    assert_eq!(state.step_matrix(), &matrix[..]);
}

#[test]
fn test_v3_one_bit_variant_cells() {
    // 16 one-bit cells, drum bar 1 and sub bar 4 set
    let mut bits = BitString::new();
    bits.push(true);
    bits.push_zeros(14);
    bits.push(true);
    let variants = base62::encode(&bits);

    let state = decode_token(&format!("V3:140:0:0:{}", variants)).unwrap();
    assert_full_shape(&state);
    assert_eq!(state.bar_variants()[0], [1, 0, 0, 0]);
    assert_eq!(state.bar_variants()[3], [0, 0, 0, 1]);
}

#[test]
fn test_v3_and_v4_read_same_field_differently() {
    let v3 = decode_token("V3:120:0:0:3").unwrap();
    let v4 = decode_token("V4:120:0:0:3").unwrap();
    // "3" = 0b11: two 1-bit cells in V3, one 2-bit cell in V4
    assert_eq!(v3.bar_variants()[3], [0, 0, 1, 1]);
    assert_eq!(v4.bar_variants()[3], [0, 0, 0, 3]);
}

#[test]
fn test_corrupt_variant_cells_are_clamped() {
    let mut three_variant = TrackSet::reference().tracks()[0].clone();
    three_variant.variants.truncate(3);
    let set = TrackSet::new(vec![three_variant]).unwrap();
    let codec = MetadataCodec::new(&set);

    // "47" = 255 = 0b11111111: every 2-bit cell is 3, one past the last variant
    let state = codec.decode_token("V4:120:0:0:47").expect("clamping should not fail");
    assert_eq!(state.bar_variants(), &[[2, 2, 2, 2]][..]);
}

#[test]
fn test_boundary_tempos() {
    assert_eq!(decode_token("V4:40:0:0:0").unwrap().tempo(), 40);
    assert_eq!(decode_token("V4:220:0:0:0").unwrap().tempo(), 220);
    assert_eq!(decode_token("V4:39:0:0:0"), Err(CodecError::TempoOutOfRange(39)));
    assert_eq!(decode_token("V4:221:0:0:0"), Err(CodecError::TempoOutOfRange(221)));
    assert_eq!(decode_token("V1:-5:0"), Err(CodecError::TempoOutOfRange(-5)));
}

#[test]
fn test_unsupported_version() {
    assert_eq!(
        decode_token("V5:120:0:0:0"),
        Err(CodecError::UnsupportedVersion("V5".to_string()))
    );
}

#[test]
fn test_encoder_never_writes_legacy_versions() {
    let state = decode_token("V1:88:ABC").unwrap();
    let token = encode_state(&state);
    assert!(token.starts_with("V4:88:"));
    assert_eq!(token.split(':').count(), 5);

    // the upgraded token plays back the same grid the V1 link showed
    let upgraded = decode_token(&token).unwrap();
    assert_eq!(upgraded.step_matrix(), state.step_matrix());
    assert_eq!(upgraded.bar_variants(), state.bar_variants());
}

#[test]
fn test_overlong_pattern_and_chord_fields_keep_leftmost_bits() {
    // 65 pattern bits: drum step 1 set, plus one trailing bit past the grid
    let mut pattern = BitString::new();
    pattern.push(true);
    pattern.push_zeros(63);
    pattern.push(true);

    // 193 chord bits: chord 5 held for 4 steps, plus one trailing bit
    let mut chords = BitString::new();
    chords.push(true);
    chords.push_field(5, 7);
    chords.push_field(3, 4);
    chords.push_zeros(15 * 12);
    chords.push(true);

    let token = format!("V4:120:{}:{}:0", base62::encode(&pattern), base62::encode(&chords));
    let state = decode_token(&token).unwrap();

    assert_eq!(state.step_matrix(), &matrix_with(&[(0, 0)])[..]);

    let chord = ChordIndex::new(5).unwrap();
    assert_eq!(state.chord_steps()[0], ChordStep::head(chord, 4));
    assert_eq!(state.chord_steps()[3], ChordStep::sustain(chord));
    assert!(state.chord_steps()[4..].iter().all(ChordStep::is_empty));
}
