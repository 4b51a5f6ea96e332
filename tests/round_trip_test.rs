// Test that encode -> decode reproduces a loop exactly

use loopcode_wasm::codec::base62;
use loopcode_wasm::codec::chord_steps::decode_chord_steps;
use loopcode_wasm::models::{ChordIndex, ChordQuality, ChordStep, LoopState, TrackSet, STEP_COUNT};
use loopcode_wasm::{decode_token, encode_state};

/// Small deterministic generator so the sweep is reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

/// Helper to build a random but valid state from bar-level choices
fn random_state(rng: &mut Lcg) -> LoopState {
    let tracks = TrackSet::reference();
    let tempo = 40 + rng.below(181) as i64;
    let variants = (0..tracks.len())
        .map(|_| std::array::from_fn(|_| rng.below(4) as u8))
        .collect();
    let selections = std::array::from_fn(|_| {
        if rng.below(3) == 0 {
            None
        } else {
            ChordIndex::new(rng.below(96) as u8)
        }
    });
    LoopState::from_selections(tracks, tempo, variants, selections).unwrap()
}

#[test]
fn test_round_trip_sweep() {
    let mut rng = Lcg(0x5eed);
    for _ in 0..500 {
        let state = random_state(&mut rng);
        let token = encode_state(&state);
        let decoded = decode_token(&token).unwrap_or_else(|e| panic!("{} failed: {}", token, e));
        assert_eq!(decoded, state, "token {}", token);
    }
}

#[test]
fn test_round_trip_keeps_hand_drawn_matrix() {
    let tracks = TrackSet::reference();
    let mut rng = Lcg(42);
    for _ in 0..100 {
        let matrix = (0..tracks.len())
            .map(|_| std::array::from_fn(|_| rng.below(2) == 1))
            .collect();
        let variants = vec![[0; 4]; tracks.len()];
        let state = LoopState::from_parts(tracks, 120, matrix, variants, [ChordStep::EMPTY; STEP_COUNT]).unwrap();

        let decoded = decode_token(&encode_state(&state)).unwrap();
        assert_eq!(decoded.step_matrix(), state.step_matrix());
        assert_eq!(decoded.tempo(), 120);
    }
}

#[test]
fn test_single_active_step_scenario() {
    let tracks = TrackSet::reference();
    let mut matrix = vec![[false; STEP_COUNT]; 4];
    matrix[0][0] = true;
    let state = LoopState::from_parts(tracks, 120, matrix.clone(), vec![[0; 4]; 4], [ChordStep::EMPTY; STEP_COUNT]).unwrap();

    let token = encode_state(&state);
    let fields: Vec<&str> = token.split(':').collect();
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[0], "V4");
    assert_eq!(fields[1], "120");
    assert_eq!(fields[3], "0");
    assert_eq!(fields[4], "0");
    // 1 followed by 63 zero bits
    assert_eq!(base62::decode(fields[2]).unwrap().len(), 64);

    let decoded = decode_token(&token).unwrap();
    assert_eq!(decoded.tempo(), 120);
    assert_eq!(decoded.step_matrix(), &matrix[..]);
}

#[test]
fn test_chord_head_run_expansion() {
    let tracks = TrackSet::reference();
    let mut state = LoopState::new(tracks);
    let chord = ChordIndex::from_parts(2, ChordQuality::Lydian).unwrap();
    state.set_chord_selection(0, Some(chord));

    let token = encode_state(&state);
    let chords_field = token.split(':').nth(3).unwrap();
    let steps = decode_chord_steps(chords_field).unwrap();

    for (index, step) in steps.iter().enumerate().take(4) {
        assert_eq!(step.chord_index, Some(chord));
        assert_eq!(step.head, index == 0);
    }
    assert_eq!(steps[0].length, 4);
    assert!(steps[4..].iter().all(ChordStep::is_empty));
}

#[test]
fn test_edit_then_share_then_edit() {
    let tracks = TrackSet::reference();
    let mut state = LoopState::new(tracks);
    state.cycle_bar_variant(tracks, 1, 2);
    state.set_chord_selection(3, ChordIndex::new(7));

    let mut reloaded = decode_token(&encode_state(&state)).unwrap();
    reloaded.cycle_bar_variant(tracks, 1, 2);
    state.cycle_bar_variant(tracks, 1, 2);
    assert_eq!(reloaded, state);
}
