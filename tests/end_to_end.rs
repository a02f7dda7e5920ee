use cube_solver::catalog::{format_sequence, parse_sequence, random_scramble_with};
use cube_solver::{
    solve, Face, InvalidMoveError, PuzzleState, SearchMoves, SolvePhase, SolveStatus, Solver,
    SolverConfig,
};

fn scrambled(tokens: &str) -> PuzzleState {
    let mut state = PuzzleState::solved();
    state.scramble(tokens).unwrap();
    state
}

#[test_log::test]
fn test_right_turn_from_solved() {
    let state = scrambled("R");
    assert_eq!(
        state.fingerprint().to_string(),
        "WWBWWBWWBYYGYYGYYGOOOOOOOOORRRRRRRRRGGWGGWGGWYBBYBBYBB"
    );
    assert_eq!(state.face(Face::L), PuzzleState::solved().face(Face::L));
    assert!(!state.is_solved());
}

#[test_log::test]
fn test_repeated_commutator_returns_to_solved() {
    let mut state = PuzzleState::solved();
    for _ in 0..4 {
        state.scramble("R U R' U'").unwrap();
    }
    assert!(!state.is_solved());

    for _ in 0..2 {
        state.scramble("R U R' U'").unwrap();
    }
    assert!(state.is_solved());
}

#[test_log::test]
fn test_mixed_scramble_solved_with_half_turn_search() {
    let config = SolverConfig::default().with_search_moves(SearchMoves::AllTurns);
    let solution = Solver::new(config).solve(&scrambled("U R2 F' L2"));
    assert_eq!(solution.status, SolveStatus::Solved);
    assert_eq!(solution.phase, SolvePhase::Search);
    assert_eq!(format_sequence(&solution.moves), "L2 F R2 U'");

    // replay on a fresh scramble of the same string
    let mut replay = scrambled("U R2 F' L2");
    replay.apply_sequence(&solution.moves);
    assert!(replay.is_solved());
}

#[test_log::test]
fn test_mixed_scramble_with_default_budget_is_best_effort() {
    let state = scrambled("U R2 F' L2");
    let solution = solve(&state);
    assert_eq!(solution.status, SolveStatus::Exhausted);

    let mut replay = state.clone();
    replay.apply_sequence(&solution.moves);
    assert_eq!(replay.is_solved(), solution.is_solved());
}

#[test_log::test]
fn test_solved_input_costs_nothing() {
    let solution = solve(&PuzzleState::solved());
    assert!(solution.moves.is_empty());
    assert_eq!(solution.phase, SolvePhase::AlreadySolved);
    assert_eq!(solution.stats.nodes_expanded, 0);
}

#[test_log::test]
fn test_empty_token_is_noop() {
    let mut state = scrambled("B D");
    let before = state.fingerprint();
    state.apply_move("").unwrap();
    assert_eq!(state.fingerprint(), before);
}

#[test_log::test]
fn test_invalid_tokens_leave_state_unmodified() {
    let mut state = scrambled("F2 L'");
    let before = state.clone();

    assert!(matches!(
        state.apply_move("X"),
        Err(InvalidMoveError::InvalidFace { face: 'X', .. })
    ));
    assert!(matches!(
        state.apply_move("U3"),
        Err(InvalidMoveError::InvalidModifier { modifier: '3', .. })
    ));
    assert_eq!(state, before);
}

#[test_log::test]
fn test_shallow_random_scrambles_are_solved() {
    let mut rng = fastrand::Rng::with_seed(2024);
    for _ in 0..10 {
        let scramble = random_scramble_with(&mut rng, 2);
        let mut state = PuzzleState::solved();
        state.apply_sequence(&scramble);

        let config = SolverConfig::default().with_search_moves(SearchMoves::AllTurns);
        let solution = Solver::new(config).solve(&state);
        assert!(solution.is_solved(), "scramble {}", format_sequence(&scramble));
        assert!(solution.moves.len() <= 2);

        state.apply_sequence(&solution.moves);
        assert!(state.is_solved());
    }
}

#[test_log::test]
fn test_fingerprint_round_trip_for_reachable_states() {
    let mut rng = fastrand::Rng::with_seed(99);
    let states: Vec<PuzzleState> = (0..20)
        .map(|_| {
            let mut state = PuzzleState::solved();
            state.apply_sequence(&random_scramble_with(&mut rng, 20));
            state
        })
        .collect();

    for state in &states {
        let restored = PuzzleState::from_fingerprint(&state.fingerprint().to_string()).unwrap();
        assert_eq!(&restored, state);
        assert!(state.has_balanced_colors());
    }
    for a in &states {
        for b in &states {
            assert_eq!(a.fingerprint() == b.fingerprint(), a == b);
        }
    }
}

#[test_log::test]
fn test_validated_sequence_then_apply() {
    assert!(parse_sequence("R U Z").is_err());

    let moves = parse_sequence("R U").unwrap();
    let mut state = PuzzleState::solved();
    state.apply_sequence(&moves);
    assert_eq!(state, scrambled("R U"));
}
