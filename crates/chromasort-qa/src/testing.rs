//! Level fixtures shared by the unit tests.

use chromasort_core::{Difficulty, Level, PuzzleState};

/// Builds a level from the text form of its initial state.
#[track_caller]
pub(crate) fn level(id: &str, difficulty: Difficulty, state: &str) -> Level {
    let state: PuzzleState = state.parse().unwrap();
    Level::new(id, id, difficulty, state).unwrap()
}

/// Initial states with a known optimal move count, shortest first.
pub(crate) const BY_OPTIMAL_MOVES: [(&str, usize); 4] = [
    ("2:RB 2:B 2:R 2:", 1),
    ("2:RB 2:BR 2:", 2),
    ("4:RBRB 4: 4:", 3),
    ("4:RBR 4:BRB 4: 4:", 4),
];

/// One level per tier whose optimal move count grows with the tier.
pub(crate) fn ascending_tiers() -> Vec<Level> {
    Difficulty::ALL
        .into_iter()
        .zip(BY_OPTIMAL_MOVES)
        .map(|(difficulty, (state, _))| level(difficulty.name(), difficulty, state))
        .collect()
}
