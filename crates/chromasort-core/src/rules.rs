//! Move legality, pouring and win detection.
//!
//! These functions are the whole surface a live-play front end needs: it
//! asks [`can_move`] to highlight legal targets, submits a [`Move`] through
//! [`play_move`], and reads back the new state and whether the puzzle is won.
//!
//! # Examples
//!
//! ```
//! use chromasort_core::{
//!     PuzzleState,
//!     rules::{self, Move},
//! };
//!
//! let state: PuzzleState = "2:RB 2:B 2:R".parse()?;
//! let result = rules::play_move(&state, Move::new(0, 1))?;
//! assert_eq!(result.units_moved, 1);
//! assert!(result.is_won);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{Container, PuzzleState};

/// A request to pour from one container into another, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Position of the source container.
    pub from: usize,
    /// Position of the destination container.
    pub to: usize,
}

impl Move {
    /// Creates a move request.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// The answer to a successfully played [`Move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// State after the pour.
    pub state: PuzzleState,
    /// Number of units that moved.
    pub units_moved: usize,
    /// Whether the new state is won.
    pub is_won: bool,
}

/// A move that cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Source and destination are the same container.
    #[display("cannot pour container {index} into itself")]
    SameContainer {
        /// The repeated position.
        index: usize,
    },
    /// A position does not name a container.
    #[display("container index {index} out of range (puzzle has {len} containers)")]
    OutOfRange {
        /// The offending position.
        index: usize,
        /// Number of containers.
        len: usize,
    },
    /// The pour breaks the move rules.
    #[display("illegal move from {from} to {to}")]
    Illegal {
        /// Source position.
        from: usize,
        /// Destination position.
        to: usize,
    },
}

/// Returns `true` if `from` can pour into `to`.
///
/// Legal iff `from` is non-empty, `to` is not full, and `to` is empty or has
/// the same top color as `from`.
#[must_use]
pub fn can_move(from: &Container, to: &Container) -> bool {
    let Some(top) = from.top() else {
        return false;
    };
    !to.is_full() && to.top().is_none_or(|target| target == top)
}

/// Returns the number of units a pour from `from` into `to` transfers.
///
/// This is the top run of `from`, capped by the free space of `to`. It is at
/// least 1 whenever [`can_move`] holds; callers must check that first.
#[must_use]
pub fn move_count(from: &Container, to: &Container) -> usize {
    debug_assert!(can_move(from, to));
    from.top_run().min(to.free_space())
}

/// Returns the state after pouring container `from_index` into `to_index`.
///
/// # Errors
///
/// Returns [`MoveError`] if the indices are equal, out of range, or the pour
/// is not legal.
pub fn apply_move(
    state: &PuzzleState,
    from_index: usize,
    to_index: usize,
) -> Result<PuzzleState, MoveError> {
    pour(state, Move::new(from_index, to_index)).map(|(state, _)| state)
}

/// Plays a move on behalf of a live-play front end.
///
/// # Errors
///
/// Returns [`MoveError`] under the same conditions as [`apply_move`].
pub fn play_move(state: &PuzzleState, mv: Move) -> Result<MoveResult, MoveError> {
    let (state, units_moved) = pour(state, mv)?;
    let is_won = is_won(&state);
    Ok(MoveResult {
        state,
        units_moved,
        is_won,
    })
}

fn pour(state: &PuzzleState, mv: Move) -> Result<(PuzzleState, usize), MoveError> {
    let Move { from, to } = mv;
    if from == to {
        return Err(MoveError::SameContainer { index: from });
    }
    let len = state.len();
    let (Some(source), Some(target)) = (state.container(from), state.container(to)) else {
        let index = if from >= len { from } else { to };
        return Err(MoveError::OutOfRange { index, len });
    };
    if !can_move(source, target) {
        return Err(MoveError::Illegal { from, to });
    }
    Ok(pour_unchecked(state, mv))
}

fn pour_unchecked(state: &PuzzleState, Move { from, to }: Move) -> (PuzzleState, usize) {
    let mut containers = state.containers().to_vec();
    let count = move_count(&containers[from], &containers[to]);
    let units = containers[from].take_top(count);
    containers[to].push_units(units);
    (PuzzleState::from_moved(containers), count)
}

/// Returns `true` if every container is empty or holds a single color.
#[must_use]
pub fn is_won(state: &PuzzleState) -> bool {
    state.containers().iter().all(Container::is_uniform)
}

/// Returns `true` if at least one ordered pair of distinct containers can pour.
#[must_use]
pub fn has_any_valid_move(state: &PuzzleState) -> bool {
    legal_moves(state).next().is_some()
}

/// Iterates over all legal moves, ordered by source then destination.
pub fn legal_moves(state: &PuzzleState) -> impl Iterator<Item = Move> + '_ {
    let containers = state.containers();
    containers.iter().enumerate().flat_map(move |(i, from)| {
        containers
            .iter()
            .enumerate()
            .filter(move |&(j, to)| i != j && can_move(from, to))
            .map(move |(j, _)| Move::new(i, j))
    })
}

/// Iterates over every legal move paired with the state it produces.
///
/// Moves come in the same order as [`legal_moves`].
pub fn successors(state: &PuzzleState) -> impl Iterator<Item = (Move, PuzzleState)> + '_ {
    legal_moves(state).map(move |mv| (mv, pour_unchecked(state, mv).0))
}
