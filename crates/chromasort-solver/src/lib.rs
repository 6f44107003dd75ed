//! Bounded breadth-first solvability search for color-sorting puzzles.
//!
//! [`BfsSolver`] decides whether a [`PuzzleState`](chromasort_core::PuzzleState)
//! can be won and, when it can, reports the optimal number of moves. Searches
//! are bounded by [`SearchLimits`]; hitting a bound is reported as its own
//! [`SearchOutcome`] so callers can tell "no solution" from "gave up".
//!
//! [`assess_quality`] adds heuristic [`QualityFinding`]s, and [`Validation`]
//! combines both into a single [`Verdict`].
//!
//! # Examples
//!
//! ```
//! use chromasort_core::PuzzleState;
//! use chromasort_solver::{BfsSolver, Verdict, validate};
//!
//! let state: PuzzleState = "4:RBR 4:BRB 4: 4:".parse()?;
//! let validation = validate(&BfsSolver::default(), &state);
//! assert_eq!(validation.optimal_move_count(), Some(4));
//! assert_eq!(validation.verdict_strict(), Verdict::Pass);
//! # Ok::<(), chromasort_core::ParseStateError>(())
//! ```

mod bfs_solver;
pub mod quality;
pub mod validation;

pub use self::{
    bfs_solver::{
        BfsSolver, PROGRESS_INTERVAL, SearchHooks, SearchLimits, SearchOutcome, SearchReport,
    },
    quality::{QualityFinding, assess_quality},
    validation::{QualityPolicy, Validation, Verdict, validate},
};
