use chromasort_core::{Difficulty, ModelError};
use chromasort_solver::SearchOutcome;

/// Why a single candidate state was discarded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Rejection {
    /// The shuffled deal happened to be sorted already.
    #[display("candidate was already won")]
    AlreadyWon,
    /// No move is legal from the candidate.
    #[display("candidate has no legal move")]
    NoValidMove,
    /// The solvability search did not find a solution.
    #[display("search found no solution ({outcome:?})")]
    Unsolved {
        /// How the search ended.
        outcome: SearchOutcome,
    },
    /// Strict mode rejected a candidate with quality findings.
    #[display("strict quality check raised {findings} finding(s)")]
    Quality {
        /// Number of findings.
        findings: usize,
    },
}

/// Failure to produce a single level.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerationError {
    /// Every candidate attempt was rejected.
    #[display(
        "no acceptable {difficulty} level {level_number} for theme {theme:?} after {attempts} attempt(s); last: {last_rejection}"
    )]
    Exhausted {
        /// Requested tier.
        difficulty: Difficulty,
        /// Requested level number.
        level_number: u32,
        /// Requested theme.
        theme: String,
        /// Number of candidates tried.
        attempts: u32,
        /// Reason the final candidate was discarded.
        last_rejection: Rejection,
    },
    /// An accepted candidate could not be turned into a level.
    #[display("failed to build level: {_0}")]
    Model(ModelError),
}

impl From<ModelError> for GenerationError {
    fn from(err: ModelError) -> Self {
        Self::Model(err)
    }
}

/// Failure of a whole level pack.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PackError {
    /// A theme kept failing after all whole-theme retries.
    #[display("theme {theme:?} failed after {attempts} attempt(s): {source}")]
    ThemeFailed {
        /// Failed theme.
        theme: String,
        /// Number of whole-theme attempts.
        attempts: u32,
        /// Error from the final attempt.
        source: GenerationError,
    },
    /// Two themes would produce the same level ids.
    #[display("themes {first:?} and {second:?} share the id prefix {slug:?}")]
    ThemeIdCollision {
        /// Earlier theme in the request.
        first: String,
        /// Later theme in the request.
        second: String,
        /// Shared id prefix.
        slug: String,
    },
}
