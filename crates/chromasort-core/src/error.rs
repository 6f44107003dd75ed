//! Errors raised while constructing model values.

use crate::ContainerId;

/// Malformed input rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ModelError {
    /// A container was declared with zero capacity.
    #[display("container {id} has zero capacity")]
    ZeroCapacity {
        /// Offending container.
        id: ContainerId,
    },
    /// A container holds more units than its capacity.
    #[display("container {id} holds {len} units but has capacity {capacity}")]
    Overflow {
        /// Offending container.
        id: ContainerId,
        /// Number of units supplied.
        len: usize,
        /// Declared capacity.
        capacity: usize,
    },
    /// A puzzle state was built without any containers.
    #[display("puzzle has no containers")]
    EmptyPuzzle,
    /// Two containers in one puzzle share an id.
    #[display("container id {id} is used more than once")]
    DuplicateContainerId {
        /// Repeated id.
        id: ContainerId,
    },
    /// Star thresholds were not exactly three values.
    #[display("star thresholds must have exactly 3 entries, got {len}")]
    StarThresholdCount {
        /// Number of supplied thresholds.
        len: usize,
    },
    /// Star thresholds were not strictly ascending.
    #[display("star thresholds must be strictly ascending: {thresholds:?}")]
    StarThresholdOrder {
        /// Supplied thresholds.
        thresholds: [u32; 3],
    },
    /// A level was given an empty id.
    #[display("level id must not be empty")]
    EmptyLevelId,
    /// A level was given a move limit of zero.
    #[display("move limit must be positive")]
    ZeroMoveLimit,
}

/// Errors from parsing the text form of a [`PuzzleState`](crate::PuzzleState).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseStateError {
    /// A token did not have the `capacity:codes` shape.
    #[display("malformed container token {token:?}")]
    MalformedToken {
        /// The offending token.
        token: String,
    },
    /// The capacity part of a token was not a number.
    #[display("invalid capacity in token {token:?}")]
    InvalidCapacity {
        /// The offending token.
        token: String,
    },
    /// A color code was not recognized.
    #[display("unknown color code {code:?}")]
    UnknownColor {
        /// The offending code.
        code: char,
    },
    /// The parsed containers did not form a valid puzzle.
    #[display("invalid puzzle: {_0}")]
    Model(ModelError),
}

impl From<ModelError> for ParseStateError {
    fn from(err: ModelError) -> Self {
        Self::Model(err)
    }
}
