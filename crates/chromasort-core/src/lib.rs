//! Core data structures and move rules for color-sorting puzzles.
//!
//! A puzzle is a row of [`Container`]s, each a bounded stack of [`Color`]
//! units. A move pours the top run of one container onto another; the
//! puzzle is won when every container is empty or holds a single color.
//!
//! # Overview
//!
//! - [`color`]: the closed set of [`Color`]s and [`ColorSet`].
//! - [`container`]: [`Container`] and its [`ContainerId`].
//! - [`state`]: immutable [`PuzzleState`] snapshots and their canonical
//!   [`Fingerprint`].
//! - [`rules`]: move legality, pouring and win detection. This is the
//!   interface live play uses.
//! - [`level`]: immutable [`Level`] definitions with [`Difficulty`] tiers and
//!   [`StarThresholds`].
//! - [`record`]: serializable [`LevelRecord`]s for export.
//!
//! # Examples
//!
//! ```
//! use chromasort_core::{PuzzleState, rules};
//!
//! let state: PuzzleState = "4:RBR 4:BRB 4: 4:".parse()?;
//! assert!(!rules::is_won(&state));
//!
//! let next = rules::apply_move(&state, 0, 2)?;
//! assert_eq!(next.to_string(), "4:RB 4:BRB 4:R 4:");
//! assert_eq!(next.color_counts(), state.color_counts());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod color;
pub mod container;
pub mod error;
pub mod level;
pub mod record;
pub mod rules;
pub mod state;

pub use self::{
    color::{Color, ColorSet},
    container::{Container, ContainerId},
    error::{ModelError, ParseStateError},
    level::{Difficulty, Level, ParseDifficultyError, StarThresholds},
    record::{ContainerRecord, LevelRecord},
    rules::{Move, MoveError, MoveResult},
    state::{Fingerprint, PuzzleState},
};
