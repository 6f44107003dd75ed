//! Deterministic generation of solvable color-sorting levels.
//!
//! [`LevelGenerator`] deals shuffled candidates shaped by the tier table of a
//! [`GeneratorConfig`], screens them with the move rules and the solvability
//! search, and turns the first acceptable one into a
//! [`Level`](chromasort_core::Level). Every random choice flows from a
//! [`LevelSeed`] derived from the request, so the same request always yields
//! the same level.
//!
//! [`generate_level_pack`] repeats this for several themes in parallel.
//!
//! # Examples
//!
//! ```
//! use chromasort_core::Difficulty;
//! use chromasort_generator::{LevelGenerator, PackRequest, generate_level_pack};
//!
//! let generator = LevelGenerator::default();
//! let request = PackRequest::new(["Ocean", "Forest"], 1, 42);
//! let pack = generate_level_pack(&generator, &request, |_current, _total| {})?;
//!
//! assert_eq!(pack.levels.len(), 2);
//! assert_eq!(pack.levels[1].level.id(), "forest-001");
//! assert_eq!(pack.levels[1].level.difficulty(), Difficulty::Easy);
//! # Ok::<(), chromasort_generator::PackError>(())
//! ```

pub mod config;
mod difficulty;
mod error;
mod level_generator;
mod pack;
mod seed;

pub use self::{
    config::{ConfigError, GeneratorConfig, TierParams, TierTable},
    difficulty::{DifficultyEstimate, estimate_difficulty},
    error::{GenerationError, PackError, Rejection},
    level_generator::{GeneratedLevel, LevelGenerator},
    pack::{
        LevelPack, PackFailurePolicy, PackRequest, ThemeFailure, difficulty_for_position,
        generate_level_pack,
    },
    seed::{LevelSeed, ParseSeedError},
};
