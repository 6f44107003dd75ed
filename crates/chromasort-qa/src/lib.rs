//! Quality assurance over whole corpora of color-sorting levels.
//!
//! [`BatchTester`] validates many [`Level`](chromasort_core::Level)s in
//! parallel and collects a [`BatchResult`]. The same per-level results feed
//! the corpus checks:
//!
//! - [`find_duplicates`] groups levels with identical initial layouts.
//! - [`DifficultyProgression`] checks that harder tiers need more moves.
//! - [`Statistics`] summarizes move counts and the tier distribution.
//!
//! [`BatchTester::report`] runs all of them with a single search per level
//! and bundles the outcome into a [`QaReport`].
//!
//! # Examples
//!
//! ```
//! use chromasort_core::{Difficulty, Level, PuzzleState};
//! use chromasort_qa::BatchTester;
//!
//! let easy: PuzzleState = "2:RB 2:B 2:R 2:".parse()?;
//! let hard: PuzzleState = "4:RBR 4:BRB 4: 4:".parse()?;
//! let levels = [
//!     Level::new("easy-001", "Easy 1", Difficulty::Easy, easy)?,
//!     Level::new("hard-001", "Hard 1", Difficulty::Hard, hard)?,
//! ];
//!
//! let report = BatchTester::default().report(&levels, |_done, _total| {});
//! assert!(report.is_clean());
//! assert!(report.progression.is_monotonic);
//! assert_eq!(report.statistics.max_moves, Some(4));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod batch;
mod duplicates;
mod progression;
mod report;
mod statistics;
#[cfg(test)]
mod testing;

pub use self::{
    batch::{BatchResult, BatchTester, LevelResult},
    duplicates::{DuplicateGroup, find_duplicates},
    progression::{DifficultyProgression, TierAverage},
    report::QaReport,
    statistics::Statistics,
};

#[cfg(test)]
mod tests {
    use chromasort_core::Difficulty;
    use chromasort_generator::{
        GeneratorConfig, LevelGenerator, PackRequest, TierParams, TierTable, generate_level_pack,
    };
    use chromasort_solver::{BfsSolver, SearchLimits};

    use super::*;

    fn tester_for(config: &GeneratorConfig) -> BatchTester {
        BatchTester::from_fn(|difficulty| BfsSolver::new(config.tiers.get(difficulty).limits))
    }

    #[test]
    fn test_generated_pack_passes_qa() {
        let limits = SearchLimits::default().with_max_states(20_000);
        let config = GeneratorConfig {
            tiers: TierTable {
                easy: TierParams::new(2, 3, 2).with_limits(limits),
                medium: TierParams::new(3, 3, 2).with_limits(limits),
                hard: TierParams::new(3, 4, 2).with_limits(limits),
                expert: TierParams::new(4, 4, 2).with_limits(limits),
            },
            ..GeneratorConfig::default()
        };
        let generator = LevelGenerator::new(config).unwrap();
        let request = PackRequest::new(["Ocean", "Forest"], 4, 7);
        let pack = generate_level_pack(&generator, &request, |_, _| {}).unwrap();
        let levels: Vec<_> = pack.levels.into_iter().map(|g| g.level).collect();

        let report = tester_for(generator.config()).report(&levels, |_, _| {});
        assert_eq!(report.batch.failed, 0, "{report}");
        assert_eq!(report.statistics.total, 8);
        for difficulty in Difficulty::ALL {
            assert_eq!(report.statistics.difficulty_distribution[&difficulty], 2);
        }
    }

    #[test]
    fn test_default_tiers_pass_qa_with_their_own_limits() {
        let generator = LevelGenerator::default();
        let request = PackRequest::new(["Ocean"], 8, 0);
        let pack = generate_level_pack(&generator, &request, |_, _| {}).unwrap();
        let levels: Vec<_> = pack.levels.into_iter().map(|g| g.level).collect();

        let report = tester_for(generator.config()).report(&levels, |_, _| {});
        assert_eq!(report.batch.failed, 0, "{report}");
        assert!(report.progression.unsolved_tiers.is_empty(), "{report}");
        for difficulty in Difficulty::ALL {
            assert_eq!(report.statistics.difficulty_distribution[&difficulty], 2);
        }
    }
}
