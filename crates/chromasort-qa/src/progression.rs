use chromasort_core::Difficulty;
use serde::Serialize;

use crate::LevelResult;

/// Mean optimal move count of the solvable levels in one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierAverage {
    /// The tier.
    pub difficulty: Difficulty,
    /// Number of solvable levels averaged.
    pub levels: usize,
    /// Mean optimal move count.
    pub average_moves: f64,
}

/// Whether harder tiers really take more moves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyProgression {
    /// Averages of the tiers with at least one solvable level, easy first.
    pub tiers: Vec<TierAverage>,
    /// Tiers that have levels but none with a known optimal move count.
    pub unsolved_tiers: Vec<Difficulty>,
    /// `true` if every tested tier has an average and the averages strictly
    /// increase from tier to tier.
    pub is_monotonic: bool,
}

impl DifficultyProgression {
    /// Computes per-tier averages from batch results.
    ///
    /// Unsolvable and inconclusive levels are left out of the averages. Tiers
    /// without any levels are skipped, but a tier whose levels all lack an
    /// optimal move count is listed in `unsolved_tiers` and makes the
    /// progression non-monotonic.
    #[must_use]
    pub fn from_results(results: &[LevelResult]) -> Self {
        let mut tiers = Vec::new();
        let mut unsolved_tiers = Vec::new();
        for difficulty in Difficulty::ALL {
            let in_tier: Vec<&LevelResult> = results
                .iter()
                .filter(|result| result.difficulty == difficulty)
                .collect();
            let moves: Vec<usize> = in_tier
                .iter()
                .filter_map(|result| result.validation.optimal_move_count())
                .collect();
            if !moves.is_empty() {
                tiers.push(TierAverage {
                    difficulty,
                    levels: moves.len(),
                    average_moves: mean(&moves),
                });
            } else if !in_tier.is_empty() {
                unsolved_tiers.push(difficulty);
            }
        }

        let is_monotonic = unsolved_tiers.is_empty()
            && tiers
                .windows(2)
                .all(|pair| pair[0].average_moves < pair[1].average_moves);
        if !is_monotonic {
            log::warn!(
                "difficulty progression is not monotonic: {tiers:?}, unsolved tiers: {unsolved_tiers:?}"
            );
        }
        Self {
            tiers,
            unsolved_tiers,
            is_monotonic,
        }
    }

    /// Returns the average of `difficulty`, if it had solvable levels.
    #[must_use]
    pub fn average(&self, difficulty: Difficulty) -> Option<f64> {
        self.tiers
            .iter()
            .find(|tier| tier.difficulty == difficulty)
            .map(|tier| tier.average_moves)
    }
}

#[expect(clippy::cast_precision_loss)]
pub(crate) fn mean(values: &[usize]) -> f64 {
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

#[cfg(test)]
mod tests {
    use chromasort_solver::{BfsSolver, SearchLimits};

    use super::*;
    use crate::{
        BatchTester,
        testing::{BY_OPTIMAL_MOVES, ascending_tiers, level},
    };

    fn progression(levels: &[chromasort_core::Level]) -> DifficultyProgression {
        BatchTester::default().verify_difficulty_progression(levels)
    }

    #[test]
    fn test_increasing_tiers_are_monotonic() {
        let result = progression(&ascending_tiers());
        assert!(result.is_monotonic);
        let averages: Vec<_> = Difficulty::ALL
            .into_iter()
            .map(|d| result.average(d).unwrap())
            .collect();
        assert_eq!(averages, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_reversed_tiers_are_not_monotonic() {
        let levels: Vec<_> = Difficulty::ALL
            .into_iter()
            .zip(BY_OPTIMAL_MOVES.into_iter().rev())
            .map(|(difficulty, (state, _))| level(difficulty.name(), difficulty, state))
            .collect();
        assert!(!progression(&levels).is_monotonic);
    }

    #[test]
    fn test_equal_averages_are_not_monotonic() {
        let levels = [
            level("e", Difficulty::Easy, "2:RB 2:BR 2:"),
            level("m", Difficulty::Medium, "2:RB 2:BR 2:"),
        ];
        assert!(!progression(&levels).is_monotonic);
    }

    #[test]
    fn test_averages_within_a_tier() {
        let levels = [
            level("e1", Difficulty::Easy, BY_OPTIMAL_MOVES[0].0),
            level("e2", Difficulty::Easy, BY_OPTIMAL_MOVES[1].0),
            level("h1", Difficulty::Hard, BY_OPTIMAL_MOVES[3].0),
        ];
        let result = progression(&levels);
        assert_eq!(result.average(Difficulty::Easy), Some(1.5));
        assert_eq!(result.average(Difficulty::Medium), None);
        assert_eq!(result.tiers[0].levels, 2);
        assert!(result.is_monotonic);
    }

    #[test]
    fn test_unsolvable_levels_are_left_out_of_averages() {
        let levels = [
            level("e1", Difficulty::Easy, BY_OPTIMAL_MOVES[0].0),
            level("e2", Difficulty::Easy, "2:RB 2:GY 2:"),
            level("x", Difficulty::Expert, BY_OPTIMAL_MOVES[2].0),
        ];
        let result = progression(&levels);
        assert_eq!(result.average(Difficulty::Easy), Some(1.0));
        assert_eq!(result.tiers[0].levels, 1);
        assert!(result.unsolved_tiers.is_empty());
        assert!(result.is_monotonic);
    }

    #[test]
    fn test_tier_without_solved_levels_is_not_monotonic() {
        let levels = [
            level("e", Difficulty::Easy, BY_OPTIMAL_MOVES[0].0),
            level("m", Difficulty::Medium, "2:RB 2:GY 2:"),
            level("x", Difficulty::Expert, BY_OPTIMAL_MOVES[2].0),
        ];
        let result = progression(&levels);
        assert_eq!(result.tiers.len(), 2);
        assert_eq!(result.unsolved_tiers, [Difficulty::Medium]);
        assert!(!result.is_monotonic);
    }

    #[test]
    fn test_expert_tier_over_its_state_limit_is_not_monotonic() {
        let mut levels = ascending_tiers();
        levels.push(level("expert-2", Difficulty::Expert, BY_OPTIMAL_MOVES[3].0));
        let tight = BfsSolver::new(SearchLimits::default().with_max_states(1));
        let tester = BatchTester::default().with_tier_solver(Difficulty::Expert, tight);

        let result = tester.verify_difficulty_progression(&levels);
        assert_eq!(result.average(Difficulty::Hard), Some(3.0));
        assert_eq!(result.average(Difficulty::Expert), None);
        assert_eq!(result.unsolved_tiers, [Difficulty::Expert]);
        assert!(!result.is_monotonic);
    }

    #[test]
    fn test_empty_input_is_trivially_monotonic() {
        assert!(progression(&[]).is_monotonic);
    }
}
