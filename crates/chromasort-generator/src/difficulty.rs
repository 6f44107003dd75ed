//! Heuristic difficulty estimate, independent of the tier label.
//!
//! The estimate is used to cross-check the declared tier of a generated
//! level. It never decides whether a level is accepted.

use chromasort_core::{Difficulty, PuzzleState};
use serde::Serialize;

const CONTAINER_WEIGHT: usize = 4;
const COLOR_WEIGHT: usize = 6;
const MIXED_WEIGHT: usize = 5;
const EMPTY_FRACTION_WEIGHT: usize = 40;

/// Lowest scores of the medium, hard and expert tiers.
const TIER_CUTOFFS: [usize; 3] = [46, 64, 80];

/// A heuristic difficulty score with the inputs it was built from.
///
/// # Examples
///
/// ```
/// use chromasort_core::{Difficulty, PuzzleState};
/// use chromasort_generator::estimate_difficulty;
///
/// let state: PuzzleState = "3:RBG 3:GRB 3:BGR 3: 3:".parse()?;
/// let estimate = estimate_difficulty(&state);
/// assert_eq!(estimate.mixed_containers, 3);
/// assert_eq!(estimate.tier(), Difficulty::Easy);
/// # Ok::<(), chromasort_core::ParseStateError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifficultyEstimate {
    /// Combined score; higher is harder.
    pub score: usize,
    /// Number of containers.
    pub containers: usize,
    /// Number of distinct colors.
    pub colors: usize,
    /// Number of containers that start empty.
    pub empty_containers: usize,
    /// Number of containers that are neither empty nor complete.
    pub mixed_containers: usize,
}

impl DifficultyEstimate {
    /// Maps the score onto the tier it most resembles.
    #[must_use]
    pub fn tier(&self) -> Difficulty {
        let rank = TIER_CUTOFFS
            .iter()
            .take_while(|&&cutoff| self.score >= cutoff)
            .count();
        Difficulty::ALL[rank]
    }
}

/// Scores how hard `state` looks.
///
/// The score grows with container count, color variety and mixed
/// containers, and shrinks with the fraction of empty containers.
#[must_use]
pub fn estimate_difficulty(state: &PuzzleState) -> DifficultyEstimate {
    let containers = state.len();
    let colors = state.distinct_colors().len();
    let empty_containers = state.empty_count();
    let mixed_containers = state
        .containers()
        .iter()
        .filter(|c| !c.is_empty() && !c.is_complete())
        .count();

    let gain = containers * CONTAINER_WEIGHT
        + colors * COLOR_WEIGHT
        + mixed_containers * MIXED_WEIGHT;
    let slack = empty_containers * EMPTY_FRACTION_WEIGHT / containers.max(1);

    DifficultyEstimate {
        score: gain.saturating_sub(slack),
        containers,
        colors,
        empty_containers,
        mixed_containers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(s: &str) -> DifficultyEstimate {
        estimate_difficulty(&s.parse().unwrap())
    }

    #[test]
    fn test_counts() {
        let e = estimate("3:RRR 3:RB 3:BB 3:");
        assert_eq!(e.containers, 4);
        assert_eq!(e.colors, 2);
        assert_eq!(e.empty_containers, 1);
        // Partially filled uniform containers still count as mixed.
        assert_eq!(e.mixed_containers, 2);
        assert_eq!(e.score, 16 + 12 + 10 - 10);
    }

    #[test]
    fn test_score_grows_with_mixing() {
        let sorted = estimate("4:RRRR 4:BBBB 4: 4:");
        let mixed = estimate("4:RBRB 4:BRBR 4: 4:");
        assert!(mixed.score > sorted.score);
    }

    #[test]
    fn test_score_shrinks_with_slack() {
        let tight = estimate("4:RBRB 4:BRBR 4:");
        let loose = estimate("4:RBRB 4:BRBR 4: 4: 4:");
        assert!(loose.score < tight.score);
    }

    #[test]
    fn test_default_tier_shapes_map_to_their_tier() {
        let cases = [
            ("3:RBG 3:GRB 3:BGR 3: 3:", Difficulty::Easy),
            ("4:RBGY 4:GRYB 4:BYRG 4:YGBR 4: 4:", Difficulty::Medium),
            ("4:RBGY 4:PRYB 4:BYPG 4:YGBR 4:GPRP 4: 4:", Difficulty::Hard),
            (
                "4:RBGY 4:PRYO 4:BYPG 4:YGOR 4:GPRO 4:OBPB 4: 4:",
                Difficulty::Expert,
            ),
        ];
        for (state, tier) in cases {
            assert_eq!(estimate(state).tier(), tier, "{state}");
        }
    }

    #[test]
    fn test_tier_is_monotone_in_score() {
        let mut e = estimate("2:RB 2:");
        let mut last = Difficulty::Easy;
        for score in 0..200 {
            e.score = score;
            assert!(e.tier() >= last);
            last = e.tier();
        }
        assert_eq!(last, Difficulty::Expert);
    }
}
