use std::collections::BTreeMap;

use chromasort_core::Difficulty;
use serde::Serialize;

use crate::{LevelResult, progression::mean};

/// Corpus-wide summary numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of levels.
    pub total: usize,
    /// Levels with a solution within the search bounds.
    pub solvable_count: usize,
    /// Solvable levels without quality findings.
    pub quality_pass_count: usize,
    /// Mean optimal move count over solvable levels.
    pub average_moves: Option<f64>,
    /// Smallest optimal move count.
    pub min_moves: Option<usize>,
    /// Largest optimal move count.
    pub max_moves: Option<usize>,
    /// Number of levels per declared tier; every tier is present.
    pub difficulty_distribution: BTreeMap<Difficulty, usize>,
}

impl Statistics {
    /// Summarizes batch results.
    #[must_use]
    pub fn from_results(results: &[LevelResult]) -> Self {
        let moves: Vec<usize> = results
            .iter()
            .filter_map(|result| result.validation.optimal_move_count())
            .collect();
        let quality_pass_count = results
            .iter()
            .filter(|result| result.validation.is_solvable() && !result.has_warnings())
            .count();

        let mut difficulty_distribution: BTreeMap<_, _> =
            Difficulty::ALL.into_iter().map(|d| (d, 0)).collect();
        for result in results {
            *difficulty_distribution.entry(result.difficulty).or_default() += 1;
        }

        Self {
            total: results.len(),
            solvable_count: moves.len(),
            quality_pass_count,
            average_moves: (!moves.is_empty()).then(|| mean(&moves)),
            min_moves: moves.iter().min().copied(),
            max_moves: moves.iter().max().copied(),
            difficulty_distribution,
        }
    }
}
