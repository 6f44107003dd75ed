use std::sync::atomic::{AtomicUsize, Ordering};

use chromasort_core::{Difficulty, Level};
use chromasort_solver::{BfsSolver, QualityPolicy, Validation, Verdict};
use rayon::prelude::*;
use serde::Serialize;

use crate::{DifficultyProgression, QaReport, Statistics, find_duplicates};

/// Validation outcome of one level, kept for failure triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelResult {
    /// Level id.
    pub id: String,
    /// Declared tier.
    pub difficulty: Difficulty,
    /// Verdict under the tester's quality policy.
    pub verdict: Verdict,
    /// Full search and quality detail.
    pub validation: Validation,
}

impl LevelResult {
    /// Returns `true` unless the verdict is [`Verdict::Fail`].
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.verdict.is_fail()
    }

    /// Returns `true` if any quality finding was raised.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.validation.findings().is_empty()
    }
}

/// Aggregated outcome of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    /// Per-level results in input order.
    pub results: Vec<LevelResult>,
    /// Levels that did not fail.
    pub passed: usize,
    /// Levels that failed.
    pub failed: usize,
    /// Levels with at least one quality finding, passed or not.
    pub warnings: usize,
    /// `passed / total`, or `0.0` for an empty batch.
    pub pass_rate: f64,
}

impl BatchResult {
    /// Merges per-level results, in order, into counts.
    #[must_use]
    pub fn from_results(results: Vec<LevelResult>) -> Self {
        let mut passed = 0;
        let mut warnings = 0;
        for result in &results {
            passed += usize::from(result.passed());
            warnings += usize::from(result.has_warnings());
        }
        let failed = results.len() - passed;
        #[expect(clippy::cast_precision_loss)]
        let pass_rate = if results.is_empty() {
            0.0
        } else {
            passed as f64 / results.len() as f64
        };
        Self {
            results,
            passed,
            failed,
            warnings,
            pass_rate,
        }
    }

    /// Returns the number of levels tested.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Returns the results that failed.
    pub fn failures(&self) -> impl Iterator<Item = &LevelResult> {
        self.results.iter().filter(|result| !result.passed())
    }
}

/// Runs the solvability search and quality heuristics over many levels.
///
/// Each tier has its own solver, so levels can be checked with the same
/// bounds they were generated with.
///
/// # Examples
///
/// ```
/// use chromasort_core::{Difficulty, Level, PuzzleState};
/// use chromasort_qa::BatchTester;
///
/// let solvable: PuzzleState = "2:RB 2:BR 2:".parse()?;
/// let stuck: PuzzleState = "2:RB 2:GY 2:".parse()?;
/// let levels = [
///     Level::new("a", "A", Difficulty::Easy, solvable)?,
///     Level::new("b", "B", Difficulty::Easy, stuck)?,
/// ];
///
/// let batch = BatchTester::default().test_levels(&levels, |_done, _total| {});
/// assert_eq!(batch.passed, 1);
/// assert_eq!(batch.failed, 1);
/// assert_eq!(batch.pass_rate, 0.5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchTester {
    solvers: [BfsSolver; Difficulty::ALL.len()],
    strict: bool,
}

impl BatchTester {
    /// Creates a tester that searches every tier with `solver`.
    #[must_use]
    pub fn new(solver: BfsSolver) -> Self {
        Self {
            solvers: [solver; Difficulty::ALL.len()],
            strict: false,
        }
    }

    /// Creates a tester with one solver per tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use chromasort_core::Difficulty;
    /// use chromasort_qa::BatchTester;
    /// use chromasort_solver::{BfsSolver, SearchLimits};
    ///
    /// let tester = BatchTester::from_fn(|difficulty| {
    ///     let max_states = if difficulty >= Difficulty::Hard { 100_000 } else { 5_000 };
    ///     BfsSolver::new(SearchLimits::default().with_max_states(max_states))
    /// });
    /// assert_eq!(tester.solver(Difficulty::Expert).limits().max_states, 100_000);
    /// assert_eq!(tester.solver(Difficulty::Easy).limits().max_states, 5_000);
    /// ```
    #[must_use]
    pub fn from_fn<F>(mut solver_for: F) -> Self
    where
        F: FnMut(Difficulty) -> BfsSolver,
    {
        Self {
            solvers: Difficulty::ALL.map(&mut solver_for),
            strict: false,
        }
    }

    /// Returns a copy that searches `difficulty` with `solver`.
    #[must_use]
    pub fn with_tier_solver(mut self, difficulty: Difficulty, solver: BfsSolver) -> Self {
        self.solvers[tier_index(difficulty)] = solver;
        self
    }

    /// Returns a copy that fails levels with quality findings.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns the solver used for levels of `difficulty`.
    #[must_use]
    pub fn solver(&self, difficulty: Difficulty) -> &BfsSolver {
        &self.solvers[tier_index(difficulty)]
    }

    /// Returns the quality policy verdicts are computed with.
    #[must_use]
    pub fn policy(&self) -> QualityPolicy {
        if self.strict {
            QualityPolicy::Strict
        } else {
            QualityPolicy::Lenient
        }
    }

    /// Validates a single level with the solver of its tier.
    #[must_use]
    pub fn test_level(&self, level: &Level) -> LevelResult {
        let solver = self.solver(level.difficulty());
        let validation = Validation::run(solver, level.initial_state());
        LevelResult {
            id: level.id().to_owned(),
            difficulty: level.difficulty(),
            verdict: validation.verdict(self.policy()),
            validation,
        }
    }

    /// Validates every level in parallel.
    ///
    /// `progress(done, total)` is called once per finished level. Calls come
    /// from worker threads, so their order is not guaranteed.
    pub fn test_levels<F>(&self, levels: &[Level], progress: F) -> BatchResult
    where
        F: Fn(usize, usize) + Sync,
    {
        let total = levels.len();
        let done = AtomicUsize::new(0);
        let results = levels
            .par_iter()
            .map(|level| {
                let result = self.test_level(level);
                if !result.passed() {
                    log::debug!(
                        "{}: {}",
                        result.id,
                        result.validation.error().unwrap_or("quality check failed")
                    );
                }
                progress(done.fetch_add(1, Ordering::Relaxed) + 1, total);
                result
            })
            .collect();
        let batch = BatchResult::from_results(results);
        log::info!(
            "tested {} levels: {} passed, {} failed, {} with warnings",
            batch.total(),
            batch.passed,
            batch.failed,
            batch.warnings
        );
        batch
    }

    /// Tests `levels` and reports per-tier optimal move averages.
    #[must_use]
    pub fn verify_difficulty_progression(&self, levels: &[Level]) -> DifficultyProgression {
        DifficultyProgression::from_results(&self.test_levels(levels, |_, _| {}).results)
    }

    /// Tests `levels` and summarizes them.
    #[must_use]
    pub fn generate_statistics(&self, levels: &[Level]) -> Statistics {
        Statistics::from_results(&self.test_levels(levels, |_, _| {}).results)
    }

    /// Runs every check over `levels` with a single search per level.
    pub fn report<F>(&self, levels: &[Level], progress: F) -> QaReport
    where
        F: Fn(usize, usize) + Sync,
    {
        let batch = self.test_levels(levels, progress);
        QaReport {
            duplicates: find_duplicates(levels),
            progression: DifficultyProgression::from_results(&batch.results),
            statistics: Statistics::from_results(&batch.results),
            batch,
        }
    }
}

fn tier_index(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
        Difficulty::Expert => 3,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chromasort_solver::SearchLimits;

    use super::*;
    use crate::testing::level;

    #[test]
    fn test_counts_and_pass_rate() {
        let levels = [
            level("clean", Difficulty::Easy, "3:RBR 3:BRB 3:"),
            level("trivial", Difficulty::Easy, "2:RR 2:BB 2:RB 2:"),
            level("stuck", Difficulty::Easy, "2:RB 2:GY 2:"),
            level("full", Difficulty::Easy, "2:RB 2:BR"),
        ];
        let batch = BatchTester::default().test_levels(&levels, |_, _| {});
        assert_eq!(batch.total(), 4);
        assert_eq!(batch.passed, 2);
        assert_eq!(batch.failed, 2);
        assert_eq!(batch.warnings, 1);
        assert!((batch.pass_rate - 0.5).abs() < f64::EPSILON);

        let verdicts: Vec<_> = batch.results.iter().map(|r| r.verdict).collect();
        assert_eq!(
            verdicts,
            [
                Verdict::Pass,
                Verdict::PassWithWarnings,
                Verdict::Fail,
                Verdict::Fail
            ]
        );
        let failed: Vec<_> = batch.failures().map(|r| r.id.as_str()).collect();
        assert_eq!(failed, ["stuck", "full"]);
        assert_eq!(
            batch.results[3].validation.error(),
            Some("needs at least one empty container")
        );
    }

    #[test]
    fn test_strict_mode_fails_warnings() {
        let levels = [level("trivial", Difficulty::Easy, "2:RR 2:BB 2:RB 2:")];
        let batch = BatchTester::default()
            .with_strict(true)
            .test_levels(&levels, |_, _| {});
        assert_eq!(batch.failed, 1);
        assert_eq!(batch.results[0].verdict, Verdict::Fail);
    }

    #[test]
    fn test_limits_are_reported_separately() {
        let levels = [level("big", Difficulty::Hard, "4:RBRB 4:BRBR 4:")];
        let tester = BatchTester::new(BfsSolver::new(SearchLimits::default().with_max_states(1)));
        let batch = tester.test_levels(&levels, |_, _| {});
        assert_eq!(
            batch.results[0].validation.error(),
            Some("exceeded state limit")
        );
    }

    #[test]
    fn test_levels_use_the_solver_of_their_tier() {
        let state = "4:RBR 4:BRB 4: 4:";
        let levels = [
            level("easy", Difficulty::Easy, state),
            level("hard", Difficulty::Hard, state),
        ];
        let tight = BfsSolver::new(SearchLimits::default().with_max_states(1));
        let tester =
            BatchTester::new(tight).with_tier_solver(Difficulty::Hard, BfsSolver::default());
        let batch = tester.test_levels(&levels, |_, _| {});

        assert_eq!(
            batch.results[0].validation.error(),
            Some("exceeded state limit")
        );
        assert!(batch.results[1].passed());
        assert_eq!(tester.solver(Difficulty::Medium).limits().max_states, 1);
    }

    #[test]
    fn test_progress_reaches_total() {
        let levels: Vec<_> = (0..6)
            .map(|i| level(&format!("l{i}"), Difficulty::Easy, "2:RB 2:BR 2:"))
            .collect();
        let seen = Mutex::new(Vec::new());
        BatchTester::default().test_levels(&levels, |done, total| {
            seen.lock().unwrap().push((done, total));
        });
        let mut seen = seen.into_inner().unwrap();
        seen.sort_unstable();
        assert_eq!(seen, (1..=6).map(|i| (i, 6)).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_batch() {
        let batch = BatchTester::default().test_levels(&[], |_, _| {});
        assert_eq!(batch.total(), 0);
        assert!(batch.pass_rate.abs() < f64::EPSILON);
    }
}
