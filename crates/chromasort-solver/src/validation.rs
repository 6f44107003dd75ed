//! Solvability plus quality, combined into one verdict.

use chromasort_core::PuzzleState;
use serde::Serialize;

use crate::{BfsSolver, QualityFinding, SearchReport, assess_quality};

/// Whether quality findings are advisory or fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum QualityPolicy {
    /// Findings are reported as warnings only.
    #[default]
    Lenient,
    /// Any finding fails validation.
    Strict,
}

/// Pass/fail verdict of a [`Validation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Solvable with no findings.
    Pass,
    /// Solvable, with advisory findings.
    PassWithWarnings,
    /// Not solvable within bounds, or rejected by a strict policy.
    Fail,
}

/// Outcome of validating one initial state.
///
/// # Examples
///
/// ```
/// use chromasort_core::PuzzleState;
/// use chromasort_solver::{BfsSolver, QualityPolicy, Validation, Verdict};
///
/// let state: PuzzleState = "2:RR 2:BB 2:RB 2:".parse()?;
/// let validation = Validation::run(&BfsSolver::default(), &state);
/// assert!(validation.is_solvable());
/// assert_eq!(validation.verdict(QualityPolicy::Lenient), Verdict::PassWithWarnings);
/// assert_eq!(validation.verdict(QualityPolicy::Strict), Verdict::Fail);
/// assert_eq!(validation.warnings().len(), 1);
/// # Ok::<(), chromasort_core::ParseStateError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    report: SearchReport,
    findings: Vec<QualityFinding>,
}

impl Validation {
    /// Combines a search report with quality findings.
    #[must_use]
    pub fn new(report: SearchReport, findings: Vec<QualityFinding>) -> Self {
        Self { report, findings }
    }

    /// Searches `state` and assesses its quality.
    #[must_use]
    pub fn run(solver: &BfsSolver, state: &PuzzleState) -> Self {
        Self::new(solver.solve(state), assess_quality(state))
    }

    /// Returns the underlying search report.
    #[must_use]
    pub fn report(&self) -> &SearchReport {
        &self.report
    }

    /// Returns the quality findings.
    #[must_use]
    pub fn findings(&self) -> &[QualityFinding] {
        &self.findings
    }

    /// Returns `true` if a solution was found.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        self.report.found()
    }

    /// Returns the optimal move count; present iff solvable.
    #[must_use]
    pub fn optimal_move_count(&self) -> Option<usize> {
        self.report.optimal_move_count()
    }

    /// Returns the number of states the search explored.
    #[must_use]
    pub fn states_explored(&self) -> usize {
        self.report.states_explored()
    }

    /// Returns the findings rendered as warning text.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.findings.iter().map(ToString::to_string).collect()
    }

    /// Returns why the state failed to solve, if it did.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.report.error()
    }

    /// Returns the verdict under `policy`.
    #[must_use]
    pub fn verdict(&self, policy: QualityPolicy) -> Verdict {
        match (self.is_solvable(), self.findings.is_empty()) {
            (false, _) => Verdict::Fail,
            (true, true) => Verdict::Pass,
            (true, false) if policy.is_strict() => Verdict::Fail,
            (true, false) => Verdict::PassWithWarnings,
        }
    }

    /// Returns the verdict with findings treated as failures.
    #[must_use]
    pub fn verdict_strict(&self) -> Verdict {
        self.verdict(QualityPolicy::Strict)
    }
}

/// Searches `state` with `solver` and assesses its quality.
#[must_use]
pub fn validate(solver: &BfsSolver, state: &PuzzleState) -> Validation {
    Validation::run(solver, state)
}
