//! Heuristic quality checks on initial states.
//!
//! Findings are advisory. They are attached to an otherwise passing
//! [`Validation`](crate::Validation) and only reject a level when the caller
//! opts into [`QualityPolicy::Strict`](crate::QualityPolicy::Strict).

use std::fmt::{self, Display};

use chromasort_core::PuzzleState;
use serde::Serialize;

/// A quality issue found in an initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityFinding {
    /// More than half of the full containers are already sorted.
    TrivialStart {
        /// Full containers that hold a single color.
        complete: usize,
        /// All full containers.
        full: usize,
    },
    /// Fewer than two distinct colors are present.
    TooFewColors {
        /// Number of distinct colors.
        colors: usize,
    },
}

impl Display for QualityFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrivialStart { complete, full } => write!(
                f,
                "trivial start: {complete} of {full} full containers are already sorted"
            ),
            Self::TooFewColors { colors } => {
                write!(f, "too few colors: only {colors} distinct color(s)")
            }
        }
    }
}

/// Returns every quality finding for `state`.
///
/// # Examples
///
/// ```
/// use chromasort_core::PuzzleState;
/// use chromasort_solver::{QualityFinding, assess_quality};
///
/// let state: PuzzleState = "2:RR 2:BB 2:RB 2:".parse()?;
/// assert_eq!(
///     assess_quality(&state),
///     [QualityFinding::TrivialStart { complete: 2, full: 3 }]
/// );
/// # Ok::<(), chromasort_core::ParseStateError>(())
/// ```
#[must_use]
pub fn assess_quality(state: &PuzzleState) -> Vec<QualityFinding> {
    let mut findings = Vec::new();

    let full = state.containers().iter().filter(|c| c.is_full()).count();
    let complete = state
        .containers()
        .iter()
        .filter(|c| c.is_complete())
        .count();
    if complete * 2 > full {
        findings.push(QualityFinding::TrivialStart { complete, full });
    }

    let colors = state.distinct_colors().len();
    if colors < 2 {
        findings.push(QualityFinding::TooFewColors { colors });
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(s: &str) -> Vec<QualityFinding> {
        assess_quality(&s.parse().unwrap())
    }

    #[test]
    fn test_clean_state_has_no_findings() {
        assert!(assess("3:RBG 3:GRB 3:BGR 3:").is_empty());
    }

    #[test]
    fn test_exactly_half_complete_is_not_trivial() {
        assert!(assess("2:RR 2:BG 2:").is_empty());
    }

    #[test]
    fn test_trivial_start() {
        assert_eq!(
            assess("2:RR 2:BB 2:GB 2:G"),
            [QualityFinding::TrivialStart {
                complete: 2,
                full: 3
            }]
        );
    }

    #[test]
    fn test_too_few_colors() {
        assert_eq!(
            assess("3:R 3:RR 3:"),
            [QualityFinding::TooFewColors { colors: 1 }]
        );
        assert_eq!(
            assess("3: 3:"),
            [QualityFinding::TooFewColors { colors: 0 }]
        );
    }

    #[test]
    fn test_display() {
        let finding = QualityFinding::TrivialStart {
            complete: 3,
            full: 4,
        };
        assert_eq!(
            finding.to_string(),
            "trivial start: 3 of 4 full containers are already sorted"
        );
    }
}
