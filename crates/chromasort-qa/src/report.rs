use std::fmt::{self, Display};

use serde::Serialize;

use crate::{BatchResult, DifficultyProgression, DuplicateGroup, Statistics};

/// Every QA check over one corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaReport {
    /// Per-level verdicts and counts.
    pub batch: BatchResult,
    /// Structurally identical levels.
    pub duplicates: Vec<DuplicateGroup>,
    /// Per-tier optimal move averages.
    pub progression: DifficultyProgression,
    /// Summary numbers.
    pub statistics: Statistics,
}

impl QaReport {
    /// Returns `true` if no level failed and no layout is duplicated.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.batch.failed == 0 && self.duplicates.is_empty()
    }
}

impl Display for QaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let batch = &self.batch;
        writeln!(
            f,
            "levels: {} tested, {} passed, {} failed, {} with warnings ({:.1}% pass)",
            batch.total(),
            batch.passed,
            batch.failed,
            batch.warnings,
            batch.pass_rate * 100.0
        )?;

        for result in batch.failures() {
            let reason = match result.validation.error() {
                Some(error) => error.to_owned(),
                None => result.validation.warnings().join("; "),
            };
            writeln!(f, "  FAIL {}: {reason}", result.id)?;
        }
        for result in batch.results.iter().filter(|r| r.passed() && r.has_warnings()) {
            for warning in result.validation.warnings() {
                writeln!(f, "  WARN {}: {warning}", result.id)?;
            }
        }

        if self.duplicates.is_empty() {
            writeln!(f, "duplicates: none")?;
        } else {
            writeln!(f, "duplicates: {} group(s)", self.duplicates.len())?;
            for group in &self.duplicates {
                writeln!(f, "  {}", group.level_ids.join(", "))?;
            }
        }

        write!(f, "progression:")?;
        for tier in &self.progression.tiers {
            write!(f, " {}={:.1}", tier.difficulty, tier.average_moves)?;
        }
        for difficulty in &self.progression.unsolved_tiers {
            write!(f, " {difficulty}=?")?;
        }
        let verdict = if self.progression.is_monotonic {
            "monotonic"
        } else {
            "NOT monotonic"
        };
        writeln!(f, " ({verdict})")?;

        let stats = &self.statistics;
        match (stats.min_moves, stats.max_moves, stats.average_moves) {
            (Some(min), Some(max), Some(avg)) => writeln!(
                f,
                "optimal moves: min {min}, max {max}, average {avg:.1} over {} solvable",
                stats.solvable_count
            )?,
            _ => writeln!(f, "optimal moves: no solvable levels")?,
        }
        write!(f, "tiers:")?;
        for (difficulty, count) in &stats.difficulty_distribution {
            write!(f, " {difficulty}={count}")?;
        }
        writeln!(f)
    }
}
